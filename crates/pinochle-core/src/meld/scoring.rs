use crate::meld::rules::{Meld, MeldRules};
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

/// Total melding score of a hand for a given trump suit.
///
/// Greedy by descending meld score: each matched meld consumes its cards
/// from the remaining multiset, so one physical card never satisfies two
/// melds, while duplicate-requiring melds correctly demand two copies.
/// This is exact for the shipped tables but is not a general multiset-cover
/// solver; pathologically overlapping requirement sets could be
/// under-scored. That limitation is deliberate.
pub fn melding_score(cards: &[Card], trump: Suit, rules: MeldRules) -> u32 {
    let mut remaining: Vec<Card> = cards.to_vec();
    let mut total = 0;

    for meld in rules.melds(trump) {
        if meld.name() == Meld::COMMON_MARRIAGE {
            // Applied independently once per eligible non-trump suit.
            for suit in Suit::ALL {
                if suit == trump {
                    continue;
                }
                let marriage = [
                    Card::new(Rank::King, suit),
                    Card::new(Rank::Queen, suit),
                ];
                if consume(&mut remaining, &marriage) {
                    total += meld.score();
                }
            }
        } else if consume(&mut remaining, meld.cards()) {
            total += meld.score();
        }
    }

    total
}

/// Removes `wanted` from `remaining` when every required copy is present;
/// leaves `remaining` untouched otherwise.
fn consume(remaining: &mut Vec<Card>, wanted: &[Card]) -> bool {
    let mut pool = remaining.clone();
    for &card in wanted {
        match pool.iter().position(|&c| c == card) {
            Some(index) => {
                pool.swap_remove(index);
            }
            None => return false,
        }
    }
    *remaining = pool;
    true
}

#[cfg(test)]
mod tests {
    use super::melding_score;
    use crate::meld::rules::MeldRules;
    use crate::model::card::Card;

    fn hand(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|code| Card::from_code(code)).collect()
    }

    #[test]
    fn single_run_scores_without_double_counting_the_marriage() {
        // One copy each of A/K/Q/J/10 of trump: the run consumes the king
        // and queen, so the royal marriage must not also match.
        let cards = hand(&["14S", "13S", "12S", "11S", "10S"]);
        assert_eq!(melding_score(&cards, crate::model::suit::Suit::Spades, MeldRules::Original), 150);
    }

    #[test]
    fn extra_king_upgrades_the_run() {
        let cards = hand(&["14S", "13S", "12S", "11S", "10S", "13S"]);
        assert_eq!(
            melding_score(&cards, crate::model::suit::Suit::Spades, MeldRules::Original),
            190
        );
    }

    #[test]
    fn greedy_takes_the_richest_row_not_the_best_cover() {
        // Run plus a second king and queen. The 190-point extra-king row
        // matches first and swallows the spare king, leaving the lone queen
        // worthless: 190, not run + marriage + leftovers. Under Extended the
        // 230-point run-and-marriage row covers all seven cards instead.
        let cards = hand(&["14S", "13S", "12S", "11S", "10S", "13S", "12S"]);
        let trump = crate::model::suit::Suit::Spades;
        assert_eq!(melding_score(&cards, trump, MeldRules::Original), 190);
        assert_eq!(melding_score(&cards, trump, MeldRules::Extended), 230);
    }

    #[test]
    fn scoring_is_order_invariant() {
        let forward = hand(&["14S", "13S", "12S", "11S", "10S", "13H", "12H"]);
        let mut backward = forward.clone();
        backward.reverse();
        let trump = crate::model::suit::Suit::Spades;
        assert_eq!(
            melding_score(&forward, trump, MeldRules::Extended),
            melding_score(&backward, trump, MeldRules::Extended)
        );
    }

    #[test]
    fn double_run_requires_two_full_copies() {
        let trump = crate::model::suit::Suit::Hearts;
        let single = hand(&["14H", "13H", "12H", "11H", "10H"]);
        assert_eq!(melding_score(&single, trump, MeldRules::Extended), 150);

        let double = hand(&[
            "14H", "13H", "12H", "11H", "10H", "14H", "13H", "12H", "11H", "10H",
        ]);
        assert_eq!(melding_score(&double, trump, MeldRules::Extended), 1500);
    }

    #[test]
    fn common_marriage_scores_each_non_trump_suit() {
        let trump = crate::model::suit::Suit::Spades;
        let cards = hand(&["13H", "12H", "13D", "12D", "13C", "12C"]);
        assert_eq!(melding_score(&cards, trump, MeldRules::Extended), 60);
        // Under the Original table there is no common marriage row at all.
        assert_eq!(melding_score(&cards, trump, MeldRules::Original), 0);
    }

    #[test]
    fn dix_and_pinochle_rows_exist_only_in_the_extended_table() {
        let trump = crate::model::suit::Suit::Clubs;
        let cards = hand(&["9C", "11D", "12S"]);
        assert_eq!(melding_score(&cards, trump, MeldRules::Original), 0);
        assert_eq!(melding_score(&cards, trump, MeldRules::Extended), 10 + 40);
    }

    #[test]
    fn aces_around_and_jacks_abound() {
        let trump = crate::model::suit::Suit::Clubs;
        let aces = hand(&["14S", "14H", "14D", "14C"]);
        assert_eq!(melding_score(&aces, trump, MeldRules::Extended), 100);

        let jacks = hand(&["11S", "11H", "11D", "11C", "11S", "11H", "11D", "11C"]);
        // Two jacks per suit pay the abound row; a lone set does not.
        assert_eq!(melding_score(&jacks, trump, MeldRules::Extended), 400);
        let single_jacks = hand(&["11S", "11H", "11D", "11C"]);
        // One pinochle (J-diamonds + Q-spades) cannot match without the queen.
        assert_eq!(melding_score(&single_jacks, trump, MeldRules::Extended), 0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let trump = crate::model::suit::Suit::Diamonds;
        let cards = hand(&["14D", "13D", "12D", "11D", "10D", "9D", "12S", "11D"]);
        let first = melding_score(&cards, trump, MeldRules::Extended);
        let second = melding_score(&cards, trump, MeldRules::Extended);
        assert_eq!(first, second);
    }
}
