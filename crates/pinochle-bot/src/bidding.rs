use pinochle_core::bidding::{BID_UNIT, MAX_SINGLE_RAISE};
use pinochle_core::meld::{MeldRules, melding_score};
use pinochle_core::model::hand::Hand;
use pinochle_core::model::rank::Rank;
use pinochle_core::model::suit::Suit;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{Level, event};

/// A bid decision: the raise amount for this turn, 0 to pass.
pub trait BiddingStrategy: Send {
    fn calculate_bid(&mut self, hand: &Hand, current_bid: u32, is_first_bid: bool) -> u32;

    /// The suit this strategy would call as trump after winning the bid.
    /// `None` means it has no opinion and the caller should pick.
    fn preferred_trump(&mut self, _hand: &Hand) -> Option<Suit> {
        None
    }
}

/// Bids 0, 10 or 20 uniformly, blind to the hand.
pub struct RandomBidding<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBidding<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> BiddingStrategy for RandomBidding<R> {
    fn calculate_bid(&mut self, _hand: &Hand, _current_bid: u32, _is_first_bid: bool) -> u32 {
        let steps = self.rng.gen_range(0..3);
        (steps * BID_UNIT).min(MAX_SINGLE_RAISE)
    }
}

/// Opens at the hand's melding value for its majority suit and keeps
/// raising only while the running total stays inside an estimate of what
/// the hand can actually deliver.
pub struct SmartBidding<R: Rng> {
    rng: R,
    rules: MeldRules,
}

impl<R: Rng> SmartBidding<R> {
    pub fn new(rng: R, rules: MeldRules) -> Self {
        Self { rng, rules }
    }

    /// The suit the hand holds most of; ties are broken uniformly.
    pub fn likely_trump(&mut self, hand: &Hand) -> Suit {
        let best = Suit::ALL
            .iter()
            .map(|&suit| hand.count_of_suit(suit))
            .max()
            .unwrap_or(0);
        let tied: Vec<Suit> = Suit::ALL
            .iter()
            .copied()
            .filter(|&suit| hand.count_of_suit(suit) == best)
            .collect();
        tied.choose(&mut self.rng).copied().unwrap_or(Suit::Spades)
    }

    /// Card points plus melding value with `suit` as trump — the hand's
    /// realizable worth if that suit is called.
    fn suit_estimate(&self, hand: &Hand, suit: Suit) -> u32 {
        let card_points: u32 = hand
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank.points())
            .sum();
        card_points + melding_score(hand.cards(), suit, self.rules)
    }

    /// The estimate for whichever suit carries the most aces, tens and
    /// kings; ties resolve to the earlier suit in `Suit::ALL`.
    fn best_high_card_estimate(&self, hand: &Hand) -> u32 {
        let high_cards = |suit: Suit| {
            hand.iter()
                .filter(|c| {
                    c.suit == suit
                        && matches!(c.rank, Rank::Ace | Rank::Ten | Rank::King)
                })
                .count()
        };
        // A strictly-greater fold keeps the earliest suit on ties.
        let best = Suit::ALL
            .iter()
            .copied()
            .fold((Suit::Spades, 0usize), |acc, suit| {
                let count = high_cards(suit);
                if count > acc.1 { (suit, count) } else { acc }
            })
            .0;
        self.suit_estimate(hand, best)
    }
}

impl<R: Rng + Send> BiddingStrategy for SmartBidding<R> {
    fn calculate_bid(&mut self, hand: &Hand, current_bid: u32, is_first_bid: bool) -> u32 {
        let majority = self.likely_trump(hand);

        if is_first_bid {
            let opening = melding_score(hand.cards(), majority, self.rules);
            event!(Level::DEBUG, %majority, opening, "opening bid from meld value");
            return opening;
        }

        let raise = if hand.count_of_suit(majority) >= 6 {
            MAX_SINGLE_RAISE
        } else {
            BID_UNIT
        };

        let ceiling = self
            .suit_estimate(hand, majority)
            .max(self.best_high_card_estimate(hand));

        if current_bid + raise <= ceiling {
            event!(Level::DEBUG, raise, ceiling, current_bid, "raising");
            raise
        } else {
            event!(Level::DEBUG, ceiling, current_bid, "passing at the ceiling");
            0
        }
    }

    fn preferred_trump(&mut self, hand: &Hand) -> Option<Suit> {
        Some(self.likely_trump(hand))
    }
}

#[cfg(test)]
mod tests {
    use super::{BiddingStrategy, RandomBidding, SmartBidding};
    use pinochle_core::bidding::MAX_SINGLE_RAISE;
    use pinochle_core::meld::MeldRules;
    use pinochle_core::model::card::Card;
    use pinochle_core::model::hand::Hand;
    use pinochle_core::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hand(codes: &[&str]) -> Hand {
        Hand::with_cards(codes.iter().map(|code| Card::from_code(code)).collect())
    }

    #[test]
    fn random_bids_stay_on_the_grid() {
        let mut strategy = RandomBidding::new(StdRng::seed_from_u64(11));
        let hand = hand(&["14S", "9H"]);
        for _ in 0..50 {
            let bid = strategy.calculate_bid(&hand, 0, false);
            assert!(bid == 0 || bid == 10 || bid == 20);
            assert!(bid <= MAX_SINGLE_RAISE);
        }
    }

    #[test]
    fn smart_opening_bid_equals_the_majority_suit_meld_value() {
        // Spades dominate and hold a full run: the opening bid is 150.
        let cards = hand(&["14S", "13S", "12S", "11S", "10S", "9H", "9D"]);
        let mut strategy = SmartBidding::new(StdRng::seed_from_u64(1), MeldRules::Original);
        assert_eq!(strategy.calculate_bid(&cards, 0, true), 150);
    }

    #[test]
    fn smart_raise_is_bigger_with_a_long_majority_suit() {
        // Six spades and enough value to stay under the ceiling.
        let cards = hand(&["14S", "13S", "12S", "11S", "10S", "9S", "14H"]);
        let mut strategy = SmartBidding::new(StdRng::seed_from_u64(1), MeldRules::Original);
        let raise = strategy.calculate_bid(&cards, 100, false);
        assert_eq!(raise, 20);
    }

    #[test]
    fn smart_passes_once_the_ceiling_is_reached() {
        let cards = hand(&["9S", "9H", "9D", "9C", "11S"]);
        let mut strategy = SmartBidding::new(StdRng::seed_from_u64(1), MeldRules::Original);
        // A worthless hand cannot justify any later raise.
        assert_eq!(strategy.calculate_bid(&cards, 200, false), 0);
    }

    #[test]
    fn likely_trump_is_the_majority_suit() {
        let cards = hand(&["14H", "13H", "12H", "9S", "9D"]);
        let mut strategy = SmartBidding::new(StdRng::seed_from_u64(1), MeldRules::Original);
        assert_eq!(strategy.likely_trump(&cards), Suit::Hearts);
    }

    #[test]
    fn trump_ties_resolve_within_the_tied_suits() {
        let cards = hand(&["14H", "13H", "14D", "13D", "9S"]);
        let mut strategy = SmartBidding::new(StdRng::seed_from_u64(1), MeldRules::Original);
        for _ in 0..20 {
            let suit = strategy.likely_trump(&cards);
            assert!(suit == Suit::Hearts || suit == Suit::Diamonds);
        }
    }

    #[test]
    fn preferred_trump_matches_the_majority() {
        let cards = hand(&["14C", "13C", "12C", "9H"]);
        let mut strategy = SmartBidding::new(StdRng::seed_from_u64(1), MeldRules::Original);
        assert_eq!(strategy.preferred_trump(&cards), Some(Suit::Clubs));
    }
}
