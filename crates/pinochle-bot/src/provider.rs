use crate::bidding::{BiddingStrategy, RandomBidding, SmartBidding};
use crate::play::{RandomPlay, SmartPlay, TrickStrategy};
use pinochle_core::bidding::BidAction;
use pinochle_core::game::provider::{MoveProvider, PlayView};
use pinochle_core::meld::MeldRules;
use pinochle_core::model::card::Card;
use pinochle_core::model::hand::Hand;
use pinochle_core::model::player::Seat;
use pinochle_core::model::suit::Suit;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The closed set of shipped strategies, chosen at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Random,
    Smart,
}

/// Drives both seats from the shipped strategies: bidding and trick play
/// per seat, trump from the bidder's preference, and every table play fed
/// back into both trackers. Draft decisions stay on their engine defaults
/// (first revealed card, automatic reduction) unless a script overrides
/// them upstream.
pub struct StrategyProvider {
    bidding: [Box<dyn BiddingStrategy>; 2],
    play: [Box<dyn TrickStrategy>; 2],
    rng: StdRng,
}

impl StrategyProvider {
    /// Builds the per-seat strategy stacks from one seed, so a whole game
    /// replays identically for the same configuration.
    pub fn from_kinds(
        bidding_kinds: [StrategyKind; 2],
        play_kinds: [StrategyKind; 2],
        rules: MeldRules,
        seed: u64,
    ) -> Self {
        let mut seeder = StdRng::seed_from_u64(seed);
        let mut next_rng = || StdRng::seed_from_u64(seeder.r#gen());

        let bidding = bidding_kinds.map(|kind| -> Box<dyn BiddingStrategy> {
            match kind {
                StrategyKind::Random => Box::new(RandomBidding::new(next_rng())),
                StrategyKind::Smart => Box::new(SmartBidding::new(next_rng(), rules)),
            }
        });
        let play = play_kinds.map(|kind| -> Box<dyn TrickStrategy> {
            match kind {
                StrategyKind::Random => Box::new(RandomPlay::new(next_rng())),
                StrategyKind::Smart => Box::new(SmartPlay::new()),
            }
        });

        Self {
            bidding,
            play,
            rng: StdRng::seed_from_u64(seeder.r#gen()),
        }
    }
}

impl MoveProvider for StrategyProvider {
    fn bid(&mut self, seat: Seat, hand: &Hand, current_bid: u32, is_first_bid: bool) -> BidAction {
        let amount =
            self.bidding[seat.index()].calculate_bid(hand, current_bid, is_first_bid);
        BidAction::from_amount(amount)
    }

    fn choose_trump(&mut self, seat: Seat, hand: &Hand) -> Suit {
        self.bidding[seat.index()]
            .preferred_trump(hand)
            .unwrap_or_else(|| {
                Suit::ALL
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(Suit::Clubs)
            })
    }

    fn play_card(&mut self, view: &PlayView<'_>) -> Option<Card> {
        self.play[view.seat.index()].select_card(view)
    }

    fn observe_play(&mut self, _seat: Seat, card: Card) {
        for strategy in &mut self.play {
            strategy.record_played_card(card);
        }
    }

    fn begin_round(&mut self) {
        for strategy in &mut self.play {
            strategy.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StrategyKind, StrategyProvider};
    use pinochle_core::bidding::BidAction;
    use pinochle_core::game::provider::MoveProvider;
    use pinochle_core::meld::MeldRules;
    use pinochle_core::model::card::Card;
    use pinochle_core::model::hand::Hand;
    use pinochle_core::model::player::Seat;
    use pinochle_core::model::suit::Suit;

    fn hand(codes: &[&str]) -> Hand {
        Hand::with_cards(codes.iter().map(|code| Card::from_code(code)).collect())
    }

    fn smart_provider() -> StrategyProvider {
        StrategyProvider::from_kinds(
            [StrategyKind::Smart; 2],
            [StrategyKind::Smart; 2],
            MeldRules::Original,
            9,
        )
    }

    #[test]
    fn smart_bidder_opens_at_its_meld_value() {
        let mut provider = smart_provider();
        let cards = hand(&["14S", "13S", "12S", "11S", "10S", "9H"]);
        let action = provider.bid(Seat::North, &cards, 0, true);
        assert_eq!(action, BidAction::Raise(150));
    }

    #[test]
    fn smart_trump_choice_is_the_majority_suit() {
        let mut provider = smart_provider();
        let cards = hand(&["14H", "13H", "12H", "9C"]);
        assert_eq!(provider.choose_trump(Seat::South, &cards), Suit::Hearts);
    }

    #[test]
    fn random_trump_choice_is_reproducible_per_seed() {
        let choose = |seed| {
            let mut provider = StrategyProvider::from_kinds(
                [StrategyKind::Random; 2],
                [StrategyKind::Random; 2],
                MeldRules::Original,
                seed,
            );
            provider.choose_trump(Seat::North, &hand(&["9H"]))
        };
        assert_eq!(choose(4), choose(4));
    }

    #[test]
    fn observed_plays_reach_both_trackers() {
        let mut provider = smart_provider();
        provider.begin_round();
        // Burn both aces of diamonds through the shared observation path,
        // then check that either seat's smart strategy treats the king of
        // diamonds as safe by leading it.
        provider.observe_play(Seat::North, Card::from_code("14D"));
        provider.observe_play(Seat::South, Card::from_code("14D"));

        let cards = hand(&["13D", "12C", "9C"]);
        let view = pinochle_core::game::provider::PlayView {
            seat: Seat::South,
            hand: &cards,
            playing_area: &[],
            trump: Suit::Spades,
            played_cards: &[],
            bid_winner: Seat::North,
            bid: 50,
        };
        assert_eq!(provider.play_card(&view), Some(Card::from_code("13D")));
    }
}
