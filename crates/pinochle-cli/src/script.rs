use pinochle_core::bidding::BidAction;
use pinochle_core::game::provider::{MoveProvider, PlayView};
use pinochle_core::model::card::Card;
use pinochle_core::model::hand::Hand;
use pinochle_core::model::player::Seat;
use pinochle_core::model::suit::Suit;
use tracing::warn;

/// One seat's scripted sequences, already decoded from configuration.
#[derive(Debug, Clone, Default)]
pub struct SeatScript {
    pub bids: Vec<u32>,
    pub plays: Vec<String>,
    pub final_keep: Option<Vec<Card>>,
    pub stockpile_pick: Option<Card>,
}

/// Layers scripted decisions over an inner provider: while a seat's script
/// has entries left they are consumed verbatim, then the inner provider
/// takes over. A scripted play naming a card the hand does not hold is
/// surrendered to the engine's clamping rather than crashing the round.
pub struct ScriptedProvider<P> {
    inner: P,
    scripts: [SeatScript; 2],
    bid_cursor: [usize; 2],
    play_cursor: [usize; 2],
}

impl<P> ScriptedProvider<P> {
    pub fn new(inner: P, scripts: [SeatScript; 2]) -> Self {
        Self {
            inner,
            scripts,
            bid_cursor: [0; 2],
            play_cursor: [0; 2],
        }
    }
}

impl<P: MoveProvider> MoveProvider for ScriptedProvider<P> {
    fn bid(&mut self, seat: Seat, hand: &Hand, current_bid: u32, is_first_bid: bool) -> BidAction {
        let cursor = &mut self.bid_cursor[seat.index()];
        if let Some(&amount) = self.scripts[seat.index()].bids.get(*cursor) {
            *cursor += 1;
            return BidAction::from_amount(amount);
        }
        self.inner.bid(seat, hand, current_bid, is_first_bid)
    }

    fn choose_trump(&mut self, seat: Seat, hand: &Hand) -> Suit {
        self.inner.choose_trump(seat, hand)
    }

    fn play_card(&mut self, view: &PlayView<'_>) -> Option<Card> {
        let seat = view.seat;
        let cursor = &mut self.play_cursor[seat.index()];
        if let Some(token) = self.scripts[seat.index()].plays.get(*cursor) {
            *cursor += 1;
            match view.hand.find_by_code(token) {
                Some(card) => return Some(card),
                None => {
                    warn!(%seat, %token, "scripted play names a card not in hand");
                    return None;
                }
            }
        }
        self.inner.play_card(view)
    }

    fn pick_stockpile(&mut self, seat: Seat, face_up: &[Card]) -> Option<Card> {
        if let Some(pick) = self.scripts[seat.index()].stockpile_pick {
            if face_up.contains(&pick) {
                return Some(pick);
            }
            warn!(%seat, %pick, "scripted stockpile pick is not face-up");
        }
        self.inner.pick_stockpile(seat, face_up)
    }

    fn keep_cards(&mut self, seat: Seat, hand: &Hand, trump: Suit) -> Option<Vec<Card>> {
        if let Some(keep) = self.scripts[seat.index()].final_keep.clone() {
            return Some(keep);
        }
        self.inner.keep_cards(seat, hand, trump)
    }

    fn observe_play(&mut self, seat: Seat, card: Card) {
        self.inner.observe_play(seat, card);
    }

    fn begin_round(&mut self) {
        self.inner.begin_round();
    }
}

#[cfg(test)]
mod tests {
    use super::{ScriptedProvider, SeatScript};
    use pinochle_core::bidding::BidAction;
    use pinochle_core::game::provider::{MoveProvider, PlayView};
    use pinochle_core::model::card::Card;
    use pinochle_core::model::hand::Hand;
    use pinochle_core::model::player::Seat;
    use pinochle_core::model::suit::Suit;

    /// Inner provider with fixed answers, to see when the script defers.
    struct Fixed;

    impl MoveProvider for Fixed {
        fn bid(&mut self, _seat: Seat, _hand: &Hand, _bid: u32, _first: bool) -> BidAction {
            BidAction::Raise(10)
        }
        fn choose_trump(&mut self, _seat: Seat, _hand: &Hand) -> Suit {
            Suit::Diamonds
        }
        fn play_card(&mut self, view: &PlayView<'_>) -> Option<Card> {
            view.hand.cards().last().copied()
        }
    }

    fn hand(codes: &[&str]) -> Hand {
        Hand::with_cards(codes.iter().map(|code| Card::from_code(code)).collect())
    }

    fn view<'a>(hand: &'a Hand) -> PlayView<'a> {
        PlayView {
            seat: Seat::North,
            hand,
            playing_area: &[],
            trump: Suit::Spades,
            played_cards: &[],
            bid_winner: Seat::North,
            bid: 0,
        }
    }

    #[test]
    fn scripted_bids_run_out_then_defer() {
        let scripts = [
            SeatScript {
                bids: vec![20, 0],
                ..SeatScript::default()
            },
            SeatScript::default(),
        ];
        let mut provider = ScriptedProvider::new(Fixed, scripts);
        let cards = hand(&["9H"]);
        assert_eq!(
            provider.bid(Seat::North, &cards, 0, true),
            BidAction::Raise(20)
        );
        assert_eq!(provider.bid(Seat::North, &cards, 20, false), BidAction::Pass);
        // Script exhausted: the inner provider answers.
        assert_eq!(
            provider.bid(Seat::North, &cards, 20, false),
            BidAction::Raise(10)
        );
        // The other seat never had a script.
        assert_eq!(
            provider.bid(Seat::South, &cards, 0, false),
            BidAction::Raise(10)
        );
    }

    #[test]
    fn scripted_plays_consume_in_order() {
        let scripts = [
            SeatScript {
                plays: vec!["9H".to_string(), "14S".to_string()],
                ..SeatScript::default()
            },
            SeatScript::default(),
        ];
        let mut provider = ScriptedProvider::new(Fixed, scripts);
        let cards = hand(&["14S", "9H", "10D"]);
        assert_eq!(provider.play_card(&view(&cards)), Some(Card::from_code("9H")));
        assert_eq!(
            provider.play_card(&view(&cards)),
            Some(Card::from_code("14S"))
        );
        // Exhausted: the inner provider picks the hand's last card.
        assert_eq!(
            provider.play_card(&view(&cards)),
            Some(Card::from_code("10D"))
        );
    }

    #[test]
    fn scripted_play_for_an_absent_card_yields_none() {
        let scripts = [
            SeatScript {
                plays: vec!["14C".to_string()],
                ..SeatScript::default()
            },
            SeatScript::default(),
        ];
        let mut provider = ScriptedProvider::new(Fixed, scripts);
        let cards = hand(&["9H"]);
        // The token is consumed and the engine is left to clamp the turn.
        assert_eq!(provider.play_card(&view(&cards)), None);
        assert_eq!(provider.play_card(&view(&cards)), Some(Card::from_code("9H")));
    }

    #[test]
    fn stockpile_pick_must_be_face_up() {
        let scripts = [
            SeatScript {
                stockpile_pick: Some(Card::from_code("14H")),
                ..SeatScript::default()
            },
            SeatScript::default(),
        ];
        let mut provider = ScriptedProvider::new(Fixed, scripts);
        let face_up = [Card::from_code("14H"), Card::from_code("9C")];
        assert_eq!(
            provider.pick_stockpile(Seat::North, &face_up),
            Some(Card::from_code("14H"))
        );
        let other = [Card::from_code("10D"), Card::from_code("9C")];
        assert_eq!(provider.pick_stockpile(Seat::North, &other), None);
    }
}
