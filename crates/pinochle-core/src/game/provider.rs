use crate::bidding::BidAction;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::Suit;

/// Everything a card-selection decision may look at.
#[derive(Debug, Clone, Copy)]
pub struct PlayView<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub playing_area: &'a [Card],
    pub trump: Suit,
    pub played_cards: &'a [Card],
    pub bid_winner: Seat,
    pub bid: u32,
}

/// The synchronous decision boundary between the engine and whoever is
/// supplying moves — a strategy stack, a script, or an interactive front
/// end. The engine issues a request and logically blocks on the response;
/// there is no polling. Every response is validated and clamped by the
/// engine, so a provider cannot corrupt a round.
pub trait MoveProvider {
    /// A bid decision; `BidAction::Pass` ends the auction.
    fn bid(&mut self, seat: Seat, hand: &Hand, current_bid: u32, is_first_bid: bool) -> BidAction;

    /// The bid winner's trump choice.
    fn choose_trump(&mut self, seat: Seat, hand: &Hand) -> Suit;

    /// A card for the current turn; `None` means nothing to play.
    fn play_card(&mut self, view: &PlayView<'_>) -> Option<Card>;

    /// The bid winner's pick among the revealed stockpile cards.
    /// `None` falls back to the first revealed card.
    fn pick_stockpile(&mut self, _seat: Seat, _face_up: &[Card]) -> Option<Card> {
        None
    }

    /// The cards to keep when reducing an oversized draft hand. `None`
    /// (or an invalid selection) falls back to the automatic discard rule.
    fn keep_cards(&mut self, _seat: Seat, _hand: &Hand, _trump: Suit) -> Option<Vec<Card>> {
        None
    }

    /// Notification that a card hit the table, for opponent-modeling state.
    fn observe_play(&mut self, _seat: Seat, _card: Card) {}

    /// Called once before trick play so per-round state can reset.
    fn begin_round(&mut self) {}
}
