use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;

/// Hooks for external renderers and loggers. Every hook defaults to a
/// no-op so observers implement only what they display.
pub trait GameObserver {
    fn bid_placed(&mut self, _seat: Seat, _new_total: u32) {}
    fn bid_passed(&mut self, _seat: Seat) {}
    fn bidding_finished(&mut self, _winner: Seat, _total: u32) {}
    fn trump_selected(&mut self, _suit: Suit) {}
    fn meld_scored(&mut self, _seat: Seat, _score: u32) {}
    fn trick_started(&mut self, _number: usize) {}
    fn card_played(&mut self, _seat: Seat, _card: Card) {}
    fn trick_won(&mut self, _seat: Seat) {}
    fn round_summary(&mut self, _scores: [u32; 2]) {}
    fn game_over(&mut self, _winners: &[Seat]) {}
}

/// Observer that swallows every event.
pub struct NullObserver;

impl GameObserver for NullObserver {}
