use crate::game::events::GameObserver;
use crate::model::player::Seat;
use rand::Rng;
use rand::seq::SliceRandom;

/// Every raise is quoted in this unit.
pub const BID_UNIT: u32 = 10;
/// The most a single turn may add to the bid; larger raises are clamped.
pub const MAX_SINGLE_RAISE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidAction {
    Pass,
    Raise(u32),
}

impl BidAction {
    /// The strategy contract speaks in plain amounts, 0 meaning pass.
    pub const fn from_amount(amount: u32) -> Self {
        if amount == 0 {
            BidAction::Pass
        } else {
            BidAction::Raise(amount)
        }
    }
}

/// How the opening bidder is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningSeat {
    Fixed(Seat),
    Random,
}

impl OpeningSeat {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Seat {
        match self {
            OpeningSeat::Fixed(seat) => seat,
            OpeningSeat::Random => Seat::LOOP.choose(rng).copied().unwrap_or(Seat::North),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidOutcome {
    pub winner: Seat,
    pub bid: u32,
    pub turns: usize,
}

/// Runs the rotating bid/pass protocol for exactly two seats.
///
/// Each turn `decide` is handed the acting seat, the accumulated total and
/// whether any bid has been made yet; a pass (or zero raise) ends the round
/// immediately and the *other* seat wins with the total frozen where it
/// stands. Raises above `MAX_SINGLE_RAISE` are clamped, never trusted.
pub fn run_bidding<F>(opening: Seat, mut decide: F, observer: &mut dyn GameObserver) -> BidOutcome
where
    F: FnMut(Seat, u32, bool) -> BidAction,
{
    let mut total = 0;
    let mut turns = 0;
    let mut is_first_bid = true;
    let mut seat = opening;

    loop {
        let action = decide(seat, total, is_first_bid);
        is_first_bid = false;
        turns += 1;

        match action {
            BidAction::Pass | BidAction::Raise(0) => {
                observer.bid_passed(seat);
                let winner = seat.opponent();
                observer.bidding_finished(winner, total);
                return BidOutcome {
                    winner,
                    bid: total,
                    turns,
                };
            }
            BidAction::Raise(amount) => {
                total += amount.min(MAX_SINGLE_RAISE);
                observer.bid_placed(seat, total);
            }
        }

        seat = seat.opponent();
    }
}
