use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

impl Play {
    pub const fn new(seat: Seat, card: Card) -> Self {
        Self { seat, card }
    }
}

/// Resolves a completed two-card trick.
///
/// Same suit: higher rank wins. Different suits: trump beats non-trump;
/// with no trump involved the leader wins, because a legal follower that
/// could neither follow suit nor trump cannot take the trick. Legality is
/// enforced upstream and not re-validated here.
pub fn winner(lead: Play, follow: Play, trump: Suit) -> Seat {
    if lead.card.suit == follow.card.suit {
        return if follow.card.rank > lead.card.rank {
            follow.seat
        } else {
            lead.seat
        };
    }

    let lead_is_trump = lead.card.suit == trump;
    let follow_is_trump = follow.card.suit == trump;

    if follow_is_trump && !lead_is_trump {
        follow.seat
    } else {
        lead.seat
    }
}
