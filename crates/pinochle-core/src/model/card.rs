use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Trick points this card is worth, honoring the trump-nine bonus.
    pub fn points(self, trump: Suit) -> u32 {
        if self.rank == Rank::Nine && self.suit == trump {
            Rank::TRUMP_NINE_POINTS
        } else {
            self.rank.points()
        }
    }

    /// Textual card code, e.g. `"14S"` for the ace of spades.
    pub fn code(self) -> String {
        self.to_string()
    }

    /// Decodes a card code. Decoding never fails: an unparseable rank falls
    /// back to the ace and an unrecognized suit falls back to clubs, so
    /// scripted inputs degrade to a lookup miss instead of an error.
    pub fn from_code(code: &str) -> Self {
        let suit = code
            .chars()
            .next_back()
            .and_then(Suit::from_shorthand)
            .unwrap_or(Suit::Clubs);
        let rank = code
            .get(..code.len().saturating_sub(1))
            .filter(|prefix| !prefix.is_empty())
            .and_then(|prefix| prefix.parse::<u8>().ok())
            .and_then(Rank::from_value)
            .unwrap_or(Rank::Ace);
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
