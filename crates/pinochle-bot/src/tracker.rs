use pinochle_core::model::card::Card;
use pinochle_core::model::deck::{CARDS_PER_SUIT, COPIES_PER_CARD};
use pinochle_core::model::rank::Rank;
use pinochle_core::model::suit::Suit;

/// Counts what has not hit the table yet. Every suit starts at its full
/// deck complement and every recorded play — by either seat — decrements
/// it; the seen multiset keeps duplicates because two copies of each card
/// exist.
#[derive(Debug, Clone)]
pub struct UnseenTracker {
    remaining: [usize; 4],
    seen: Vec<Card>,
}

impl UnseenTracker {
    pub fn new() -> Self {
        Self {
            remaining: [CARDS_PER_SUIT; 4],
            seen: Vec::new(),
        }
    }

    pub fn record(&mut self, card: Card) {
        let slot = &mut self.remaining[card.suit.index()];
        *slot = slot.saturating_sub(1);
        self.seen.push(card);
    }

    /// Unseen cards of a suit, own hand included.
    pub fn remaining_in_suit(&self, suit: Suit) -> usize {
        self.remaining[suit.index()]
    }

    pub fn seen_copies(&self, card: Card) -> usize {
        self.seen.iter().filter(|&&c| c == card).count()
    }

    /// True when every higher rank of the card's suit has been seen the
    /// full number of times, so nothing left in play can beat it.
    pub fn is_guaranteed_winner(&self, card: Card) -> bool {
        Rank::ORDERED
            .iter()
            .copied()
            .filter(|&rank| rank > card.rank)
            .all(|rank| self.seen_copies(Card::new(rank, card.suit)) >= COPIES_PER_CARD)
    }

    pub fn reset(&mut self) {
        self.remaining = [CARDS_PER_SUIT; 4];
        self.seen.clear();
    }
}

impl Default for UnseenTracker {
    fn default() -> Self {
        Self::new()
    }
}
