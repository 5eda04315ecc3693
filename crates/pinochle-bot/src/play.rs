use crate::tracker::UnseenTracker;
use pinochle_core::game::provider::PlayView;
use pinochle_core::model::card::Card;
use pinochle_core::model::suit::Suit;
use pinochle_core::trick::legal_plays;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{Level, event, warn};

/// Card selection for one seat. `record_played_card` must be fed every
/// play at the table — both seats' — for the opponent-modeling state to
/// stay truthful; `reset` clears it between rounds.
pub trait TrickStrategy: Send {
    /// `None` only when the hand itself is empty.
    fn select_card(&mut self, view: &PlayView<'_>) -> Option<Card>;

    fn record_played_card(&mut self, card: Card);

    fn reset(&mut self);
}

/// Uniform choice over the legal set.
pub struct RandomPlay<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPlay<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> TrickStrategy for RandomPlay<R> {
    fn select_card(&mut self, view: &PlayView<'_>) -> Option<Card> {
        let legal = legal_plays(view.hand, view.playing_area, view.trump);
        match legal.choose(&mut self.rng).copied() {
            Some(card) => Some(card),
            None => fallback_card(view),
        }
    }

    fn record_played_card(&mut self, _card: Card) {}

    fn reset(&mut self) {}
}

/// Counts the table and plays around what is left: cashes value as the
/// bid winner, leads provable winners, pulls trump at the right moments,
/// probes suits the opponent is short in, and otherwise keeps its powder
/// dry.
pub struct SmartPlay {
    tracker: UnseenTracker,
}

impl SmartPlay {
    pub fn new() -> Self {
        Self {
            tracker: UnseenTracker::new(),
        }
    }

    fn select_lead(&self, legal: &[Card], view: &PlayView<'_>) -> Option<Card> {
        // As the bid winner, cash a high card worth keeping the lead for.
        if view.seat == view.bid_winner {
            if let Some(best) = highest_preferring_trump(legal, view.trump) {
                if best.points(view.trump) >= 10 {
                    event!(Level::DEBUG, card = %best, "leading high value as bid winner");
                    return Some(best);
                }
            }
        }

        // A card nothing in play can beat is a free trick.
        if let Some(sure) = legal
            .iter()
            .copied()
            .find(|&card| self.tracker.is_guaranteed_winner(card))
        {
            event!(Level::DEBUG, card = %sure, "leading a guaranteed winner");
            return Some(sure);
        }

        if let Some(trump_lead) = self.strategic_trump_lead(legal, view.trump) {
            event!(Level::DEBUG, card = %trump_lead, "leading trump");
            return Some(trump_lead);
        }

        if let Some(probe) = self.void_suit_probe(legal, view.trump) {
            event!(Level::DEBUG, card = %probe, "probing a short suit");
            return Some(probe);
        }

        lowest_by_rank(legal)
    }

    /// Pull trump when the opponent is nearly out, or bleed it carefully
    /// from a long holding against a live opposing stack.
    fn strategic_trump_lead(&self, legal: &[Card], trump: Suit) -> Option<Card> {
        let mut trumps: Vec<Card> = legal.iter().copied().filter(|c| c.suit == trump).collect();
        if trumps.len() < 2 {
            return None;
        }

        let opponent_trump = self
            .tracker
            .remaining_in_suit(trump)
            .saturating_sub(trumps.len());

        if opponent_trump <= 2 {
            return highest_by_rank(&trumps);
        }

        if trumps.len() >= 4 && opponent_trump >= 3 {
            trumps.sort_by(|a, b| b.rank.cmp(&a.rank));
            return trumps.get(1).copied();
        }

        None
    }

    /// Lead low into a non-trump suit the opponent can barely hold.
    fn void_suit_probe(&self, legal: &[Card], trump: Suit) -> Option<Card> {
        for suit in Suit::ALL {
            if suit == trump {
                continue;
            }
            let ours: Vec<Card> = legal.iter().copied().filter(|c| c.suit == suit).collect();
            if ours.is_empty() {
                continue;
            }
            let opponent_max = self.tracker.remaining_in_suit(suit).saturating_sub(ours.len());
            if opponent_max <= 1 {
                return lowest_by_rank(&ours);
            }
        }
        None
    }

    /// Keep trump back: the best non-trump card, or the cheapest trump
    /// when nothing else is legal.
    fn select_follow(&self, legal: &[Card], trump: Suit) -> Option<Card> {
        let non_trump: Vec<Card> = legal.iter().copied().filter(|c| c.suit != trump).collect();
        if non_trump.is_empty() {
            lowest_by_rank(legal)
        } else {
            highest_by_rank(&non_trump)
        }
    }
}

impl Default for SmartPlay {
    fn default() -> Self {
        Self::new()
    }
}

impl TrickStrategy for SmartPlay {
    fn select_card(&mut self, view: &PlayView<'_>) -> Option<Card> {
        let legal = legal_plays(view.hand, view.playing_area, view.trump);
        if legal.is_empty() {
            return fallback_card(view);
        }

        if view.playing_area.is_empty() {
            self.select_lead(&legal, view)
        } else {
            self.select_follow(&legal, view.trump)
        }
    }

    fn record_played_card(&mut self, card: Card) {
        self.tracker.record(card);
    }

    fn reset(&mut self) {
        self.tracker.reset();
    }
}

/// The legal set is never empty for a non-empty hand; reaching this means
/// the round state is corrupt, so report it and limp along with the first
/// card rather than crash.
fn fallback_card(view: &PlayView<'_>) -> Option<Card> {
    if view.hand.is_empty() {
        warn!(seat = %view.seat, "asked to play from an empty hand");
        return None;
    }
    warn!(seat = %view.seat, "no legal plays found, falling back to the first card");
    view.hand.cards().first().copied()
}

fn highest_by_rank(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().max_by_key(|c| c.rank)
}

fn lowest_by_rank(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().min_by_key(|c| c.rank)
}

/// Highest by rank, preferring trump between equal ranks.
fn highest_preferring_trump(cards: &[Card], trump: Suit) -> Option<Card> {
    cards
        .iter()
        .copied()
        .max_by_key(|c| (c.rank, c.suit == trump))
}
