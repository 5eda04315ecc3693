use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use rand::Rng;

pub const HAND_SIZE: usize = 12;
pub const CUTTHROAT_HAND_SIZE: usize = 24;

/// Shared round state. Exactly one phase writes to it at a time; phases
/// hand ownership across the session's transition points. Cards only ever
/// move between the containers here, so the deck total is conserved until
/// the round ends.
#[derive(Debug, Clone)]
pub struct RoundContext {
    hands: [Hand; 2],
    stockpile: Vec<Card>,
    discard_pile: Vec<Card>,
    playing_area: Vec<Card>,
    trick_piles: [Vec<Card>; 2],
    played_cards: Vec<Card>,
    trump: Option<Suit>,
    bid: u32,
    bid_winner: Option<Seat>,
    scores: [u32; 2],
}

impl RoundContext {
    /// Deals a fresh round. Scripted cards are pulled from the pack first
    /// (codes naming absent cards were already skipped by the decode
    /// contract), then each hand is filled to twelve with uniform picks.
    /// Whatever the deal leaves over becomes the stockpile.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R, scripted: [&[Card]; 2]) -> Self {
        let mut pack = Deck::pinochle().into_cards();
        let mut hands = [Hand::new(), Hand::new()];

        for seat in Seat::LOOP {
            for &card in scripted[seat.index()] {
                if let Some(position) = pack.iter().position(|&c| c == card) {
                    hands[seat.index()].add(pack.remove(position));
                }
            }
        }

        for seat in Seat::LOOP {
            while hands[seat.index()].len() < HAND_SIZE && !pack.is_empty() {
                let pick = rng.gen_range(0..pack.len());
                hands[seat.index()].add(pack.remove(pick));
            }
        }

        Self {
            hands,
            stockpile: pack,
            discard_pile: Vec::new(),
            playing_area: Vec::new(),
            trick_piles: [Vec::new(), Vec::new()],
            played_cards: Vec::new(),
            trump: None,
            bid: 0,
            bid_winner: None,
            scores: [0; 2],
        }
    }

    #[cfg(test)]
    pub(crate) fn from_hands(hands: [Hand; 2]) -> Self {
        Self {
            hands,
            stockpile: Vec::new(),
            discard_pile: Vec::new(),
            playing_area: Vec::new(),
            trick_piles: [Vec::new(), Vec::new()],
            played_cards: Vec::new(),
            trump: None,
            bid: 0,
            bid_winner: None,
            scores: [0; 2],
        }
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hand_mut(&mut self, seat: Seat) -> &mut Hand {
        &mut self.hands[seat.index()]
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    /// Sets the trump suit once; it is immutable for the rest of the round.
    pub fn set_trump(&mut self, suit: Suit) -> bool {
        if self.trump.is_some() {
            return false;
        }
        self.trump = Some(suit);
        true
    }

    pub fn bid(&self) -> u32 {
        self.bid
    }

    pub fn bid_winner(&self) -> Option<Seat> {
        self.bid_winner
    }

    pub fn set_bid_outcome(&mut self, winner: Seat, bid: u32) {
        self.bid_winner = Some(winner);
        self.bid = bid;
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn set_score(&mut self, seat: Seat, score: u32) {
        self.scores[seat.index()] = score;
    }

    pub fn add_score(&mut self, seat: Seat, points: u32) {
        self.scores[seat.index()] += points;
    }

    pub fn playing_area(&self) -> &[Card] {
        &self.playing_area
    }

    pub fn played_cards(&self) -> &[Card] {
        &self.played_cards
    }

    pub fn trick_pile(&self, seat: Seat) -> &[Card] {
        &self.trick_piles[seat.index()]
    }

    pub fn stockpile(&self) -> &[Card] {
        &self.stockpile
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Moves a card from hand to the playing area, recording it in the
    /// round's played multiset. Returns false if the hand lacks the card.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> bool {
        if !self.hands[seat.index()].remove(card) {
            return false;
        }
        self.playing_area.push(card);
        self.played_cards.push(card);
        true
    }

    /// Drains the completed trick into the winner's pile.
    pub fn collect_trick(&mut self, winner: Seat) {
        self.trick_piles[winner.index()].append(&mut self.playing_area);
    }

    pub fn pop_stockpile(&mut self) -> Option<Card> {
        if self.stockpile.is_empty() {
            None
        } else {
            Some(self.stockpile.remove(0))
        }
    }

    /// Pulls one copy of a specific card out of the stockpile, if present.
    pub fn take_from_stockpile(&mut self, card: Card) -> Option<Card> {
        let position = self.stockpile.iter().position(|&c| c == card)?;
        Some(self.stockpile.remove(position))
    }

    /// Moves a card from hand to the discard pile; absent cards are a no-op.
    pub fn discard_from_hand(&mut self, seat: Seat, card: Card) -> bool {
        if self.hands[seat.index()].remove(card) {
            self.discard_pile.push(card);
            true
        } else {
            false
        }
    }

    /// Cards currently accounted for across every container. Equals the
    /// deck size from the deal until the round is torn down.
    pub fn total_cards(&self) -> usize {
        self.hands.iter().map(Hand::len).sum::<usize>()
            + self.stockpile.len()
            + self.discard_pile.len()
            + self.playing_area.len()
            + self.trick_piles.iter().map(Vec::len).sum::<usize>()
    }
}
