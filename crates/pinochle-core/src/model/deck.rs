use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Two copies of every rank/suit pair.
pub const DECK_SIZE: usize = 48;
pub const CARDS_PER_SUIT: usize = 12;
pub const COPIES_PER_CARD: usize = 2;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn pinochle() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for _ in 0..COPIES_PER_CARD {
            for suit in Suit::ALL.iter().copied() {
                for rank in Rank::ORDERED.iter().copied() {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::pinochle();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}
