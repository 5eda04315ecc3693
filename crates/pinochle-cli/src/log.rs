use pinochle_core::game::context::RoundContext;
use pinochle_core::game::events::GameObserver;
use pinochle_core::model::card::Card;
use pinochle_core::model::player::Seat;
use pinochle_core::model::suit::Suit;
use std::fmt::Write;

/// Collects display events into the textual round log: the bid result,
/// trump, melding scores, dealt hands, every play in order, the trick
/// winnings and the final outcome. Rendering is deferred so sections come
/// out in reading order regardless of when their data arrived.
#[derive(Debug, Default)]
pub struct GameLog {
    bid_line: String,
    trump_line: String,
    meld_scores: [Option<u32>; 2],
    initial_hands: String,
    plays: String,
    final_scores: Option<[u32; 2]>,
    winners: Vec<Seat>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the melded hands, taken while they are still whole.
    pub fn capture_hands(&mut self, ctx: &RoundContext) {
        let mut text = String::from("Initial Cards:");
        for seat in Seat::LOOP {
            let _ = write!(text, "P{}-{}-", seat.index(), join_cards(ctx.hand(seat).cards()));
        }
        self.initial_hands = text;
    }

    /// Renders the finished log. The trick piles are read off the context,
    /// so call this after the round has been played out.
    pub fn render(&self, ctx: &RoundContext) -> String {
        let mut out = String::new();
        out.push_str(&self.bid_line);
        out.push_str(&self.trump_line);
        if let (Some(north), Some(south)) = (self.meld_scores[0], self.meld_scores[1]) {
            let _ = writeln!(out, "Melding Scores: {north}-{south}");
        }
        out.push_str(&self.initial_hands);
        out.push_str(&self.plays);
        out.push_str("\nTrick Winning: ");
        for seat in Seat::LOOP {
            let _ = write!(out, "P{}:{}-", seat.index(), join_cards(ctx.trick_pile(seat)));
        }
        if let Some(scores) = self.final_scores {
            let _ = write!(out, "\nFinal Score: {},{},", scores[0], scores[1]);
        }
        let winners = self
            .winners
            .iter()
            .map(|seat| seat.index().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(out, "\nWinners: {winners}");
        out
    }
}

fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.code())
        .collect::<Vec<_>>()
        .join(",")
}

impl GameObserver for GameLog {
    fn bidding_finished(&mut self, winner: Seat, total: u32) {
        self.bid_line = format!("Bid:{}-{}\n", winner.index(), total);
    }

    fn trump_selected(&mut self, suit: Suit) {
        self.trump_line = format!("Trump: {suit}\n");
    }

    fn meld_scored(&mut self, seat: Seat, score: u32) {
        self.meld_scores[seat.index()] = Some(score);
    }

    fn trick_started(&mut self, number: usize) {
        let _ = write!(self.plays, "\nRound{number}:");
    }

    fn card_played(&mut self, seat: Seat, card: Card) {
        let _ = write!(self.plays, "P{}-{},", seat.index(), card.code());
    }

    fn round_summary(&mut self, scores: [u32; 2]) {
        self.final_scores = Some(scores);
    }

    fn game_over(&mut self, winners: &[Seat]) {
        self.winners = winners.to_vec();
    }
}
