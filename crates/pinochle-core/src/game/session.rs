use crate::bidding::{BidOutcome, run_bidding};
use crate::cutthroat;
use crate::game::context::RoundContext;
use crate::game::events::GameObserver;
use crate::game::provider::{MoveProvider, PlayView};
use crate::meld::{MeldRules, melding_score};
use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::trick::{Play, legal_plays, winner};
use core::fmt;

/// The phases a round moves through. The session enforces the order; the
/// orchestrator that sequences them lives outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Bidding,
    TrumpSelection,
    Draft,
    Melding,
    TrickTaking,
    GameOver,
    Complete,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GamePhase::Bidding => "bidding",
            GamePhase::TrumpSelection => "trump selection",
            GamePhase::Draft => "draft",
            GamePhase::Melding => "melding",
            GamePhase::TrickTaking => "trick taking",
            GamePhase::GameOver => "game over",
            GamePhase::Complete => "complete",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    OutOfPhase {
        expected: GamePhase,
        actual: GamePhase,
    },
    BiddingIncomplete,
    TrumpNotSet,
    NothingToPlay(Seat),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfPhase { expected, actual } => {
                write!(f, "expected the {expected} phase but the round is in {actual}")
            }
            GameError::BiddingIncomplete => write!(f, "no bid winner has been decided"),
            GameError::TrumpNotSet => write!(f, "no trump suit has been selected"),
            GameError::NothingToPlay(seat) => write!(f, "{seat} has no cards left to play"),
        }
    }
}

impl std::error::Error for GameError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub scores: [u32; 2],
    pub winners: Vec<Seat>,
}

/// Owns the round state and exposes exactly one operation per phase.
/// Decisions come in through a [`MoveProvider`], display events go out
/// through a [`GameObserver`]; the session itself never blocks on anything
/// but those synchronous calls.
#[derive(Debug)]
pub struct GameSession {
    context: RoundContext,
    rules: MeldRules,
    cutthroat: bool,
    phase: GamePhase,
}

impl GameSession {
    pub fn new(context: RoundContext, rules: MeldRules, cutthroat: bool) -> Self {
        Self {
            context,
            rules,
            cutthroat,
            phase: GamePhase::Bidding,
        }
    }

    pub fn context(&self) -> &RoundContext {
        &self.context
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn rules(&self) -> MeldRules {
        self.rules
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::OutOfPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Runs the auction and freezes its outcome into the round state.
    pub fn run_bidding(
        &mut self,
        opening: Seat,
        provider: &mut dyn MoveProvider,
        observer: &mut dyn GameObserver,
    ) -> Result<BidOutcome, GameError> {
        self.expect_phase(GamePhase::Bidding)?;

        let context = &self.context;
        let outcome = run_bidding(
            opening,
            |seat, current_bid, is_first_bid| {
                provider.bid(seat, context.hand(seat), current_bid, is_first_bid)
            },
            observer,
        );

        self.context.set_bid_outcome(outcome.winner, outcome.bid);
        self.phase = GamePhase::TrumpSelection;
        Ok(outcome)
    }

    /// Fixes the trump suit, either from a scripted choice or by asking the
    /// bid winner's provider. The suit is immutable afterwards.
    pub fn select_trump(
        &mut self,
        scripted: Option<Suit>,
        provider: &mut dyn MoveProvider,
        observer: &mut dyn GameObserver,
    ) -> Result<Suit, GameError> {
        self.expect_phase(GamePhase::TrumpSelection)?;
        let chooser = self.context.bid_winner().ok_or(GameError::BiddingIncomplete)?;

        let suit = match scripted {
            Some(suit) => suit,
            None => provider.choose_trump(chooser, self.context.hand(chooser)),
        };
        self.context.set_trump(suit);
        observer.trump_selected(suit);

        self.phase = if self.cutthroat {
            GamePhase::Draft
        } else {
            GamePhase::Melding
        };
        Ok(suit)
    }

    /// The cutthroat stockpile draft and hand reduction. Only reachable
    /// when the session was built with the mode enabled.
    pub fn run_draft(
        &mut self,
        extras: [&[Card]; 2],
        provider: &mut dyn MoveProvider,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Draft)?;
        cutthroat::run_draft(&mut self.context, extras, provider)?;
        self.phase = GamePhase::Melding;
        Ok(())
    }

    /// Scores both hands against the meld table for the selected trump.
    pub fn score_melds(
        &mut self,
        observer: &mut dyn GameObserver,
    ) -> Result<[u32; 2], GameError> {
        self.expect_phase(GamePhase::Melding)?;
        let trump = self.context.trump().ok_or(GameError::TrumpNotSet)?;

        for seat in Seat::LOOP {
            let score = melding_score(self.context.hand(seat).cards(), trump, self.rules);
            self.context.set_score(seat, score);
            observer.meld_scored(seat, score);
        }

        self.phase = GamePhase::TrickTaking;
        Ok(self.context.scores())
    }

    /// Plays the round out: the bid winner leads the first trick, each
    /// trick winner leads the next, and the trick piles are converted to
    /// points at the end (with the bid winner zeroed on a shortfall).
    pub fn play_tricks(
        &mut self,
        provider: &mut dyn MoveProvider,
        observer: &mut dyn GameObserver,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::TrickTaking)?;
        let trump = self.context.trump().ok_or(GameError::TrumpNotSet)?;
        let bid_winner = self.context.bid_winner().ok_or(GameError::BiddingIncomplete)?;

        provider.begin_round();

        let mut leader = bid_winner;
        let tricks = self.context.hand(leader).len();
        for number in 0..tricks {
            observer.trick_started(number);

            let lead_card = self.request_play(leader, trump, bid_winner, provider, observer)?;
            let follower = leader.opponent();
            let follow_card = self.request_play(follower, trump, bid_winner, provider, observer)?;

            let taken_by = winner(
                Play::new(leader, lead_card),
                Play::new(follower, follow_card),
                trump,
            );
            self.context.collect_trick(taken_by);
            observer.trick_won(taken_by);
            leader = taken_by;
        }

        self.apply_trick_points(trump, bid_winner);
        observer.round_summary(self.context.scores());
        self.phase = GamePhase::GameOver;
        Ok(())
    }

    /// Declares the winners: every seat holding the maximum score.
    pub fn finish(&mut self, observer: &mut dyn GameObserver) -> Result<GameResult, GameError> {
        self.expect_phase(GamePhase::GameOver)?;

        let scores = self.context.scores();
        let best = scores.iter().copied().max().unwrap_or(0);
        let winners: Vec<Seat> = Seat::LOOP
            .iter()
            .copied()
            .filter(|seat| scores[seat.index()] == best)
            .collect();

        observer.game_over(&winners);
        self.phase = GamePhase::Complete;
        Ok(GameResult { scores, winners })
    }

    /// Asks the provider for one play and clamps the answer: a response
    /// outside the legal set falls back to the first legal card, and an
    /// empty hand is a corrupted round, reported as an error.
    fn request_play(
        &mut self,
        seat: Seat,
        trump: Suit,
        bid_winner: Seat,
        provider: &mut dyn MoveProvider,
        observer: &mut dyn GameObserver,
    ) -> Result<Card, GameError> {
        let candidate = {
            let view = PlayView {
                seat,
                hand: self.context.hand(seat),
                playing_area: self.context.playing_area(),
                trump,
                played_cards: self.context.played_cards(),
                bid_winner,
                bid: self.context.bid(),
            };
            provider.play_card(&view)
        };

        let hand = self.context.hand(seat);
        let fallback = hand
            .cards()
            .first()
            .copied()
            .ok_or(GameError::NothingToPlay(seat))?;
        let legal = legal_plays(hand, self.context.playing_area(), trump);
        let chosen = match candidate {
            Some(card) if legal.contains(&card) => card,
            _ => legal.first().copied().unwrap_or(fallback),
        };

        self.context.play_card(seat, chosen);
        observer.card_played(seat, chosen);
        provider.observe_play(seat, chosen);
        Ok(chosen)
    }

    fn apply_trick_points(&mut self, trump: Suit, bid_winner: Seat) {
        let bid = self.context.bid();
        for seat in Seat::LOOP {
            let points: u32 = self
                .context
                .trick_pile(seat)
                .iter()
                .map(|card| card.points(trump))
                .sum();
            self.context.add_score(seat, points);
            if seat == bid_winner && self.context.scores()[seat.index()] < bid {
                self.context.set_score(seat, 0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GameError, GamePhase, GameSession};
    use crate::bidding::BidAction;
    use crate::game::context::RoundContext;
    use crate::game::events::NullObserver;
    use crate::game::provider::{MoveProvider, PlayView};
    use crate::meld::MeldRules;
    use crate::model::card::Card;
    use crate::model::deck::DECK_SIZE;
    use crate::model::hand::Hand;
    use crate::model::player::Seat;
    use crate::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Raises a fixed number of times, then passes; always plays the first
    /// legal card and keeps whatever trump it is asked for.
    struct FirstLegal {
        raises: u32,
    }

    impl MoveProvider for FirstLegal {
        fn bid(&mut self, _seat: Seat, _hand: &Hand, _bid: u32, _first: bool) -> BidAction {
            if self.raises == 0 {
                BidAction::Pass
            } else {
                self.raises -= 1;
                BidAction::Raise(10)
            }
        }

        fn choose_trump(&mut self, _seat: Seat, _hand: &Hand) -> Suit {
            Suit::Clubs
        }

        fn play_card(&mut self, view: &PlayView<'_>) -> Option<Card> {
            view.hand.cards().first().copied()
        }
    }

    fn session() -> GameSession {
        let mut rng = StdRng::seed_from_u64(30008);
        let context = RoundContext::deal(&mut rng, [&[], &[]]);
        GameSession::new(context, MeldRules::Original, false)
    }

    #[test]
    fn phases_must_run_in_order() {
        let mut session = session();
        let mut provider = FirstLegal { raises: 1 };
        assert!(matches!(
            session.score_melds(&mut NullObserver),
            Err(GameError::OutOfPhase { .. })
        ));
        session
            .run_bidding(Seat::North, &mut provider, &mut NullObserver)
            .unwrap();
        assert_eq!(session.phase(), GamePhase::TrumpSelection);
        assert!(matches!(
            session.run_bidding(Seat::North, &mut provider, &mut NullObserver),
            Err(GameError::OutOfPhase { .. })
        ));
    }

    #[test]
    fn draft_phase_is_skipped_outside_cutthroat() {
        let mut session = session();
        let mut provider = FirstLegal { raises: 0 };
        session
            .run_bidding(Seat::North, &mut provider, &mut NullObserver)
            .unwrap();
        session
            .select_trump(Some(Suit::Spades), &mut provider, &mut NullObserver)
            .unwrap();
        assert_eq!(session.phase(), GamePhase::Melding);
        assert!(matches!(
            session.run_draft([&[], &[]], &mut provider),
            Err(GameError::OutOfPhase { .. })
        ));
    }

    #[test]
    fn a_full_round_plays_to_completion() {
        let mut session = session();
        let mut provider = FirstLegal { raises: 2 };
        let mut observer = NullObserver;

        let outcome = session
            .run_bidding(Seat::North, &mut provider, &mut observer)
            .unwrap();
        assert_eq!(outcome.bid, 20);

        session
            .select_trump(None, &mut provider, &mut observer)
            .unwrap();
        session.score_melds(&mut observer).unwrap();
        session.play_tricks(&mut provider, &mut observer).unwrap();

        let result = session.finish(&mut observer).unwrap();
        assert!(!result.winners.is_empty());

        // Every dealt card was either played into a trick pile or left in
        // the stockpile; nothing vanished.
        let ctx = session.context();
        assert_eq!(ctx.total_cards(), DECK_SIZE);
        for seat in Seat::LOOP {
            assert!(ctx.hand(seat).is_empty());
        }
        assert_eq!(ctx.played_cards().len(), 24);
    }

    #[test]
    fn bid_winner_is_zeroed_on_a_shortfall() {
        // Force an enormous bid the winner cannot cover.
        struct BigBidder {
            turns: u32,
        }
        impl MoveProvider for BigBidder {
            fn bid(&mut self, _seat: Seat, _hand: &Hand, _bid: u32, _first: bool) -> BidAction {
                if self.turns == 0 {
                    BidAction::Pass
                } else {
                    self.turns -= 1;
                    BidAction::Raise(20)
                }
            }
            fn choose_trump(&mut self, _seat: Seat, _hand: &Hand) -> Suit {
                Suit::Clubs
            }
            fn play_card(&mut self, view: &PlayView<'_>) -> Option<Card> {
                view.hand.cards().first().copied()
            }
        }

        let mut session = session();
        let mut provider = BigBidder { turns: 60 };
        let mut observer = NullObserver;
        let outcome = session
            .run_bidding(Seat::North, &mut provider, &mut observer)
            .unwrap();
        assert_eq!(outcome.bid, 1200);

        session
            .select_trump(Some(Suit::Hearts), &mut provider, &mut observer)
            .unwrap();
        session.score_melds(&mut observer).unwrap();
        session.play_tricks(&mut provider, &mut observer).unwrap();
        let result = session.finish(&mut observer).unwrap();

        // 1200 points cannot be reached in one round, so the bid winner
        // ends at zero and the opponent is among the winners.
        assert_eq!(result.scores[outcome.winner.index()], 0);
        assert!(result.winners.contains(&outcome.winner.opponent()));
    }
}
