use crate::config::{BidOrder, GameConfig, StrategyChoice};
use crate::log::GameLog;
use crate::script::{ScriptedProvider, SeatScript};
use anyhow::Result;
use pinochle_bot::{StrategyKind, StrategyProvider};
use pinochle_core::bidding::OpeningSeat;
use pinochle_core::game::context::RoundContext;
use pinochle_core::game::session::GameSession;
use pinochle_core::model::card::Card;
use pinochle_core::model::player::Seat;
use pinochle_core::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Everything a finished game reports back.
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub seed: u64,
    pub bid_winner: Seat,
    pub bid: u32,
    pub trump: Suit,
    pub scores: [u32; 2],
    pub winners: Vec<Seat>,
    pub log: String,
}

/// Plays one complete game for a configuration and seed: deal, bidding,
/// trump, the optional draft, melding, trick taking, and the final tally.
/// This is the orchestration loop; every rule lives in the core.
pub fn run_game(config: &GameConfig, seed: u64) -> Result<RoundReport> {
    let mut rng = StdRng::seed_from_u64(seed);

    let initial: [Vec<Card>; 2] = [
        config.seats[0].initial_cards(),
        config.seats[1].initial_cards(),
    ];
    let context = RoundContext::deal(&mut rng, [initial[0].as_slice(), initial[1].as_slice()]);
    let mut session = GameSession::new(context, config.rules(), config.cutthroat);

    let strategies = StrategyProvider::from_kinds(
        [
            strategy_kind(config.seats[0].bidding),
            strategy_kind(config.seats[1].bidding),
        ],
        [
            strategy_kind(config.seats[0].play),
            strategy_kind(config.seats[1].play),
        ],
        config.rules(),
        seed,
    );
    let scripts = [seat_script(config, Seat::North), seat_script(config, Seat::South)];
    let mut provider = ScriptedProvider::new(strategies, scripts);
    let mut log = GameLog::new();

    let opening = match config.bid_order {
        BidOrder::North => OpeningSeat::Fixed(Seat::North),
        BidOrder::South => OpeningSeat::Fixed(Seat::South),
        BidOrder::Random => OpeningSeat::Random,
    }
    .resolve(&mut rng);

    let outcome = session.run_bidding(opening, &mut provider, &mut log)?;
    let trump = session.select_trump(config.trump_suit(), &mut provider, &mut log)?;

    if config.cutthroat {
        let extras: [Vec<Card>; 2] = [
            config.seats[0].extra_cards(),
            config.seats[1].extra_cards(),
        ];
        session.run_draft([extras[0].as_slice(), extras[1].as_slice()], &mut provider)?;
    }

    session.score_melds(&mut log)?;
    log.capture_hands(session.context());
    session.play_tricks(&mut provider, &mut log)?;
    let result = session.finish(&mut log)?;

    Ok(RoundReport {
        seed,
        bid_winner: outcome.winner,
        bid: outcome.bid,
        trump,
        scores: result.scores,
        winners: result.winners,
        log: log.render(session.context()),
    })
}

fn strategy_kind(choice: StrategyChoice) -> StrategyKind {
    match choice {
        StrategyChoice::Random => StrategyKind::Random,
        StrategyChoice::Smart => StrategyKind::Smart,
    }
}

fn seat_script(config: &GameConfig, seat: Seat) -> SeatScript {
    let seat_config = &config.seats[seat.index()];
    SeatScript {
        bids: seat_config.scripted_bids(),
        plays: seat_config.play_tokens(),
        final_keep: seat_config.final_cards(),
        stockpile_pick: seat_config.stockpile_pick(),
    }
}
