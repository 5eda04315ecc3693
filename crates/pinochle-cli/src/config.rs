use pinochle_core::meld::MeldRules;
use pinochle_core::model::card::Card;
use pinochle_core::model::suit::Suit;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The fixed seed used when a configuration names none, so bare runs stay
/// reproducible.
pub const DEFAULT_SEED: u64 = 30008;

/// Root game configuration loaded from YAML. Scripted sequences keep their
/// textual comma-separated form; parsing is lossy by contract — entries
/// that do not decode are skipped, never fatal.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u64,
    pub cutthroat: bool,
    pub extended_melds: bool,
    pub bid_order: BidOrder,
    /// Scripted trump suit shorthand; empty means the bid winner chooses.
    pub trump: String,
    pub seats: [SeatConfig; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            cutthroat: false,
            extended_melds: false,
            bid_order: BidOrder::default(),
            trump: String::new(),
            seats: [SeatConfig::default(), SeatConfig::default()],
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let cfg: GameConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.trump.is_empty() && self.trump_suit().is_none() {
            return Err(ConfigError::Invalid {
                field: "trump".to_string(),
                message: format!("'{}' is not a suit shorthand (S, H, D or C)", self.trump),
            });
        }
        Ok(())
    }

    pub fn trump_suit(&self) -> Option<Suit> {
        let mut chars = self.trump.chars();
        let symbol = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Suit::from_shorthand(symbol)
    }

    pub fn rules(&self) -> MeldRules {
        if self.extended_melds {
            MeldRules::Extended
        } else {
            MeldRules::Original
        }
    }
}

/// Who opens the auction.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BidOrder {
    North,
    South,
    #[default]
    Random,
}

/// The closed strategy choice per seat and concern.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyChoice {
    #[default]
    Random,
    Smart,
}

/// Per-seat settings: strategy kinds plus the scripted sequences.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SeatConfig {
    pub bidding: StrategyChoice,
    pub play: StrategyChoice,
    /// Comma-separated raise amounts; unparsable entries are skipped.
    pub bids: String,
    /// Comma-separated card codes dealt to this seat before the random fill.
    pub initial_cards: String,
    /// Comma-separated, dash-joined turn tokens; the first dash segment of
    /// each entry names the card to play.
    pub cards_played: String,
    /// Cutthroat: card codes moved from the stockpile into this hand.
    pub extra_cards: String,
    /// Cutthroat: the exact twelve card codes to keep after the draft.
    pub final_cards: String,
    /// Cutthroat: preferred face-up stockpile card for the bid winner.
    pub stockpile_pick: String,
}

impl SeatConfig {
    pub fn scripted_bids(&self) -> Vec<u32> {
        self.bids
            .split(',')
            .filter_map(|entry| entry.trim().parse::<u32>().ok())
            .collect()
    }

    pub fn initial_cards(&self) -> Vec<Card> {
        parse_card_list(&self.initial_cards)
    }

    pub fn extra_cards(&self) -> Vec<Card> {
        parse_card_list(&self.extra_cards)
    }

    pub fn final_cards(&self) -> Option<Vec<Card>> {
        let cards = parse_card_list(&self.final_cards);
        if cards.is_empty() { None } else { Some(cards) }
    }

    pub fn play_tokens(&self) -> Vec<String> {
        self.cards_played
            .split(',')
            .map(|entry| {
                entry
                    .trim()
                    .split('-')
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
            .filter(|token| !token.is_empty())
            .collect()
    }

    pub fn stockpile_pick(&self) -> Option<Card> {
        let code = self.stockpile_pick.trim();
        if code.len() <= 1 {
            None
        } else {
            Some(Card::from_code(code))
        }
    }
}

/// Entries shorter than a full code (including empties from a bare comma)
/// cannot name a card and are dropped; the rest go through the lossy
/// decode.
fn parse_card_list(text: &str) -> Vec<Card> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| entry.len() > 1)
        .map(Card::from_code)
        .collect()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}
