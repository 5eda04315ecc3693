pub mod bidding;
pub mod play;
pub mod provider;
mod tracker;

pub use bidding::{BiddingStrategy, RandomBidding, SmartBidding};
pub use play::{RandomPlay, SmartPlay, TrickStrategy};
pub use provider::{StrategyKind, StrategyProvider};
pub use tracker::UnseenTracker;
