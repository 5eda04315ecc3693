#![deny(warnings)]
pub mod bidding;
pub mod cutthroat;
pub mod game;
pub mod meld;
pub mod model;
pub mod trick;
