mod legality;
mod winner;

pub use legality::{is_legal_play, legal_plays};
pub use winner::{Play, winner};
