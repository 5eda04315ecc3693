mod rules;
mod scoring;

pub use rules::{Meld, MeldRules};
pub use scoring::melding_score;
