pub mod context;
pub mod events;
pub mod provider;
pub mod session;

pub use context::{CUTTHROAT_HAND_SIZE, HAND_SIZE, RoundContext};
pub use events::{GameObserver, NullObserver};
pub use provider::{MoveProvider, PlayView};
pub use session::{GameError, GamePhase, GameResult, GameSession};
