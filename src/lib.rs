// Library interface for bizwordle
// This allows integration tests to access internal modules

pub mod cli;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod marker;
pub mod search;
pub mod session;
pub mod share;
pub mod tui;

// Re-export commonly used items for easier testing
pub use dataset::{CompanyRecord, EMBEDDED_DATASET, load_dataset_from_file, load_dataset_from_str};
pub use error::{ClipboardError, DatasetError, SessionError};
pub use evaluator::{Field, FieldResult, FieldResults, Hint, evaluate};
pub use game_state::{GameInterface, GameOptions, UserAction, game_loop};
pub use search::{best_candidate, filter_candidates};
pub use session::{DEFAULT_MAX_GUESSES, GameStatus, Session};
pub use share::{Clipboard, TerminalClipboard, share_text};
