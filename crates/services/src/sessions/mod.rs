mod service;
mod state;
mod summary;
mod view;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::QuizError;
pub use service::QuizSession;
pub use state::{QuizAction, QuizPhase};
pub use summary::QuizSummary;
pub use view::QuizView;
pub use workflow::{QuizLoop, QuizService};
