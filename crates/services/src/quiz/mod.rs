mod flow;
mod progress;
mod result;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::{FlowError, ResultError};
pub use flow::{FlowStep, QuizFlow};
pub use progress::QuizProgress;
pub use result::{QuizOutcome, ResultService};
pub use workflow::QuizFlowService;
