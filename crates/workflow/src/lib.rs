//! Workflow engine — the send/compose state machine and operator actions.
//!
//! An agent send appends the typed reply immediately, then schedules a
//! composed follow-up that lands after a fixed delay. The delay stands in for
//! an external response-generation service; scheduled replies cannot be
//! cancelled and always land.

pub mod draft;
pub mod scheduler;
pub mod session;

pub use draft::Draft;
pub use scheduler::{ReplyScheduler, ScheduledReply, SchedulerSettings, SchedulerState};
pub use session::ConsoleSession;
