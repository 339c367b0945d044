pub mod conflict;
pub mod session;
pub mod workout;

pub use conflict::{ConflictReport, ConflictingSession};
pub use session::{ExistingSession, Session, SessionStatus};
pub use workout::{ScheduledSession, WorkoutInput};
