//! Motion sequencing
//!
//! Commands select a motion based on the current pose, motions expand into
//! bounded plans of timed servo moves, and the executor walks the plan while
//! watching for a home request at each checkpoint.

pub mod executor;
pub mod plan;
pub mod router;
pub mod state;

pub use executor::{MotionSequencer, Outcome};
pub use plan::{plan_for, Plan, Step, MAX_PLAN_STEPS, MAX_RAMP_STEPS};
pub use router::{route, CommandBacklog, Dispatch, Route, BACKLOG_SIZE};
pub use state::{select_motion, Motion, Pose, SequencerState};
