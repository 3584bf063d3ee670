//! Hardware abstraction traits
//!
//! These traits define the interface between the sequencing logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod preempt;
pub mod source;

pub use actuator::{ActuatorDriver, Channel};
pub use preempt::{NeverPreempt, PreemptionSource};
pub use source::CommandSource;
