//! Configuration types
//!
//! Board-agnostic configuration structures. Values are plain data with
//! defaults; the rig firmware overrides them from `rig.toml` at build time.

pub mod gesture;
pub mod motion;
pub mod servo;

pub use gesture::*;
pub use motion::*;
pub use servo::*;
