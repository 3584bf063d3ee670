//! Board-agnostic core logic for the Kineto servo rig
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Wraparound-tolerant tick arithmetic
//! - Button input pipeline (debounce, gesture classification)
//! - Motion sequencer (pose tracking, plans, preemptible execution)
//! - Command routing and link supervision
//! - Hardware abstraction traits (servo driver, preemption source)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod link;
pub mod sequencer;
pub mod time;
pub mod traits;
