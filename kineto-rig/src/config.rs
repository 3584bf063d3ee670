//! Calibration baked in from `rig.toml`
//!
//! `build.rs` validates the file and renders it as constants, so a bad
//! calibration fails the build instead of moving a servo.

use kineto_core::config::{ChannelCalibration, MotionTiming, ServoCalibration};

include!(concat!(env!("OUT_DIR"), "/rig_config.rs"));
