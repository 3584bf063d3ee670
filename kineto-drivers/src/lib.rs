//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kineto-core on top of the `embedded-hal` interfaces:
//!
//! - Hobby servos on PWM channels (`SetDutyCycle`)
//! - The two-contact button sense lines (`InputPin` + async `Wait`)

#![no_std]
#![deny(unsafe_code)]

pub mod sense;
pub mod servo;
