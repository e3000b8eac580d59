//! Board-agnostic core logic for the Amblyon vision trainer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Settings types, field editing and the persisted record framing
//! - Session controller (blink/waiting state machine)
//! - Automatic training orchestrator (staged prompt/pulse sequence)
//! - Settings menu navigation
//! - Key/button command mapping and debouncing
//! - Audio cue track mapping

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod cue;
pub mod input;
pub mod menu;
pub mod pulse;
pub mod session;
pub mod state;
pub mod training;
