//! Core domain + application logic for the Shonen Magazine Pocket bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the source
//! site live behind ports (traits) implemented in adapter crates.

pub mod archive;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod pipeline;
pub mod ports;
pub mod utils;

pub use errors::{Error, Result};
