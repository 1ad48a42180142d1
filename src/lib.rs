//! Voice Chess Library
//!
//! Play chess against a random-move bot from the terminal, by typing or
//! speaking coordinate moves, with an optional board window.

pub mod asr;
#[cfg(feature = "voice")]
pub mod audio;
pub mod bot;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod input;
pub mod notation;
pub mod session;
pub mod viewer;
