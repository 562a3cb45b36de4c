//! Subcommand handlers.
//!
//! Each handler takes the resolved configuration layers and returns the text
//! to print, so `main` owns stdout.

pub mod checkout;
pub mod flags;
pub mod quote;
