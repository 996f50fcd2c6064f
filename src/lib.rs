//! A terminal podcast catalog viewer written in Rust.
//!
//! podcast-catalog renders a list of podcast previews from a catalog
//! compiled into the binary, lets the user filter it by genre and sort it
//! by update date, and shows each podcast's season breakdown in a details
//! modal.
//!
//! # Features
//!
//! - Filter the catalog by genre
//! - Sort by most recent or oldest update
//! - Inspect seasons and episode counts of a podcast
//! - Keyboard and mouse navigation
//! - Plain text output for scripting
//!
//! # Usage
//!
//! ```bash
//! # Start the TUI
//! cargo run
//!
//! # List history podcasts, oldest first, without the TUI
//! cargo run -- --plain --genre 3 --sort oldest
//! ```

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod modal;
pub mod plain;
pub mod tui;
pub mod types;
pub mod view;
