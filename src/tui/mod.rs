//! Terminal User Interface for podcast-catalog using ratatui.
//!
//! This module provides a full-screen TUI with a genre sidebar, the
//! podcast list, and a details modal.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::{App, CARD_HEIGHT};
pub use types::{Action, Focus, Regions};

use crate::error::Result;
use crossterm::event::{self, Event};
use log::warn;
use std::io;
use std::time::Duration;

/// Poll for terminal events with a timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Combine the outcome of the event loop with the outcome of restoring the
/// terminal. A failure of the loop is reported ahead of a failed restore.
pub fn finish_session(run: Result<()>, restore: io::Result<()>) -> Result<()> {
    match (run, restore) {
        (Err(e), Err(restore_err)) => {
            warn!("Failed to restore terminal: {}", restore_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restore) => Ok(restore?),
    }
}
