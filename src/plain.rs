//! Plain text output of the catalog, for use without the TUI.

use crate::catalog::working_set;
use crate::data::Dataset;
use crate::error::{AppError, Result};
use crate::types::{PodcastId, Selection};
use crate::view::{to_detail_view, to_preview_cards};
use log::info;
use std::io::Write;

/// Write the working set for `selection` as blocks of text, one per card.
pub fn write_cards<W: Write>(out: &mut W, dataset: &Dataset, selection: &Selection) -> Result<()> {
    let podcasts = working_set(&dataset.podcasts, selection);
    let cards = to_preview_cards(&podcasts, &dataset.genres)?;

    for card in &cards {
        writeln!(out, "{}\nId: {}\n", card.to_display(), card.id)?;
    }
    Ok(())
}

/// Write one podcast's details. Unknown ids write nothing.
pub fn write_detail<W: Write>(out: &mut W, dataset: &Dataset, id: &PodcastId) -> Result<()> {
    match to_detail_view(id, &dataset.podcasts, &dataset.seasons, &dataset.genres) {
        Ok(view) => {
            writeln!(out, "{}", view.to_display())?;
            Ok(())
        }
        Err(AppError::NotFound(what)) => {
            info!("Nothing to show: {} not found", what);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
