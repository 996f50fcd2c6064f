//! Visibility state of the podcast detail modal.

use crate::data::Dataset;
use crate::types::PodcastId;
use crate::view::{DetailView, to_detail_view};
use log::debug;

/// The modal is either hidden or showing one podcast's details.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Open(DetailView),
}

impl Modal {
    /// Open the modal on a podcast.
    ///
    /// If the podcast or its season info cannot be found the current state
    /// is returned unchanged. Opening while already open replaces the
    /// content directly.
    pub fn open(self, id: &PodcastId, dataset: &Dataset) -> Self {
        match to_detail_view(id, &dataset.podcasts, &dataset.seasons, &dataset.genres) {
            Ok(view) => {
                debug!("Opening details for podcast {}", id);
                Modal::Open(view)
            }
            Err(e) => {
                debug!("Not opening details for podcast {}: {}", id, e);
                self
            }
        }
    }

    /// Close the modal. Always ends `Closed`.
    pub fn close(self) -> Self {
        Modal::Closed
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open(_))
    }

    /// The displayed detail view, if open.
    pub fn detail(&self) -> Option<&DetailView> {
        match self {
            Modal::Open(view) => Some(view),
            Modal::Closed => None,
        }
    }
}
