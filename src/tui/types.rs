//! TUI type definitions for focus, actions, and hit-test regions.

use crate::types::{GenreFilter, PodcastId, SortOrder};
use ratatui::layout::Rect;

/// Focus state for the split-panel view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The genre sidebar
    Genres,
    /// The podcast list
    Podcasts,
}

/// Actions that can be returned from the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// The genre selection changed
    SelectGenre(GenreFilter),
    /// The sort selection changed
    SelectSort(SortOrder),
    /// Show the details of a podcast
    OpenPodcast(PodcastId),
    /// Hide the details modal
    CloseModal,
}

/// Screen regions recorded by the last draw, used to map mouse clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Regions {
    pub genre_list: Rect,
    pub card_list: Rect,
    pub sort_control: Rect,
    pub modal: Option<Rect>,
    pub modal_close: Option<Rect>,
}
