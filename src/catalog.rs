//! Catalog query: selects and orders the working set of podcasts.

use crate::types::{GenreFilter, Podcast, Selection, SortOrder};
use log::trace;

/// Filter the catalog by genre and order it by update date.
///
/// The dataset is left untouched; the result borrows from it. The sort is
/// stable, so podcasts with equal `updated` timestamps keep the order they
/// had in the catalog.
pub fn filter_and_sort<'a>(
    podcasts: &'a [Podcast],
    genre: GenreFilter,
    sort: SortOrder,
) -> Vec<&'a Podcast> {
    let mut working_set: Vec<&Podcast> = podcasts.iter().filter(|p| genre.matches(p)).collect();

    match sort {
        SortOrder::MostRecent => working_set.sort_by(|a, b| b.updated.cmp(&a.updated)),
        SortOrder::Oldest => working_set.sort_by(|a, b| a.updated.cmp(&b.updated)),
    }

    trace!(
        "working set for genre={} sort={}: {} of {} podcasts",
        genre,
        sort,
        working_set.len(),
        podcasts.len()
    );

    working_set
}

/// [`filter_and_sort`] driven by a [`Selection`].
pub fn working_set<'a>(podcasts: &'a [Podcast], selection: &Selection) -> Vec<&'a Podcast> {
    filter_and_sort(podcasts, selection.genre, selection.sort)
}
