//! Type definitions for the podcast-catalog application.
//!
//! This module contains the catalog records (podcasts, genres, season
//! breakdowns) and the small selection value that drives the catalog query.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a podcast. Season info entries share the same id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PodcastId(pub String);

impl PodcastId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PodcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a genre.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(pub u32);

impl fmt::Display for GenreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A podcast as it appears in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Podcast {
    /// Unique identifier for the podcast.
    pub id: PodcastId,

    /// Display title.
    pub title: String,

    /// Cover image URL.
    pub image: String,

    /// Long-form description shown in the detail view.
    pub description: String,

    /// Genre ids in the order the podcast declares them.
    pub genres: Vec<GenreId>,

    /// Number of seasons.
    pub seasons: u32,

    /// Last time the podcast was updated.
    pub updated: DateTime<Utc>,
}

impl Podcast {
    /// Whether the podcast is tagged with the given genre.
    pub fn has_genre(&self, genre: GenreId) -> bool {
        self.genres.contains(&genre)
    }
}

/// An entry of the genre lookup table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub title: String,
}

/// One season of a podcast and its episode count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDetail {
    pub title: String,
    pub episodes: u32,
}

/// Season breakdown for one podcast, joined to it by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub id: PodcastId,

    #[serde(rename = "seasonDetails")]
    pub season_details: Vec<SeasonDetail>,
}

/// Ordering applied to the working set by `updated`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Newest first.
    #[default]
    MostRecent,
    /// Oldest first.
    Oldest,
}

impl SortOrder {
    /// Both options, in the order the sort control lists them.
    pub const ALL: [SortOrder; 2] = [SortOrder::MostRecent, SortOrder::Oldest];

    /// The value used on the command line and in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::MostRecent => "most-recent",
            SortOrder::Oldest => "oldest",
        }
    }

    /// Human readable label for the sort control.
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::MostRecent => "Most recent",
            SortOrder::Oldest => "Oldest",
        }
    }

    /// The other option.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::MostRecent => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::MostRecent,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "most-recent" => Ok(SortOrder::MostRecent),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(AppError::InvalidInput(format!(
                "unknown sort order '{}', expected 'most-recent' or 'oldest'",
                other
            ))),
        }
    }
}

/// Genre filter of the working set: everything, or a single genre.
///
/// Parsed from the same text the genre control produces: exactly `"all"`,
/// or a genre id coerced to a number. An id missing from the genre table is
/// accepted and simply matches no podcast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GenreFilter {
    #[default]
    All,
    Genre(GenreId),
}

impl GenreFilter {
    /// Whether a podcast passes this filter.
    pub fn matches(&self, podcast: &Podcast) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(id) => podcast.has_genre(*id),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str("all"),
            GenreFilter::Genre(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for GenreFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value == "all" {
            return Ok(GenreFilter::All);
        }
        value
            .parse::<u32>()
            .map(|id| GenreFilter::Genre(GenreId(id)))
            .map_err(|_| {
                AppError::InvalidInput(format!(
                    "unknown genre filter '{}', expected 'all' or a genre id",
                    value
                ))
            })
    }
}

impl TryFrom<String> for GenreFilter {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GenreFilter> for String {
    fn from(filter: GenreFilter) -> Self {
        filter.to_string()
    }
}

/// The user's current list selection.
///
/// Input handlers never edit this in place; they derive a new value and
/// the working set is recomputed from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub genre: GenreFilter,
    pub sort: SortOrder,
}

impl Selection {
    pub fn new(genre: GenreFilter, sort: SortOrder) -> Self {
        Self { genre, sort }
    }

    /// A copy of this selection with a different genre filter.
    pub fn with_genre(self, genre: GenreFilter) -> Self {
        Self { genre, ..self }
    }

    /// A copy of this selection with a different sort order.
    pub fn with_sort(self, sort: SortOrder) -> Self {
        Self { sort, ..self }
    }
}
