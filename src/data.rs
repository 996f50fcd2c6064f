//! The static podcast catalog.
//!
//! The catalog is a JSON document compiled into the binary. It is parsed
//! once at startup and never modified afterwards.

use crate::error::Result;
use crate::types::{Genre, GenreFilter, GenreId, Podcast, PodcastId, SeasonInfo};
use serde::Deserialize;
use std::collections::HashSet;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Label of the genre-control option that disables filtering.
pub const ALL_GENRES_LABEL: &str = "ALL GENRES";

/// The three immutable catalog tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    pub podcasts: Vec<Podcast>,
    pub genres: Vec<Genre>,
    pub seasons: Vec<SeasonInfo>,
}

/// An option of the genre-select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreOption {
    pub filter: GenreFilter,
    pub label: String,
}

impl Dataset {
    /// Parse the catalog embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Ok(dataset)
    }

    /// Find a podcast by id.
    pub fn podcast(&self, id: &PodcastId) -> Option<&Podcast> {
        self.podcasts.iter().find(|p| &p.id == id)
    }

    /// Find the season breakdown of a podcast.
    pub fn season_info(&self, id: &PodcastId) -> Option<&SeasonInfo> {
        self.seasons.iter().find(|s| &s.id == id)
    }

    /// Find a genre by id.
    pub fn genre(&self, id: GenreId) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == id)
    }

    /// Options of the genre control: "all" first, then the genre table in order.
    pub fn genre_options(&self) -> Vec<GenreOption> {
        std::iter::once(GenreOption {
            filter: GenreFilter::All,
            label: ALL_GENRES_LABEL.to_string(),
        })
        .chain(self.genres.iter().map(|g| GenreOption {
            filter: GenreFilter::Genre(g.id),
            label: g.title.clone(),
        }))
        .collect()
    }

    /// Check the referential invariants of the catalog.
    ///
    /// Returns a description of every violation found; an empty list means
    /// every genre reference resolves and every podcast has season info.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut podcast_ids = HashSet::new();
        for podcast in &self.podcasts {
            if !podcast_ids.insert(&podcast.id) {
                problems.push(format!("duplicate podcast id {}", podcast.id));
            }
            if podcast.genres.is_empty() {
                problems.push(format!("podcast {} has no genres", podcast.id));
            }
            for genre in &podcast.genres {
                if self.genre(*genre).is_none() {
                    problems.push(format!(
                        "podcast {} references unknown genre {}",
                        podcast.id, genre
                    ));
                }
            }
            if self.season_info(&podcast.id).is_none() {
                problems.push(format!("podcast {} has no season info", podcast.id));
            }
        }

        let mut genre_ids = HashSet::new();
        for genre in &self.genres {
            if !genre_ids.insert(genre.id) {
                problems.push(format!("duplicate genre id {}", genre.id));
            }
        }

        let mut season_ids = HashSet::new();
        for info in &self.seasons {
            if !season_ids.insert(&info.id) {
                problems.push(format!("duplicate season info for podcast {}", info.id));
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses_and_is_consistent() {
        let dataset = Dataset::builtin().unwrap();
        assert!(!dataset.podcasts.is_empty());
        assert!(!dataset.genres.is_empty());
        assert_eq!(dataset.podcasts.len(), dataset.seasons.len());
        assert!(dataset.validate().is_empty(), "{:?}", dataset.validate());
    }

    #[test]
    fn test_lookups() {
        let dataset = Dataset::builtin().unwrap();
        let id = PodcastId::new("10716");

        assert_eq!(
            dataset.podcast(&id).map(|p| p.title.as_str()),
            Some("Something Was Wrong")
        );
        assert!(dataset.season_info(&id).is_some());
        assert_eq!(
            dataset.genre(GenreId(4)).map(|g| g.title.as_str()),
            Some("Comedy")
        );
        assert!(dataset.podcast(&PodcastId::new("nope")).is_none());
        assert!(dataset.genre(GenreId(999)).is_none());
    }

    #[test]
    fn test_genre_options_start_with_all() {
        let dataset = Dataset::builtin().unwrap();
        let options = dataset.genre_options();

        assert_eq!(options.len(), dataset.genres.len() + 1);
        assert_eq!(options[0].filter, GenreFilter::All);
        assert_eq!(options[0].label, ALL_GENRES_LABEL);
        assert_eq!(options[1].filter, GenreFilter::Genre(dataset.genres[0].id));
    }

    #[test]
    fn test_validate_reports_broken_references() {
        let json = r#"{
            "genres": [{ "id": 1, "title": "History" }],
            "podcasts": [
                {
                    "id": "a", "title": "A", "image": "", "description": "",
                    "genres": [1, 9], "seasons": 1,
                    "updated": "2024-01-01T00:00:00Z"
                },
                {
                    "id": "b", "title": "B", "image": "", "description": "",
                    "genres": [], "seasons": 0,
                    "updated": "2024-01-01T00:00:00Z"
                }
            ],
            "seasons": [{ "id": "a", "seasonDetails": [] }]
        }"#;

        let dataset = Dataset::from_json(json).unwrap();
        let problems = dataset.validate();

        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p.contains("unknown genre 9")));
        assert!(problems.iter().any(|p| p.contains("b has no genres")));
        assert!(problems.iter().any(|p| p.contains("b has no season info")));
    }

    #[test]
    fn test_malformed_catalog_is_a_parse_error() {
        let err = Dataset::from_json("{ \"podcasts\": 3 }").unwrap_err();
        assert!(matches!(err, crate::error::AppError::Parse(_)));
    }
}
