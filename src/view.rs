//! View projection: turns catalog records into display-ready structures.
//!
//! Nothing here touches the terminal. The TUI and the plain text output
//! both render the [`PreviewCard`] and [`DetailView`] values built here.

use crate::error::{AppError, Result};
use crate::types::{Genre, GenreId, Podcast, PodcastId, SeasonDetail, SeasonInfo};
use chrono::{DateTime, Utc};

/// Compact display unit of the podcast list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewCard {
    /// Podcast id, used to map a clicked card back to its podcast.
    pub id: PodcastId,
    pub title: String,
    pub image: String,
    pub seasons_count: u32,
    /// Genre names joined with ", " in podcast order.
    pub genre_names: String,
    /// Formatted update date, e.g. "January 5, 2024".
    pub updated: String,
}

impl PreviewCard {
    /// Format the card as a block of text lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use podcast_catalog::types::PodcastId;
    /// use podcast_catalog::view::PreviewCard;
    ///
    /// let card = PreviewCard {
    ///     id: PodcastId::new("42"),
    ///     title: "Laugh Track".to_string(),
    ///     image: "https://example.com/cover.jpg".to_string(),
    ///     seasons_count: 5,
    ///     genre_names: "Comedy, Entertainment".to_string(),
    ///     updated: "January 5, 2024".to_string(),
    /// };
    /// assert_eq!(
    ///     card.to_display(),
    ///     "Laugh Track\nSeasons: 5\nGenres: Comedy, Entertainment\nUpdated: January 5, 2024"
    /// );
    /// ```
    pub fn to_display(&self) -> String {
        format!(
            "{}\nSeasons: {}\nGenres: {}\nUpdated: {}",
            self.title, self.seasons_count, self.genre_names, self.updated
        )
    }
}

/// One row of the season list in the detail view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeasonRow {
    pub label: String,
    pub episode_count: u32,
}

impl SeasonRow {
    /// Episode count with its unit, e.g. "12 episodes".
    pub fn episodes_display(&self) -> String {
        format!("{} episodes", self.episode_count)
    }
}

/// Expanded display unit shown in the modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub id: PodcastId,
    pub title: String,
    pub image: String,
    pub image_alt: String,
    pub description: String,
    /// One genre name per genre id, in podcast order.
    pub genre_tags: Vec<String>,
    pub updated: String,
    pub seasons: Vec<SeasonRow>,
}

impl DetailView {
    /// Format the detail view as plain text.
    pub fn to_display(&self) -> String {
        let mut out = format!(
            "{}\n{}\n\n{}\n\nGenres: {}\nUpdated: {}\n",
            self.title,
            self.image,
            self.description,
            self.genre_tags.join(" | "),
            self.updated
        );
        for season in &self.seasons {
            out.push_str(&format!(
                "\n  {}  {}",
                season.label,
                season.episodes_display()
            ));
        }
        out
    }
}

/// Format an update timestamp as a long date, e.g. "January 5, 2024".
///
/// Dates are rendered in UTC so the same catalog always renders the same.
pub fn format_updated(updated: &DateTime<Utc>) -> String {
    updated.format("%B %-d, %Y").to_string()
}

/// Resolve a genre id to its title.
fn genre_title(genres: &[Genre], id: GenreId) -> Result<&str> {
    genres
        .iter()
        .find(|g| g.id == id)
        .map(|g| g.title.as_str())
        .ok_or_else(|| AppError::MissingReference(format!("genre {}", id)))
}

fn genre_names(podcast: &Podcast, genres: &[Genre]) -> Result<Vec<String>> {
    podcast
        .genres
        .iter()
        .map(|id| genre_title(genres, *id).map(str::to_string))
        .collect()
}

/// Season rows use each season's own title verbatim.
fn season_row(season: &SeasonDetail) -> SeasonRow {
    SeasonRow {
        label: season.title.clone(),
        episode_count: season.episodes,
    }
}

/// Build the preview card of one podcast.
pub fn to_preview_card(podcast: &Podcast, genres: &[Genre]) -> Result<PreviewCard> {
    Ok(PreviewCard {
        id: podcast.id.clone(),
        title: podcast.title.clone(),
        image: podcast.image.clone(),
        seasons_count: podcast.seasons,
        genre_names: genre_names(podcast, genres)?.join(", "),
        updated: format_updated(&podcast.updated),
    })
}

/// Build preview cards for an ordered working set, preserving its order.
///
/// A genre id missing from `genres` fails the whole projection with
/// [`AppError::MissingReference`].
pub fn to_preview_cards(podcasts: &[&Podcast], genres: &[Genre]) -> Result<Vec<PreviewCard>> {
    podcasts
        .iter()
        .map(|podcast| to_preview_card(podcast, genres))
        .collect()
}

/// Build the detail view of a podcast.
///
/// Returns [`AppError::NotFound`] when the id is missing from either the
/// podcast table or the season table.
pub fn to_detail_view(
    id: &PodcastId,
    podcasts: &[Podcast],
    seasons: &[SeasonInfo],
    genres: &[Genre],
) -> Result<DetailView> {
    let podcast = podcasts
        .iter()
        .find(|p| &p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("podcast {}", id)))?;
    let season_info = seasons
        .iter()
        .find(|s| &s.id == id)
        .ok_or_else(|| AppError::NotFound(format!("season info for podcast {}", id)))?;

    Ok(DetailView {
        id: podcast.id.clone(),
        title: podcast.title.clone(),
        image: podcast.image.clone(),
        image_alt: podcast.title.clone(),
        description: podcast.description.clone(),
        genre_tags: genre_names(podcast, genres)?,
        updated: format_updated(&podcast.updated),
        seasons: season_info.season_details.iter().map(season_row).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn genres() -> Vec<Genre> {
        vec![
            Genre {
                id: GenreId(2),
                title: "Comedy".to_string(),
            },
            Genre {
                id: GenreId(3),
                title: "Drama".to_string(),
            },
        ]
    }

    fn podcast(id: &str, genre_ids: &[u32]) -> Podcast {
        Podcast {
            id: PodcastId::new(id),
            title: format!("Show {}", id),
            image: format!("https://example.com/{}.jpg", id),
            description: "A show".to_string(),
            genres: genre_ids.iter().copied().map(GenreId).collect(),
            seasons: 2,
            updated: Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap(),
        }
    }

    fn season_info(id: &str) -> SeasonInfo {
        SeasonInfo {
            id: PodcastId::new(id),
            season_details: vec![
                SeasonDetail {
                    title: "Pilot Season".to_string(),
                    episodes: 6,
                },
                SeasonDetail {
                    title: "Season 2".to_string(),
                    episodes: 10,
                },
            ],
        }
    }

    #[test]
    fn test_format_updated() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(format_updated(&date), "January 5, 2024");

        let date = Utc.with_ymd_and_hms(2022, 11, 23, 23, 59, 59).unwrap();
        assert_eq!(format_updated(&date), "November 23, 2022");
    }

    #[test]
    fn test_preview_card_fields() {
        let p = podcast("1", &[3, 2]);
        let cards = to_preview_cards(&[&p], &genres()).unwrap();

        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.id, PodcastId::new("1"));
        assert_eq!(card.title, "Show 1");
        assert_eq!(card.seasons_count, 2);
        assert_eq!(card.genre_names, "Drama, Comedy");
        assert_eq!(card.updated, "January 5, 2024");
    }

    #[test]
    fn test_preview_cards_keep_order_and_are_repeatable() {
        let a = podcast("a", &[2]);
        let b = podcast("b", &[3]);
        let working_set = vec![&b, &a];

        let first = to_preview_cards(&working_set, &genres()).unwrap();
        let second = to_preview_cards(&working_set, &genres()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].id, PodcastId::new("b"));
        assert_eq!(first[1].id, PodcastId::new("a"));
    }

    #[test]
    fn test_preview_cards_fail_on_unknown_genre() {
        let p = podcast("1", &[2, 42]);
        let err = to_preview_cards(&[&p], &genres()).unwrap_err();
        assert!(matches!(err, AppError::MissingReference(_)));
    }

    #[test]
    fn test_detail_view_success() {
        let podcasts = vec![podcast("1", &[2, 3])];
        let seasons = vec![season_info("1")];

        let view = to_detail_view(&PodcastId::new("1"), &podcasts, &seasons, &genres()).unwrap();

        assert_eq!(view.title, "Show 1");
        assert_eq!(view.image_alt, view.title);
        assert_eq!(view.genre_tags, vec!["Comedy", "Drama"]);
        assert_eq!(view.genre_tags.len(), podcasts[0].genres.len());
        assert_eq!(view.updated, "January 5, 2024");
        assert_eq!(
            view.seasons,
            vec![
                SeasonRow {
                    label: "Pilot Season".to_string(),
                    episode_count: 6
                },
                SeasonRow {
                    label: "Season 2".to_string(),
                    episode_count: 10
                },
            ]
        );
    }

    #[test]
    fn test_detail_view_not_found_without_podcast() {
        let podcasts = vec![podcast("1", &[2])];
        let seasons = vec![season_info("1"), season_info("2")];

        let err = to_detail_view(&PodcastId::new("2"), &podcasts, &seasons, &genres()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_detail_view_not_found_without_season_info() {
        let podcasts = vec![podcast("1", &[2])];

        let err = to_detail_view(&PodcastId::new("1"), &podcasts, &[], &genres()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_detail_display_lists_seasons() {
        let podcasts = vec![podcast("1", &[2])];
        let seasons = vec![season_info("1")];
        let view = to_detail_view(&PodcastId::new("1"), &podcasts, &seasons, &genres()).unwrap();

        let text = view.to_display();
        assert!(text.starts_with("Show 1\n"));
        assert!(text.contains("Genres: Comedy"));
        assert!(text.contains("Pilot Season  6 episodes"));
        assert!(text.contains("Season 2  10 episodes"));
    }
}
