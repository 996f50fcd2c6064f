//! Application state management and input handling.

use crate::catalog::working_set;
use crate::config::Keybindings;
use crate::data::{Dataset, GenreOption};
use crate::error::Result;
use crate::modal::Modal;
use crate::types::{PodcastId, Selection};
use crate::view::{PreviewCard, to_preview_cards};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;

use super::types::{Action, Focus, Regions};

/// Rows taken by one preview card in the podcast list, separator included.
pub const CARD_HEIGHT: u16 = 5;

/// Season rows skipped by PageUp/PageDown in the details modal.
const SEASON_PAGE: usize = 5;

/// Application state for the TUI.
pub struct App {
    /// The catalog being browsed
    pub dataset: Dataset,
    /// Options of the genre control
    pub genre_options: Vec<GenreOption>,
    /// Current genre and sort selection
    pub selection: Selection,
    /// Preview cards of the current working set
    pub cards: Vec<PreviewCard>,
    /// Details modal
    pub modal: Modal,
    /// Current focus (sidebar or list)
    pub focus: Focus,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether help modal is shown
    pub show_help: bool,
    /// List state for the genre sidebar
    pub genre_list_state: ListState,
    /// List state for the podcast cards
    pub card_list_state: ListState,
    /// List state for the season rows of the details modal
    pub season_list_state: ListState,
    /// Custom keybindings
    pub keybindings: Keybindings,
    /// Regions of the last drawn frame
    pub regions: Regions,
}

impl App {
    /// Create a new App showing the working set for `selection`.
    ///
    /// Fails if a podcast in the working set references an unknown genre.
    pub fn new(dataset: Dataset, selection: Selection, keybindings: Keybindings) -> Result<Self> {
        let genre_options = dataset.genre_options();
        let mut app = Self {
            dataset,
            genre_options,
            selection,
            cards: Vec::new(),
            modal: Modal::Closed,
            focus: Focus::Podcasts,
            should_quit: false,
            show_help: false,
            genre_list_state: ListState::default(),
            card_list_state: ListState::default(),
            season_list_state: ListState::default(),
            keybindings,
            regions: Regions::default(),
        };
        app.refresh()?;
        Ok(app)
    }

    /// Recompute the working set and its cards from the selection.
    fn refresh(&mut self) -> Result<()> {
        let podcasts = working_set(&self.dataset.podcasts, &self.selection);
        self.cards = to_preview_cards(&podcasts, &self.dataset.genres)?;

        self.card_list_state = ListState::default();
        if !self.cards.is_empty() {
            self.card_list_state.select(Some(0));
        }

        let genre_index = self
            .genre_options
            .iter()
            .position(|o| o.filter == self.selection.genre);
        self.genre_list_state.select(genre_index);

        info!(
            "Showing {} podcasts (genre={}, sort={})",
            self.cards.len(),
            self.selection.genre,
            self.selection.sort
        );
        Ok(())
    }

    /// Replace the selection and re-derive the working set.
    pub fn set_selection(&mut self, selection: Selection) -> Result<()> {
        if selection == self.selection {
            return Ok(());
        }
        self.selection = selection;
        self.refresh()
    }

    /// Open the details modal on a podcast. Unknown ids are ignored.
    pub fn open_modal(&mut self, id: &PodcastId) {
        let modal = std::mem::take(&mut self.modal);
        self.modal = modal.open(id, &self.dataset);

        self.season_list_state = ListState::default();
        if self.modal.detail().is_some_and(|d| !d.seasons.is_empty()) {
            self.season_list_state.select(Some(0));
        }
    }

    /// Close the details modal.
    pub fn close_modal(&mut self) {
        let modal = std::mem::take(&mut self.modal);
        self.modal = modal.close();
    }

    /// Apply an action produced by input handling.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::SelectGenre(genre) => self.set_selection(self.selection.with_genre(genre))?,
            Action::SelectSort(sort) => self.set_selection(self.selection.with_sort(sort))?,
            Action::OpenPodcast(id) => self.open_modal(&id),
            Action::CloseModal => self.close_modal(),
        }
        Ok(())
    }

    /// The card under the list highlight.
    pub fn selected_card(&self) -> Option<&PreviewCard> {
        self.card_list_state
            .selected()
            .and_then(|i| self.cards.get(i))
    }

    /// Label of the active genre filter.
    pub fn genre_label(&self) -> String {
        self.genre_options
            .iter()
            .find(|o| o.filter == self.selection.genre)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| format!("Genre {}", self.selection.genre))
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        // Handle help modal
        if self.show_help {
            if key.code == KeyCode::Esc
                || self.keybindings.matches(&self.keybindings.help, &key)
                || self.keybindings.matches(&self.keybindings.quit, &key)
            {
                self.show_help = false;
            }
            return Action::None;
        }

        // Escape and the close keys dismiss the details modal
        if self.modal.is_open() {
            if key.code == KeyCode::Esc
                || self.keybindings.matches(&self.keybindings.close, &key)
                || self.keybindings.matches(&self.keybindings.quit, &key)
            {
                return Action::CloseModal;
            }
            self.handle_season_input(key);
            return Action::None;
        }

        if self.keybindings.matches(&self.keybindings.help, &key) {
            self.show_help = true;
            return Action::None;
        }

        if self.keybindings.matches(&self.keybindings.sort, &key) {
            return Action::SelectSort(self.selection.sort.toggled());
        }

        if self
            .keybindings
            .matches(&self.keybindings.toggle_focus, &key)
        {
            self.focus = match self.focus {
                Focus::Genres => Focus::Podcasts,
                Focus::Podcasts => Focus::Genres,
            };
            return Action::None;
        }

        if self.keybindings.matches(&self.keybindings.quit, &key) {
            self.should_quit = true;
            return Action::Quit;
        }

        match self.focus {
            Focus::Genres => self.handle_genre_input(key),
            Focus::Podcasts => self.handle_card_input(key),
        }
    }

    fn handle_genre_input(&mut self, key: KeyEvent) -> Action {
        let current = self.genre_list_state.selected();

        if self.keybindings.matches(&self.keybindings.up, &key) {
            let i = current.unwrap_or(0);
            if i > 0 {
                return self.genre_action(i - 1);
            }
            Action::None
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            let next = current.map(|i| i + 1).unwrap_or(0);
            if next < self.genre_options.len() {
                return self.genre_action(next);
            }
            Action::None
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            self.focus = Focus::Podcasts;
            Action::None
        } else {
            Action::None
        }
    }

    /// Move through the season rows of the open modal.
    fn handle_season_input(&mut self, key: KeyEvent) {
        let count = self.modal.detail().map_or(0, |d| d.seasons.len());
        if count == 0 {
            return;
        }
        let last = count - 1;
        let i = self.season_list_state.selected().unwrap_or(0);

        let next = if self.keybindings.matches(&self.keybindings.up, &key) {
            i.saturating_sub(1)
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            (i + 1).min(last)
        } else {
            match key.code {
                KeyCode::PageUp => i.saturating_sub(SEASON_PAGE),
                KeyCode::PageDown => (i + SEASON_PAGE).min(last),
                KeyCode::Home => 0,
                KeyCode::End => last,
                _ => i,
            }
        };
        self.season_list_state.select(Some(next));
    }

    fn genre_action(&self, index: usize) -> Action {
        match self.genre_options.get(index) {
            Some(option) => Action::SelectGenre(option.filter),
            None => Action::None,
        }
    }

    fn handle_card_input(&mut self, key: KeyEvent) -> Action {
        if self.keybindings.matches(&self.keybindings.up, &key) {
            let i = self.card_list_state.selected().unwrap_or(0);
            if i > 0 {
                self.card_list_state.select(Some(i - 1));
            }
            Action::None
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            let i = self.card_list_state.selected().unwrap_or(0);
            if i < self.cards.len().saturating_sub(1) {
                self.card_list_state.select(Some(i + 1));
            }
            Action::None
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            match self.selected_card() {
                Some(card) => Action::OpenPodcast(card.id.clone()),
                None => Action::None,
            }
        } else {
            Action::None
        }
    }

    /// Handle a mouse event and return an action.
    ///
    /// Only left clicks are handled. Hit testing uses the regions recorded
    /// by the last draw.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Action::None;
        }
        let pos = Position::new(mouse.column, mouse.row);

        if self.show_help {
            self.show_help = false;
            return Action::None;
        }

        if self.modal.is_open() {
            if self
                .regions
                .modal_close
                .is_some_and(|close| close.contains(pos))
            {
                return Action::CloseModal;
            }
            return match self.regions.modal {
                Some(panel) if panel.contains(pos) => Action::None,
                // background click
                _ => Action::CloseModal,
            };
        }

        if self.regions.sort_control.contains(pos) {
            return Action::SelectSort(self.selection.sort.toggled());
        }

        let genres = inner(self.regions.genre_list);
        if genres.contains(pos) {
            self.focus = Focus::Genres;
            let index = (pos.y - genres.y) as usize + self.genre_list_state.offset();
            return self.genre_action(index);
        }

        let cards = inner(self.regions.card_list);
        if cards.contains(pos) {
            self.focus = Focus::Podcasts;
            let index = ((pos.y - cards.y) / CARD_HEIGHT) as usize + self.card_list_state.offset();
            if let Some(card) = self.cards.get(index) {
                debug!("Clicked card {} ({})", index, card.id);
                let id = card.id.clone();
                self.card_list_state.select(Some(index));
                return Action::OpenPodcast(id);
            }
        }

        Action::None
    }

    /// Hint text for the footer.
    pub fn footer_hint(&self) -> String {
        let kb = &self.keybindings;
        if self.show_help {
            return format!("[{}] close help", with_esc(&kb.help));
        }
        if self.modal.is_open() {
            return format!(
                "[↑↓] seasons  [{}] close  click outside to close",
                with_esc(&kb.close)
            );
        }
        let select_hint = match self.focus {
            Focus::Genres => "[↑↓] genre",
            Focus::Podcasts => "[↑↓] navigate  [Enter] details",
        };
        format!(
            "{}  [{}] switch  [{}] sort  [{}] help  [{}] quit",
            select_hint,
            kb.hint(&kb.toggle_focus),
            kb.hint(&kb.sort),
            kb.hint(&kb.help),
            kb.hint(&kb.quit)
        )
    }
}

/// "Esc" followed by the other keys of a binding, e.g. "Esc/x".
fn with_esc(binding: &[String]) -> String {
    std::iter::once("Esc")
        .chain(binding.iter().map(String::as_str).filter(|k| *k != "Esc"))
        .collect::<Vec<_>>()
        .join("/")
}

/// Area inside a bordered block.
fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GenreFilter, GenreId, SortOrder};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> App {
        App::new(
            Dataset::builtin().unwrap(),
            Selection::default(),
            Keybindings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_app_shows_whole_catalog_newest_first() {
        let app = app();
        assert_eq!(app.cards.len(), app.dataset.podcasts.len());
        assert_eq!(app.card_list_state.selected(), Some(0));
        assert_eq!(app.genre_list_state.selected(), Some(0));
        assert_eq!(app.cards[0].title, "The Memory Palace");
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_genre_change_refilters() {
        let mut app = app();
        app.apply(Action::SelectGenre(GenreFilter::Genre(GenreId(3))))
            .unwrap();

        assert_eq!(app.selection.genre, GenreFilter::Genre(GenreId(3)));
        assert_eq!(app.cards.len(), 2);
        assert_eq!(app.genre_list_state.selected(), Some(3));
        assert_eq!(app.genre_label(), "History");
    }

    #[test]
    fn test_unknown_genre_shows_empty_list() {
        let mut app = app();
        app.apply(Action::SelectGenre(GenreFilter::Genre(GenreId(404))))
            .unwrap();

        assert!(app.cards.is_empty());
        assert_eq!(app.card_list_state.selected(), None);
        assert_eq!(app.genre_list_state.selected(), None);
        assert_eq!(app.handle_input(key(KeyCode::Enter)), Action::None);
    }

    #[test]
    fn test_sort_key_toggles_order() {
        let mut app = app();
        let action = app.handle_input(key(KeyCode::Char('o')));
        assert_eq!(action, Action::SelectSort(SortOrder::Oldest));

        app.apply(action).unwrap();
        assert_eq!(app.selection.sort, SortOrder::Oldest);
        assert_eq!(app.cards[0].title, "Empires in Miniature");
    }

    #[test]
    fn test_sidebar_navigation_changes_genre() {
        let mut app = app();
        app.handle_input(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Genres);

        let action = app.handle_input(key(KeyCode::Down));
        assert_eq!(action, Action::SelectGenre(GenreFilter::Genre(GenreId(1))));
        app.apply(action).unwrap();

        let action = app.handle_input(key(KeyCode::Up));
        assert_eq!(action, Action::SelectGenre(GenreFilter::All));

        app.apply(action).unwrap();
        assert_eq!(app.handle_input(key(KeyCode::Up)), Action::None);
    }

    #[test]
    fn test_enter_opens_selected_card_and_escape_closes() {
        let mut app = app();
        app.handle_input(key(KeyCode::Down));

        let expected = app.cards[1].id.clone();
        let action = app.handle_input(key(KeyCode::Enter));
        assert_eq!(action, Action::OpenPodcast(expected.clone()));

        app.apply(action).unwrap();
        assert_eq!(app.modal.detail().map(|d| &d.id), Some(&expected));

        let action = app.handle_input(key(KeyCode::Esc));
        assert_eq!(action, Action::CloseModal);
        app.apply(action).unwrap();
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_quit_key_closes_modal_before_quitting() {
        let mut app = app();
        let id = app.cards[0].id.clone();
        app.open_modal(&id);

        assert_eq!(app.handle_input(key(KeyCode::Char('q'))), Action::CloseModal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_modal_keys_move_through_seasons() {
        let mut app = app();
        app.open_modal(&PodcastId::new("10716"));
        assert_eq!(app.season_list_state.selected(), Some(0));

        app.handle_input(key(KeyCode::Down));
        app.handle_input(key(KeyCode::Char('j')));
        assert_eq!(app.season_list_state.selected(), Some(2));

        app.handle_input(key(KeyCode::PageDown));
        assert_eq!(app.season_list_state.selected(), Some(7));

        app.handle_input(key(KeyCode::End));
        assert_eq!(app.season_list_state.selected(), Some(13));
        app.handle_input(key(KeyCode::Down));
        assert_eq!(app.season_list_state.selected(), Some(13));

        app.handle_input(key(KeyCode::Home));
        assert_eq!(app.season_list_state.selected(), Some(0));
        app.handle_input(key(KeyCode::Up));
        assert_eq!(app.season_list_state.selected(), Some(0));

        // the card highlight is untouched while the modal is open
        assert_eq!(app.card_list_state.selected(), Some(0));
    }

    #[test]
    fn test_reopening_resets_season_position() {
        let mut app = app();
        app.open_modal(&PodcastId::new("10716"));
        app.handle_input(key(KeyCode::End));

        app.open_modal(&PodcastId::new("9180"));
        assert_eq!(app.season_list_state.selected(), Some(0));
    }

    #[test]
    fn test_footer_hint_lists_each_close_key_once() {
        let mut app = app();
        app.open_modal(&PodcastId::new("10716"));
        let hint = app.footer_hint();
        assert!(hint.contains("[Esc/x] close"), "{}", hint);
        assert_eq!(hint.matches("Esc").count(), 1);

        app.close_modal();
        app.show_help = true;
        assert_eq!(app.footer_hint(), "[Esc/?] close help");
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut app = app();
        app.apply(Action::CloseModal).unwrap();
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_open_unknown_podcast_is_ignored() {
        let mut app = app();
        app.apply(Action::OpenPodcast(PodcastId::new("nope"))).unwrap();
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let action = app.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action, Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        app.handle_input(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_input(key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn test_click_on_card_opens_it() {
        let mut app = app();
        app.regions = Regions {
            card_list: Rect::new(30, 3, 50, 30),
            genre_list: Rect::new(0, 3, 30, 30),
            sort_control: Rect::new(60, 0, 20, 3),
            modal: None,
            modal_close: None,
        };

        // second card starts CARD_HEIGHT rows below the first inner row
        let action = app.handle_mouse(click(40, 4 + CARD_HEIGHT));
        assert_eq!(action, Action::OpenPodcast(app.cards[1].id.clone()));
        assert_eq!(app.card_list_state.selected(), Some(1));
    }

    #[test]
    fn test_click_on_genre_option_selects_it() {
        let mut app = app();
        app.regions.genre_list = Rect::new(0, 3, 30, 30);

        let action = app.handle_mouse(click(5, 4 + 4));
        assert_eq!(action, Action::SelectGenre(GenreFilter::Genre(GenreId(4))));
        assert_eq!(app.focus, Focus::Genres);
    }

    #[test]
    fn test_click_on_sort_control_toggles_sort() {
        let mut app = app();
        app.regions.sort_control = Rect::new(60, 0, 20, 3);

        let action = app.handle_mouse(click(65, 1));
        assert_eq!(action, Action::SelectSort(SortOrder::Oldest));
    }

    #[test]
    fn test_modal_background_click_closes() {
        let mut app = app();
        let id = app.cards[0].id.clone();
        app.open_modal(&id);
        app.regions.modal = Some(Rect::new(10, 5, 40, 20));
        app.regions.modal_close = Some(Rect::new(39, 5, 9, 1));

        assert_eq!(app.handle_mouse(click(20, 10)), Action::None);
        assert_eq!(app.handle_mouse(click(41, 5)), Action::CloseModal);
        assert_eq!(app.handle_mouse(click(2, 2)), Action::CloseModal);
    }
}
