//! UI rendering functions for the TUI.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::App;
use super::types::{Focus, Regions};
use crate::types::SortOrder;
use crate::view::{DetailView, PreviewCard};

const CLOSE_LABEL: &str = "[x] close";

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content (sidebar + list)
            Constraint::Length(3), // Footer
        ])
        .split(size);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30), // Genre sidebar (fixed width)
            Constraint::Min(0),     // Podcast list
        ])
        .split(chunks[1]);

    draw_header(frame, app, header_chunks[0]);
    draw_sort_control(frame, app, header_chunks[1]);
    draw_genres(frame, app, content_chunks[0]);
    draw_cards(frame, app, content_chunks[1]);
    draw_footer(frame, app, chunks[2]);

    let mut regions = Regions {
        genre_list: content_chunks[0],
        card_list: content_chunks[1],
        sort_control: header_chunks[1],
        modal: None,
        modal_close: None,
    };

    if let Some(detail) = app.modal.detail() {
        let (panel, close) = draw_detail_modal(frame, detail, &mut app.season_list_state);
        regions.modal = Some(panel);
        regions.modal_close = Some(close);
    }

    if app.show_help {
        draw_help_modal(frame, app);
    }

    app.regions = regions;
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "podcast-catalog",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", app.genre_label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{} podcasts]", app.cards.len()),
            Style::default().fg(Color::Green),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_sort_control(frame: &mut Frame, app: &App, area: Rect) {
    let spans: Vec<Span> = SortOrder::ALL
        .iter()
        .flat_map(|order| {
            let style = if *order == app.selection.sort {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [Span::styled(order.label(), style), Span::raw(" ")]
        })
        .collect();

    let control = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Sort"));

    frame.render_widget(control, area);
}

fn draw_genres(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_style = if app.focus == Focus::Genres {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let items: Vec<ListItem> = app
        .genre_options
        .iter()
        .map(|o| ListItem::new(o.label.as_str()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Genres")
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.genre_list_state);
}

/// Lines of one card; its height must stay equal to `CARD_HEIGHT`.
fn card_text(card: &PreviewCard) -> Text<'_> {
    Text::from(vec![
        Line::from(Span::styled(
            card.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Seasons: {}", card.seasons_count)),
        Line::from(format!("Genres: {}", card.genre_names)),
        Line::from(Span::styled(
            format!("Updated: {}", card.updated),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ])
}

fn draw_cards(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_style = if app.focus == Focus::Podcasts {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Podcasts")
        .border_style(border_style);

    if app.cards.is_empty() {
        let empty = Paragraph::new("No podcasts match this genre")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .cards
        .iter()
        .map(|c| ListItem::new(card_text(c)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.card_list_state);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = Paragraph::new(app.footer_hint())
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

/// Draw the details overlay. Returns the panel and close-affordance areas.
///
/// The season rows are a list of their own so long breakdowns can be
/// scrolled while the podcast info stays in place.
fn draw_detail_modal(
    frame: &mut Frame,
    detail: &DetailView,
    seasons_state: &mut ListState,
) -> (Rect, Rect) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(detail.title.as_str())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Image
            Constraint::Min(1),         // Description
            Constraint::Length(1),      // Genre tags
            Constraint::Length(1),      // Updated
            Constraint::Percentage(50), // Seasons
        ])
        .split(inner);

    let image = Paragraph::new(Line::from(vec![
        Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} <{}>", detail.image_alt, detail.image)),
    ]));
    frame.render_widget(image, chunks[0]);

    let description = Paragraph::new(detail.description.as_str()).wrap(Wrap { trim: true });
    frame.render_widget(description, chunks[1]);

    let tag_style = Style::default().fg(Color::Black).bg(Color::Cyan);
    let mut tags: Vec<Span> = Vec::new();
    for name in &detail.genre_tags {
        tags.push(Span::styled(format!(" {} ", name), tag_style));
        tags.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(tags)), chunks[2]);

    let updated = Paragraph::new(Line::from(vec![
        Span::styled("Updated: ", Style::default().fg(Color::DarkGray)),
        Span::raw(detail.updated.as_str()),
    ]));
    frame.render_widget(updated, chunks[3]);

    let items: Vec<ListItem> = detail
        .seasons
        .iter()
        .map(|season| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}  ", season.label)),
                Span::styled(season.episodes_display(), Style::default().fg(Color::Green)),
            ]))
        })
        .collect();

    let seasons = List::new(items)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(format!("Seasons ({})", detail.seasons.len()))
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    frame.render_stateful_widget(seasons, chunks[4], seasons_state);

    let label_width = CLOSE_LABEL.len() as u16;
    let close = Rect {
        x: area.right().saturating_sub(label_width + 2).max(area.x),
        y: area.y,
        width: label_width.min(area.width),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(CLOSE_LABEL).style(Style::default().fg(Color::Red)),
        close,
    );

    (area, close)
}

fn draw_help_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let kb = &app.keybindings;
    let content = format!(
        "\
Global Commands
───────────────
  {help:<11} Show/hide this help
  Ctrl+C      Force quit
  Ctrl+Q      Force quit
  {focus:<11} Switch between genres and podcasts
  {sort:<11} Toggle sort order (most recent / oldest)
  {quit:<11} Quit

Navigation
──────────
  {down:<11} Move down (changes genre in the sidebar)
  {up:<11} Move up
  {select:<11} Show podcast details
  Click       Select a genre or open a podcast

Details
───────
  Esc / {close:<5} Close details
  Click outside the details panel to close it

Press Esc to close",
        help = kb.hint(&kb.help),
        focus = kb.hint(&kb.toggle_focus),
        sort = kb.hint(&kb.sort),
        quit = kb.hint(&kb.quit),
        down = kb.hint(&kb.down),
        up = kb.hint(&kb.up),
        select = kb.hint(&kb.select),
        close = kb.hint(&kb.close),
    );

    let help_text = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_text, area);
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
