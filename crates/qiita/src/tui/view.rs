//! Rendering (View)

use qiita_core::avatar::Avatar;
use qiita_core::search::SEARCH_PLACEHOLDER;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::state::{Alert, App, AppMode};

const ALERT_TITLE: &str = "Failed to load articles.";
const ALERT_MESSAGE: &str = "Retry?";

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search bar
            Constraint::Min(5),    // articles
            Constraint::Length(3), // help
        ])
        .split(frame.area());

    render_search_bar(frame, app, chunks[0]);
    render_articles(frame, app, chunks[1]);
    render_help(frame, app, chunks[2]);

    if let AppMode::Alert(alert) = &app.mode {
        render_alert(frame, alert);
    }
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == AppMode::Searching;

    let mut spans = if app.search.text().is_empty() && !editing {
        vec![Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        vec![Span::raw(app.search.text().to_string())]
    };

    if editing {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let mut block = Block::default().borders(Borders::ALL).title("Qiita");
    if app.search.shows_cancel() {
        block = block.title_bottom(Line::from(" [Esc] cancel ").right_aligned());
    }

    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    frame.render_widget(Paragraph::new(Line::from(spans)).style(style).block(block), area);
}

fn avatar_spans(avatar: Option<&Avatar>) -> Vec<Span<'static>> {
    let placeholder = Avatar::placeholder();
    let avatar = avatar.unwrap_or(&placeholder);

    avatar
        .cells()
        .into_iter()
        .map(|([tr, tg, tb], [br, bg, bb])| {
            Span::styled(
                "▀",
                Style::default()
                    .fg(Color::Rgb(tr, tg, tb))
                    .bg(Color::Rgb(br, bg, bb)),
            )
        })
        .collect()
}

fn render_articles(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.presenter.row_count();

    let items: Vec<ListItem> = (0..rows)
        .filter_map(|index| {
            let row = app.presenter.row_content(index)?;

            let mut spans = avatar_spans(app.presenter.avatar(index));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(row.title, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!("  @{}", row.author_id),
                Style::default().fg(Color::DarkGray),
            ));

            Some(ListItem::new(Line::from(spans)))
        })
        .collect();

    let title = if app.is_loading() {
        "Articles (loading...)".to_string()
    } else {
        format!("Articles ({rows})")
    };

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

    app.list_state
        .select(if rows == 0 { None } else { Some(app.selected) });
    frame.render_stateful_widget(list, area, &mut app.list_state);

    // Borders take one line at the top and one at the bottom
    let height = area.height.saturating_sub(2) as usize;
    let offset = app.list_state.offset();
    app.visible_rows = offset..(offset + height).min(rows);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => "[/] search  [c] clear  [Enter] open  [j/k] move  [q] quit",
        AppMode::Searching => "[Enter] search  [Esc] cancel",
        AppMode::Alert(_) => "[r] retry  [Esc] cancel",
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{help_text}  |  {message}"),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_alert(frame: &mut Frame, alert: &Alert) {
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);

    let text = format!(
        "{ALERT_MESSAGE}\n\n{}\n\n[r] Retry  [Esc] Cancel",
        alert.error
    );

    let dialog = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(Block::default().title(ALERT_TITLE).borders(Borders::ALL));

    frame.render_widget(dialog, area);
}

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
