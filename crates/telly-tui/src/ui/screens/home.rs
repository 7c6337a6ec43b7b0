//! Home screen shown once the session is unlocked

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::ui::layout::{render_footer, render_header, ScreenLayout};

/// Draw the home screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let layout = ScreenLayout::new(area);

    render_header(frame, layout.header, Some(app.route.path().as_str()), theme);

    let block = Block::default()
        .title(" Home ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let favorites_line = match app.favorites.len() {
        0 => "No favorite shows yet".to_string(),
        1 => "1 favorite show".to_string(),
        n => format!("{} favorite shows", n),
    };

    let lines = vec![
        Line::styled("Unlocked", theme.success()),
        Line::raw(""),
        Line::styled(favorites_line, theme.text()),
    ];

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, layout.content);

    render_footer(
        frame,
        layout.footer,
        "[f] Favorites    [l] Lock    [q] Quit",
        app.status_message.as_deref(),
        theme,
    );
}
