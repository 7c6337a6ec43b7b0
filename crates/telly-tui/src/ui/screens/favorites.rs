//! Favorites list screen

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::App;
use crate::ui::layout::{render_footer, render_header, ScreenLayout};

const EMPTY_TEXT: &str = "You haven't added any favorites yet.";

/// Draw the favorites screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let layout = ScreenLayout::new(area);

    render_header(frame, layout.header, Some(app.route.path().as_str()), theme);

    let block = Block::default()
        .title(" Favorites ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    if app.favorites.is_empty() {
        let empty = Paragraph::new(EMPTY_TEXT)
            .style(theme.text_muted())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, layout.content);
    } else {
        let items: Vec<ListItem> = app
            .favorites
            .list()
            .iter()
            .map(|show| {
                let mut spans = vec![Span::styled(show.name.clone(), theme.text())];
                if !show.genres.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", show.genres.join(", ")),
                        theme.text_muted(),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selected())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(app.favorites_index));
        frame.render_stateful_widget(list, layout.content, &mut state);
    }

    render_footer(
        frame,
        layout.footer,
        "[\u{2191}\u{2193}] Move    [d] Remove    [b] Back    [l] Lock",
        app.status_message.as_deref(),
        theme,
    );
}
