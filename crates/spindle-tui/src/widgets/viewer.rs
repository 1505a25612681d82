use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

use super::render_halfblocks;

pub struct FullscreenWidget;

impl FullscreenWidget {
    /// Render the fullscreen overlay for one logical image
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App, logical: usize) {
        let theme = app.theme.clone();

        frame.render_widget(
            Block::default()
                .style(Style::default().bg(theme.bg0))
                .borders(Borders::NONE),
            area,
        );

        let item_count = app.carousel.track().item_count();
        let Some(item) = app.carousel.track().items().get(logical) else {
            Self::render_message(frame, area, "Image not found", &theme);
            return;
        };
        let path = item.full_ref().to_string();
        let label = item.label.clone();

        let status_height = 1;
        let image_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height.saturating_sub(status_height),
        };
        let status_area = Rect {
            x: area.x,
            y: area.y + image_area.height,
            width: area.width,
            height: status_height,
        };

        if let Some(img) = app.cache.get(&path) {
            let img = img.clone();
            render_halfblocks(frame, image_area, &img);
        } else if app.cache.is_loading(&path) {
            Self::render_message(frame, image_area, "Loading image...", &theme);
        } else {
            // The overlay only opens after a successful decode; reaching
            // this means the cache was dropped out from under us
            Self::render_message(frame, image_area, "Image not loaded", &theme);
        }

        Self::render_status_bar(frame, status_area, logical + 1, item_count, &label, &theme);
    }

    fn render_status_bar(
        frame: &mut Frame,
        area: Rect,
        current: usize,
        total: usize,
        label: &str,
        theme: &Theme,
    ) {
        let status = Line::from(vec![
            Span::styled(
                format!(" {} {}/{} ", label, current, total),
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("←/→", Style::default().fg(theme.aqua)),
            Span::styled(" navigate ", Style::default().fg(theme.fg0)),
            Span::styled("o", Style::default().fg(theme.aqua)),
            Span::styled(" open externally ", Style::default().fg(theme.fg0)),
            Span::styled("q/Esc", Style::default().fg(theme.aqua)),
            Span::styled(" close", Style::default().fg(theme.fg0)),
        ]);

        let paragraph = Paragraph::new(status).style(Style::default().bg(theme.bg1));
        frame.render_widget(paragraph, area);
    }

    fn render_message(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
        let message = Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.grey).add_modifier(Modifier::ITALIC),
        ));
        let paragraph = Paragraph::new(message)
            .style(Style::default().bg(theme.bg0))
            .alignment(ratatui::layout::Alignment::Center);

        let centered_area = Rect {
            x: area.x,
            y: area.y + area.height / 2,
            width: area.width,
            height: 1,
        };
        frame.render_widget(paragraph, centered_area);
    }
}
