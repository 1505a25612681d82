use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let play_str = if app.carousel.is_playing() {
            ("▶ PLAY", theme.green)
        } else {
            ("⏸ PAUSE", theme.yellow)
        };

        let current = app.carousel.current();
        let total = app.carousel.track().item_count();
        let label = app
            .carousel
            .track()
            .items()
            .get(current)
            .map(|item| item.label.clone())
            .unwrap_or_default();

        let status_text = if let Some(msg) = &app.status_message {
            msg.clone()
        } else {
            format!(" {} | {}/{} {}", play_str.0, current + 1, total, label)
        };

        let help_hint = " q:quit ←/→:move Space:play Enter:view ";
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.chars().count() as u16)
            as usize;

        let status_style = if app.status_message.is_some() {
            Style::default().fg(theme.red).bg(theme.bg2)
        } else {
            Style::default()
                .fg(play_str.1)
                .bg(theme.bg2)
                .add_modifier(Modifier::BOLD)
        };

        let line = Line::from(vec![
            Span::styled(status_text, status_style),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
