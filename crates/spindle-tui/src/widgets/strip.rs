use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;

use super::render_halfblocks;

pub struct StripWidget;

impl StripWidget {
    /// Render the visible window of the extended track.
    ///
    /// Slot positions come straight from the track offset: the slot whose
    /// extended index is committed to the center sits at the horizontal
    /// middle of `area`, neighbors one step apart, fractional offsets
    /// rounded to cells mid-animation. Every drawn slot's screen rect is
    /// recorded on the app for mouse hit-testing.
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        app.strip_area = Some(area);
        app.slot_rects.clear();

        if area.width < 6 || area.height < 4 {
            return;
        }

        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.bg0)),
            area,
        );

        let geometry = *app.carousel.geometry();
        let step = geometry.step() as i64;
        let center_slot = geometry.center_slot() as i64;
        let offset = app.carousel.offset().round() as i64;
        let centered = app.carousel.centered_extended();
        let extended_len = app.carousel.track().extended_len();

        let item_width = (geometry.item_width as u16).min(area.width);
        let center_x = area.x as i64 + area.width as i64 / 2;
        let area_right = area.x as i64 + area.width as i64;

        for ext in 0..extended_len {
            let slot_center = center_x + offset + (ext as i64 - center_slot) * step;
            let left = slot_center - item_width as i64 / 2;
            let right = left + item_width as i64;
            if right <= area.x as i64 || left >= area_right {
                continue;
            }

            // Clip to the strip area; partially visible slots shrink
            let clipped_left = left.max(area.x as i64);
            let clipped_right = right.min(area_right);
            let width = (clipped_right - clipped_left) as u16;
            if width < 3 {
                continue;
            }

            let is_center = ext == centered;
            // Side items sit one row lower and two rows shorter, a cheap
            // stand-in for the web version's center scale-up
            let (y, height) = if is_center {
                (area.y, area.height)
            } else {
                (area.y + 1, area.height.saturating_sub(2))
            };
            let cell = Rect {
                x: clipped_left as u16,
                y,
                width,
                height,
            };

            Self::render_slot(frame, cell, app, ext, is_center);
            app.slot_rects.push((ext, cell));
        }
    }

    fn render_slot(frame: &mut Frame, cell: Rect, app: &mut App, ext: usize, is_center: bool) {
        let theme = &app.theme;
        let Some(item) = app.carousel.track().item(ext) else {
            return;
        };
        let label = item.label.clone();
        let thumbnail = item.thumbnail.clone();

        let (border_style, border_type) = if is_center {
            (
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                BorderType::Thick,
            )
        } else {
            (Style::default().fg(theme.bg2), BorderType::Plain)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .style(Style::default().bg(app.theme.bg0));
        if is_center {
            block = block.title(Span::styled(
                format!(" {} ", label),
                Style::default().fg(app.theme.fg1).add_modifier(Modifier::BOLD),
            ));
        }
        let inner = block.inner(cell);
        frame.render_widget(block, cell);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        app.cache.request(&thumbnail, &app.image_tx);
        if let Some(img) = app.cache.get(&thumbnail) {
            let img = img.clone();
            render_halfblocks(frame, inner, &img);
            if !is_center {
                // Dim side items instead of opacity
                frame.render_widget(
                    Block::default().style(Style::default().add_modifier(Modifier::DIM)),
                    inner,
                );
            }
        } else {
            let text = if app.cache.failure(&thumbnail).is_some() {
                Span::styled("✗", Style::default().fg(app.theme.red))
            } else {
                Span::styled("…", Style::default().fg(app.theme.grey))
            };
            let centered_row = Rect {
                x: inner.x,
                y: inner.y + inner.height / 2,
                width: inner.width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(Line::from(text)).alignment(ratatui::layout::Alignment::Center),
                centered_row,
            );
        }
    }
}
