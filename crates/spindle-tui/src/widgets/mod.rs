mod status_bar;
mod strip;
mod viewer;

pub use status_bar::StatusBarWidget;
pub use strip::StripWidget;
pub use viewer::FullscreenWidget;

use image::{DynamicImage, GenericImageView};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render an image into `area` using halfblock characters, preserving
/// aspect ratio and centering. Each cell carries two vertical pixels
/// (foreground over background on `▀`).
pub(crate) fn render_halfblocks(frame: &mut Frame, area: Rect, img: &DynamicImage) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let target_width = area.width as u32;
    let target_height = (area.height as u32) * 2;

    let (img_width, img_height) = img.dimensions();
    if img_width == 0 || img_height == 0 {
        return;
    }
    let scale_w = target_width as f32 / img_width as f32;
    let scale_h = target_height as f32 / img_height as f32;
    let scale = scale_w.min(scale_h);

    let new_width = ((img_width as f32 * scale) as u32).max(1);
    let new_height = ((img_height as f32 * scale) as u32).max(1);

    let resized = img.resize_exact(new_width, new_height, image::imageops::FilterType::Triangle);
    let rgba = resized.to_rgba8();

    // An odd pixel height still needs its last row drawn, on a half-filled cell
    let rows = new_height.div_ceil(2);
    let x_offset = (target_width.saturating_sub(new_width)) / 2;
    let y_offset = (area.height as u32).saturating_sub(rows) / 2;

    for row in 0..rows {
        let y = row * 2;
        let mut spans: Vec<Span> = Vec::with_capacity(target_width as usize);

        if x_offset > 0 {
            spans.push(Span::raw(" ".repeat(x_offset as usize)));
        }

        for x in 0..new_width {
            let top_pixel = rgba.get_pixel(x, y);
            let mut style =
                Style::default().fg(Color::Rgb(top_pixel[0], top_pixel[1], top_pixel[2]));
            // A missing bottom pixel leaves the cell background showing
            if y + 1 < new_height {
                let bottom_pixel = rgba.get_pixel(x, y + 1);
                style = style.bg(Color::Rgb(
                    bottom_pixel[0],
                    bottom_pixel[1],
                    bottom_pixel[2],
                ));
            }

            spans.push(Span::styled("▀", style));
        }

        let line_area = Rect {
            x: area.x,
            y: area.y + (y_offset + row).min(u16::MAX as u32) as u16,
            width: area.width,
            height: 1,
        };

        if line_area.y < area.y + area.height {
            frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
        }
    }
}
