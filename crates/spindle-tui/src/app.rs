use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use spindle_core::{Activation, AppConfig, Carousel};

use crate::event::ImageLoadResult;
use crate::images::ImageCache;
use crate::input::Action;
use crate::theme::Theme;

/// UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The carousel strip
    Normal,
    /// Fullscreen overlay showing one logical image
    Fullscreen { logical: usize },
}

/// A fullscreen request waiting for its image to finish decoding.
/// The overlay must not open until the reference is confirmed loadable.
struct PendingFullscreen {
    logical: usize,
    path: String,
}

/// Application state: one carousel instance plus UI chrome
pub struct App {
    pub carousel: Carousel,
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub mode: Mode,
    pub cache: ImageCache,
    pub image_tx: UnboundedSender<ImageLoadResult>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Strip region recorded at render time, for pointer hit tests
    pub strip_area: Option<Rect>,
    /// (extended index, screen rect) of every slot drawn last frame
    pub slot_rects: Vec<(usize, Rect)>,
    hovering: bool,
    pending_fullscreen: Option<PendingFullscreen>,
    /// Last resize notification, held back for the quiet window
    pending_resize: Option<(Instant, u16, u16)>,
}

impl App {
    pub fn new(
        carousel: Carousel,
        config: Arc<AppConfig>,
        theme: Theme,
        image_tx: UnboundedSender<ImageLoadResult>,
    ) -> Self {
        Self {
            carousel,
            config,
            theme,
            mode: Mode::Normal,
            cache: ImageCache::new(),
            image_tx,
            status_message: None,
            should_quit: false,
            strip_area: None,
            slot_rects: Vec::new(),
            hovering: false,
            pending_fullscreen: None,
            pending_resize: None,
        }
    }

    /// Apply one input action
    pub fn dispatch(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Prev => {
                self.carousel.prev(now);
            }
            Action::Next => {
                self.carousel.next(now);
            }
            Action::TogglePlay => self.carousel.toggle_play(now),
            Action::ActivateCenter => {
                let center = self.carousel.track_index();
                self.activate(center, now);
            }
            Action::ActivateSlot(ext) => self.activate(ext, now),
            Action::CloseOverlay => {
                if matches!(self.mode, Mode::Fullscreen { .. }) {
                    self.mode = Mode::Normal;
                }
                self.pending_fullscreen = None;
                self.status_message = None;
            }
            Action::OpenExternal => self.open_external(),
            Action::NextImage => self.fullscreen_nav(1),
            Action::PrevImage => self.fullscreen_nav(-1),
            Action::HoverEnter => {
                self.hovering = true;
                self.carousel.hover_enter();
            }
            Action::HoverLeave => {
                self.hovering = false;
                self.carousel.hover_leave(now);
            }
            Action::None => {}
        }
    }

    fn activate(&mut self, ext: usize, now: Instant) {
        match self.carousel.activate(ext, now) {
            Activation::OpenFull { logical, full_ref } => {
                self.request_fullscreen(logical, full_ref);
            }
            Activation::Centering | Activation::Ignored => {}
        }
    }

    /// Ask for the fullscreen overlay; it opens immediately if the image
    /// is already decoded, otherwise once the decode completes. A failed
    /// decode degrades to a status message.
    fn request_fullscreen(&mut self, logical: usize, path: String) {
        if self.cache.is_ready(&path) {
            info!(logical, "opening fullscreen view");
            self.mode = Mode::Fullscreen { logical };
            self.pending_fullscreen = None;
            return;
        }
        if let Some(error) = self.cache.failure(&path) {
            self.status_message = Some(format!("Cannot open {path}: {error}"));
            return;
        }
        self.cache.request(&path, &self.image_tx);
        self.pending_fullscreen = Some(PendingFullscreen { logical, path });
    }

    /// Step the fullscreen overlay to the neighboring logical image
    fn fullscreen_nav(&mut self, direction: i64) {
        let Mode::Fullscreen { logical } = self.mode else {
            return;
        };
        let n = self.carousel.track().item_count() as i64;
        let next = (logical as i64 + direction).rem_euclid(n) as usize;
        let Some(item) = self.carousel.track().items().get(next) else {
            return;
        };
        let path = item.full_ref().to_string();
        self.request_fullscreen(next, path);
    }

    fn open_external(&mut self) {
        let Mode::Fullscreen { logical } = self.mode else {
            return;
        };
        let Some(item) = self.carousel.track().items().get(logical) else {
            return;
        };
        if let Err(e) = open::that(item.full_ref()) {
            warn!("failed to open external viewer: {}", e);
            self.status_message = Some("Could not open external viewer".to_string());
        }
    }

    /// Record a resize notification; applied after the quiet window in
    /// [`App::tick`] so resize storms trigger a single recomputation
    pub fn note_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.pending_resize = Some((now, width, height));
    }

    /// Drive debounced resizes and the carousel clocks
    pub fn tick(&mut self, now: Instant) {
        if let Some((at, w, h)) = self.pending_resize {
            let quiet = Duration::from_millis(self.config.ui.resize_debounce_ms);
            if now.saturating_duration_since(at) >= quiet {
                self.pending_resize = None;
                self.carousel.resize(w as u32, Some(h as u32));
            }
        }
        self.carousel.tick(now);
    }

    /// Completed image decode from the loader task
    pub fn on_image_loaded(&mut self, result: ImageLoadResult) {
        self.cache.apply(&result);

        let Some(pending) = &self.pending_fullscreen else {
            return;
        };
        match &result {
            ImageLoadResult::Loaded { path, .. } if *path == pending.path => {
                let logical = pending.logical;
                self.pending_fullscreen = None;
                info!(logical, "opening fullscreen view");
                self.mode = Mode::Fullscreen { logical };
            }
            ImageLoadResult::Failed { path, error } if *path == pending.path => {
                self.status_message = Some(format!("Cannot open {path}: {error}"));
                self.pending_fullscreen = None;
            }
            _ => {}
        }
    }

    /// Extended slot under a screen position, if any
    pub fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        self.slot_rects
            .iter()
            .find(|(_, rect)| contains(rect, column, row))
            .map(|(ext, _)| *ext)
    }

    pub fn in_strip(&self, column: u16, row: u16) -> bool {
        self.strip_area
            .map(|area| contains(&area, column, row))
            .unwrap_or(false)
    }

    #[inline]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

fn contains(rect: &Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;
    use spindle_core::Item;
    use tokio::sync::mpsc;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| {
                Item::new(
                    format!("thumb-{i}.jpg"),
                    Some(format!("full-{i}.jpg")),
                    format!("{i}"),
                )
            })
            .collect()
    }

    fn app(now: Instant) -> App {
        let mut config = AppConfig::default();
        config.carousel.autoplay_on_start = false;
        let carousel = Carousel::mount(items(7), &config.carousel, 120, Some(40), now).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(carousel, Arc::new(config), Theme::default(), tx)
    }

    #[test]
    fn resize_storm_applies_once_after_quiet_window() {
        let t0 = Instant::now();
        let mut app = app(t0);
        let before = *app.carousel.geometry();
        let quiet = Duration::from_millis(app.config.ui.resize_debounce_ms);

        app.note_resize(60, 30, t0);
        app.note_resize(50, 25, t0 + quiet / 4);
        let last = t0 + quiet / 2;
        app.note_resize(48, 20, last);

        // The last notification restarted the quiet window
        app.tick(last + quiet / 2);
        assert_eq!(*app.carousel.geometry(), before);

        app.tick(last + quiet);
        let expected = Carousel::mount(items(7), &app.config.carousel, 48, Some(20), t0).unwrap();
        assert_eq!(app.carousel.geometry(), expected.geometry());
        assert_ne!(*app.carousel.geometry(), before);
    }

    #[test]
    fn resize_inside_quiet_window_is_held_back() {
        let t0 = Instant::now();
        let mut app = app(t0);
        let before = *app.carousel.geometry();
        let quiet = Duration::from_millis(app.config.ui.resize_debounce_ms);

        app.note_resize(48, 20, t0);
        app.tick(t0 + quiet / 2);
        assert_eq!(*app.carousel.geometry(), before);

        app.tick(t0 + quiet);
        assert_ne!(*app.carousel.geometry(), before);
    }

    #[tokio::test]
    async fn fullscreen_opens_only_after_decode_succeeds() {
        let t0 = Instant::now();
        let mut app = app(t0);

        app.dispatch(Action::ActivateCenter, t0);
        assert_eq!(app.mode, Mode::Normal);

        app.on_image_loaded(ImageLoadResult::Loaded {
            path: "full-0.jpg".to_string(),
            image: DynamicImage::new_rgb8(2, 2),
        });
        assert_eq!(app.mode, Mode::Fullscreen { logical: 0 });
    }

    #[tokio::test]
    async fn failed_decode_degrades_to_status_message() {
        let t0 = Instant::now();
        let mut app = app(t0);

        app.dispatch(Action::ActivateCenter, t0);
        app.on_image_loaded(ImageLoadResult::Failed {
            path: "full-0.jpg".to_string(),
            error: "no such file".to_string(),
        });
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.status_message.is_some());

        // The request is gone; a late success for the same path no longer opens
        app.on_image_loaded(ImageLoadResult::Loaded {
            path: "full-0.jpg".to_string(),
            image: DynamicImage::new_rgb8(2, 2),
        });
        assert_eq!(app.mode, Mode::Normal);
    }

    #[tokio::test]
    async fn unrelated_decode_leaves_pending_request_waiting() {
        let t0 = Instant::now();
        let mut app = app(t0);

        app.dispatch(Action::ActivateCenter, t0);
        app.on_image_loaded(ImageLoadResult::Loaded {
            path: "full-3.jpg".to_string(),
            image: DynamicImage::new_rgb8(2, 2),
        });
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.status_message.is_none());

        app.on_image_loaded(ImageLoadResult::Loaded {
            path: "full-0.jpg".to_string(),
            image: DynamicImage::new_rgb8(2, 2),
        });
        assert_eq!(app.mode, Mode::Fullscreen { logical: 0 });
    }
}
