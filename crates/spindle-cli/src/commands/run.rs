use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

use spindle_core::{AppConfig, Carousel, Item};
use spindle_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler, ImageLoadResult},
    input::{handle_key_event, handle_mouse_event},
    widgets::{FullscreenWidget, StatusBarWidget, StripWidget},
    Theme,
};

pub async fn run(config: Arc<AppConfig>, images_dir: PathBuf) -> Result<()> {
    let items = discover_items(&images_dir)?;
    info!(count = items.len(), dir = %images_dir.display(), "starting carousel");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("Spindle")
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, items).await;

    // Restore terminal on all exit paths; dropping the app also drops the
    // carousel and with it the autoplay deadline
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Arc<AppConfig>,
    items: Vec<Item>,
) -> Result<()> {
    let size = terminal.size()?;
    let carousel = Carousel::mount(
        items,
        &config.carousel,
        size.width as u32,
        Some(size.height as u32),
        Instant::now(),
    )?;

    // Channel for async image decode results
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();
    let mut app = App::new(carousel, config.clone(), Theme::default(), img_tx);

    let events = EventHandler::new(config.ui.tick_rate_ms);

    loop {
        // Drain completed image decodes (non-blocking)
        while let Ok(result) = img_rx.try_recv() {
            app.on_image_loaded(result);
        }

        match events.next()? {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, &app);
                app.dispatch(action, Instant::now());
            }
            Some(AppEvent::Mouse(mouse)) => {
                let action = handle_mouse_event(mouse, &app);
                app.dispatch(action, Instant::now());
            }
            Some(AppEvent::Resize(width, height)) => {
                app.note_resize(width, height, Instant::now());
            }
            Some(AppEvent::Tick) | None => {}
        }

        // Animation frames, autoplay deadline, debounced resize
        app.tick(Instant::now());

        terminal.draw(|frame| ui(frame, &mut app))?;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn ui(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if let Mode::Fullscreen { logical } = app.mode {
        FullscreenWidget::render(frame, area, app, logical);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(" Spindle").style(
        Style::default()
            .fg(app.theme.fg1)
            .bg(app.theme.bg1)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, chunks[0]);

    StripWidget::render(frame, chunks[1], app);
    StatusBarWidget::render(frame, chunks[2], app);
}

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Scan a directory for images, sorted by filename. A `full/`
/// subdirectory holding a file of the same name provides the full-size
/// reference for that item.
fn discover_items(dir: &Path) -> Result<Vec<Item>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading image directory {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_image_extension(path))
        .collect();
    paths.sort();

    let items: Vec<Item> = paths
        .into_iter()
        .map(|path| {
            let label = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("image")
                .to_string();
            let full = path
                .file_name()
                .map(|name| dir.join("full").join(name))
                .filter(|candidate| candidate.is_file())
                .map(|candidate| candidate.display().to_string());
            Item::new(path.display().to_string(), full, label)
        })
        .collect();

    if items.is_empty() {
        return Err(anyhow!("no images found in {}", dir.display()));
    }
    Ok(items)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
