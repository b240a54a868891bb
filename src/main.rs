//! keepsake-tui entry point
//!
//! Wires the pieces together: CLI, file logging, manifest discovery, photo
//! decoding, the audio thread, and the ratatui event loop.

mod app;
mod audio;
mod cli;
mod flow;
mod models;
mod theme;
mod ui;
mod utils;

use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing_subscriber::EnvFilter;

use app::{Action, App};
use audio::{Player, PlayerEvent};
use cli::Cli;
use models::MediaManifest;
use ui::Photo;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = cli::resolve_log_path(&cli)?;
    init_tui_tracing_to_file(log_path.as_path())?;

    let (manifest, manifest_path) = MediaManifest::find(&cli.assets_dir, cli.manifest.as_deref())
        .context("load media manifest")?;
    match manifest_path {
        Some(ref path) => tracing::info!("manifest loaded from {}", path.display()),
        None => tracing::info!("using the built-in manifest"),
    }
    let resolved = manifest.resolve(&cli.assets_dir);

    let photos: Vec<Option<Photo>> = resolved.photos.iter().map(|p| Photo::load(p)).collect();
    let decoded = photos.iter().filter(|p| p.is_some()).count();
    tracing::info!("decoded {}/{} album photos", decoded, photos.len());

    let (event_tx, event_rx) = unbounded_channel::<PlayerEvent>();
    let player = Player::new(resolved.music.clone(), resolved.video.clone(), event_tx);
    let mut app = App::new(manifest, resolved, photos, player, cli.clamped_volume());

    let mut terminal = init_terminal()?;
    let run_result = run_app_loop(&mut terminal, &mut app, event_rx).await;
    let restore_result = restore_terminal(&mut terminal);
    tracing::info!(
        "session ended after {}",
        utils::format_duration(app.session_start.elapsed())
    );
    restore_result?;
    run_result
}

fn init_tui_tracing_to_file(log_path: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;
    let writer = Arc::new(Mutex::new(file));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(move || FileLogWriter::new(Arc::clone(&writer)))
        .try_init();
    Ok(())
}

struct FileLogWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl FileLogWriter {
    fn new(file: Arc<Mutex<std::fs::File>>) -> Self {
        Self { file }
    }
}

impl Write for FileLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut guard) = self.file.lock() {
            guard.write_all(buf)?;
            return Ok(buf.len());
        }
        Err(io::Error::other("failed to lock log file"))
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Ok(mut guard) = self.file.lock() {
            guard.flush()?;
            return Ok(());
        }
        Err(io::Error::other("failed to lock log file"))
    }
}

async fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: UnboundedReceiver<PlayerEvent>,
) -> Result<()> {
    let (action_tx, mut action_rx) = unbounded_channel::<Action>();

    spawn_input_task(action_tx.clone());
    spawn_player_event_task(action_tx.clone(), event_rx);

    loop {
        app.on_tick();
        terminal.draw(|frame| ui::render(frame, app))?;
        if app.should_quit {
            break;
        }

        tokio::select! {
            maybe_action = action_rx.recv() => {
                if let Some(action) = maybe_action {
                    app.handle_action(action);
                } else {
                    break;
                }
            }
            _ = tokio::time::sleep(Duration::from_millis(120)) => {
                app.on_tick();
            }
        }
    }
    Ok(())
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_task(action_tx: UnboundedSender<Action>) {
    tokio::task::spawn_blocking(move || {
        loop {
            // Runtime shutdown waits for blocking tasks; exit as soon as
            // the app loop has dropped its receiver.
            if action_tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) => {
                        if action_tx.send(Action::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
}

fn spawn_player_event_task(
    action_tx: UnboundedSender<Action>,
    mut event_rx: UnboundedReceiver<PlayerEvent>,
) {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if action_tx.send(Action::Player(event)).is_err() {
                break;
            }
        }
    });
}
