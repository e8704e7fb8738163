mod app;
mod cli;
mod config;
mod controller;
mod error;
mod input;
mod llm;
mod models;
mod orchestrator;
mod prompt;
mod review;
mod store;
mod theme;
mod ui;
mod utils;

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use crossterm::event::{
    Event, EventStream, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::{self, Duration};
use tracing_subscriber::EnvFilter;

use app::App;
use cli::{parse_args, CliConfig, VERSION};
use config::Config;
use controller::FormController;
use llm::{EchoGenerator, GeminiClient, TextGenerator};
use review::LogSink;

/// Animation frame interval
const TICK_MS: u64 = 80;

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    // Set when Shift-Enter can be told apart from Enter
    enhanced_keys: bool,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;
        let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )
            .is_ok();
        tracing::debug!(enhanced_keys, "terminal ready");
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("create terminal")?;
        terminal.clear().context("clear terminal")?;
        Ok(Self {
            terminal,
            enhanced_keys,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enhanced_keys {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Send logs to a file; stdout belongs to the UI
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let path = config.log_path();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn build_generator(cli: &CliConfig) -> anyhow::Result<Arc<dyn TextGenerator>> {
    if cli.offline {
        tracing::info!("offline mode, echoing initial feedback");
        return Ok(Arc::new(EchoGenerator));
    }
    let client = GeminiClient::new(cli.config.gemini())
        .context("configure Gemini client (use --offline to run without one)")?;
    tracing::info!(model = client.model(), "using Gemini");
    Ok(Arc::new(client))
}

async fn run(app: &mut App) -> anyhow::Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let mut events = EventStream::new();
    let mut ticker = time::interval(Duration::from_millis(TICK_MS));

    while !app.should_quit {
        app.apply_generation_results();
        guard
            .terminal
            .draw(|frame| ui::draw(frame, app))
            .context("draw frame")?;

        tokio::select! {
            _ = ticker.tick() => app.tick(),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(anyhow::Error::new(err).context("read terminal event")),
                None => break,
            },
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = parse_args().context("load configuration")?;
    init_logging(&cli.config)?;
    tracing::info!(version = VERSION, "peer-review-tui starting");

    let generator = build_generator(&cli)?;
    let controller = FormController::new(
        generator,
        cli.config.stale_results,
        Box::new(LogSink::default()),
    );
    let mut app = App::new(controller);

    let result = run(&mut app).await;
    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal loop failed");
    }
    result?;

    match app.submission {
        Some(submission) => {
            let json = serde_json::to_string_pretty(&submission).context("serialize review")?;
            println!("{}", json);
        }
        None => {
            let in_flight = app.controller.in_flight();
            if in_flight > 0 {
                tracing::info!(in_flight, "exiting with generations still running");
            }
            eprintln!("No review submitted. Log: {}", cli.config.log_path().display());
        }
    }
    Ok(())
}
