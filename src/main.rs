mod app;
mod command;
mod config;
mod error;
mod event;
mod follow;
mod github;
mod logging;
mod query;
mod search;
#[cfg(test)]
mod test_utils;
mod ticker;
mod ui;

use app::App;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::AppEvent;
use futures::StreamExt;
use github::client::GithubClient;
use search::recent::{FileStorage, RecentSearches};
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "ghseek", about = "Look up GitHub users from the terminal")]
struct Cli {
    #[arg(help = "Login to look up on startup")]
    login: Option<String>,

    #[arg(long, short, help = "Path to config file")]
    config: Option<PathBuf>,
}

// UI state lives on a single task; network calls are spawned onto the same thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config);

    if let Err(e) = logging::init(&config.resolved_log_path()) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::info!(?config, "starting ghseek");

    let client = GithubClient::new(config.github_token.as_deref())?;
    let recent = RecentSearches::load(Box::new(FileStorage::new(config.resolved_recent_path())));

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let tick = config.tick();
    let mut app = App::new(config, recent, tx.clone());
    app.start(cli.login.as_deref());

    // Install panic hook before entering raw mode so terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let input_tx = tx.clone();
    let input_handle = tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(_, _) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(e) = app_event {
                if input_tx.send(e).is_err() {
                    break;
                }
            }
        }
    });

    let ticker_handle = tokio::spawn(ticker::start_ticker(tx.clone(), tick));

    loop {
        for command in app.take_commands() {
            github::dispatch::spawn(&client, command, &tx);
        }

        terminal.draw(|f| app.render(f))?;

        let first = match rx.recv().await {
            Some(e) => e,
            None => break,
        };
        app.handle_event(first);
        while let Ok(pending) = rx.try_recv() {
            app.handle_event(pending);
        }

        if app.should_quit {
            break;
        }
    }

    input_handle.abort();
    ticker_handle.abort();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("ghseek exited");
    Ok(())
}
