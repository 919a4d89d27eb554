use crate::controller::SearchController;
use crate::query::DebouncedQuery;
use crate::tmdb::{MovieRecord, TmdbApi, TmdbClient};
use crate::ui;
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Line commands standing in for click and ESC in a pointer-driven UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    CloseDetail,
    Select(usize),
}

/// Lines starting with ':' are commands; everything else edits the query.
pub fn parse_command(line: &str) -> Option<Command> {
    let rest = line.strip_prefix(':')?.trim();
    match rest {
        "q" | "quit" => Some(Command::Quit),
        "c" | "close" => Some(Command::CloseDetail),
        _ => rest.parse::<usize>().ok().map(Command::Select),
    }
}

/// The whole pipeline behind the terminal loop: debounced query in,
/// rendered cards out. Steps are synchronous so tests can drive them
/// directly; `run` wires the I/O around them.
pub struct App {
    tmdb: Arc<dyn TmdbApi>,
    query: DebouncedQuery,
    controller: SearchController,
}

impl App {
    pub fn new(tmdb: Arc<dyn TmdbApi>) -> Self {
        Self {
            tmdb,
            query: DebouncedQuery::default(),
            controller: SearchController::new(),
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn tmdb(&self) -> Arc<dyn TmdbApi> {
        self.tmdb.clone()
    }

    /// Handles one input line. Returns true when the app should exit.
    pub fn handle_line(&mut self, line: &str, now: Instant) -> bool {
        match parse_command(line) {
            Some(Command::Quit) => return true,
            Some(Command::CloseDetail) => self.controller.close_detail(),
            Some(Command::Select(n)) => {
                if !self.controller.select(n) {
                    self.controller.notify(format!("No card {n} to open"));
                }
            }
            None => self.query.set_at(line.trim(), now),
        }
        false
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.query.deadline()
    }

    /// Promotes a settled query into the controller; yields the query that
    /// now needs fetching, if any.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<String> {
        let settled = self.query.poll_at(now)?;
        self.controller.query_settled(&settled)
    }

    pub fn apply_fetch(&mut self, query: &str, outcome: Result<Vec<MovieRecord>>) {
        match outcome {
            Ok(movies) => self.controller.apply_results(query, movies),
            Err(e) => {
                warn!("Search for '{}' failed: {:#}", query, e);
                self.controller.apply_error(query, e.to_string());
            }
        }
    }

    /// One frame of output: pending notice, then the detail view when a
    /// card is open, otherwise the result list for the current phase.
    pub fn render(&mut self) -> String {
        let mut out = String::new();
        if let Some(notice) = self.controller.take_notice() {
            out.push_str(&ui::render_notice(&notice));
        }
        if let Some(movie) = self.controller.selected() {
            out.push_str(&ui::render_detail(movie));
        } else {
            out.push_str(&ui::render_phase(self.controller.phase()));
        }
        out
    }
}

enum Event {
    Line(String),
    Fetched {
        query: String,
        outcome: Result<Vec<MovieRecord>>,
    },
}

pub async fn run() -> Result<()> {
    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::from_env()?);
    run_with(tmdb).await
}

async fn run_with(tmdb: Arc<dyn TmdbApi>) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(32);

    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if input_tx.send(Event::Line(line)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    let mut app = App::new(tmdb.clone());
    print!("{}", ui::welcome());

    loop {
        let deadline = app.deadline();
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received (Ctrl+C)");
                break;
            }
            event = rx.recv() => {
                match event {
                    None => break,
                    Some(Event::Line(line)) => {
                        if app.handle_line(&line, Instant::now()) {
                            break;
                        }
                        print!("{}", app.render());
                    }
                    Some(Event::Fetched { query, outcome }) => {
                        app.apply_fetch(&query, outcome);
                        print!("{}", app.render());
                    }
                }
            }
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(query) = app.poll_debounce(Instant::now()) {
                    let tmdb = app.tmdb();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let outcome = tmdb.search_movies(&query).await;
                        let _ = tx.send(Event::Fetched { query, outcome }).await;
                    });
                }
                print!("{}", app.render());
            }
        }
    }
    Ok(())
}
