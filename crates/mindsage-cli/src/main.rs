mod opt;
mod surface;

use crate::opt::{Analyze, Cli, Commands, Journal, Mood, MoodArgs};
use crate::surface::TerminalSurface;
use anyhow::Result;
use clap::Parser;
use mindsage::model::mood::MoodEntry;
use mindsage::view::{JournalView, RenderSurface};
use mindsage::{AnalysisController, AuthToken, Config, Draft, EntryStore, MoodTracker, SimpleClient};
use mindsage_utils::tracing::TracingConfig;
use std::sync::Arc;
use std::time::Duration;

type Client = SimpleClient;

struct Session {
    store: EntryStore<Client>,
    analysis: AnalysisController<Client>,
    surface: TerminalSurface<std::io::Stdout>,
}

impl Session {
    fn new(client: &Arc<Client>) -> Self {
        Self {
            store: EntryStore::new(client.clone()),
            analysis: AnalysisController::new(client.clone()),
            surface: TerminalSurface::new(std::io::stdout()),
        }
    }

    fn render(&mut self, error: Option<&mindsage::error::Error>) {
        let mut view = JournalView::capture(&self.store, &self.analysis);
        if let Some(err) = error {
            view.push_error(err.clone());
        }
        self.surface.render(&view);
    }
}

async fn journal(client: &Arc<Client>, command: Journal, token: Option<&AuthToken>) -> Result<()> {
    let mut session = Session::new(client);
    match command {
        Journal::List { owner } => {
            // A failed fetch is part of the rendered view.
            let fetched = session.store.fetch_all(&owner, token).await;
            session.render(None);
            fetched?;
        }
        Journal::Add {
            owner,
            analyze,
            content,
        } => {
            let mut draft = Draft::new(content.join(" "));
            if analyze && let Err(err) = session.analysis.analyze(draft.as_str(), token).await {
                tracing::warn!(error = %err, "Continuing without analysis");
            }
            let saved = session.store.save(&owner, &mut draft, token).await;
            if saved.is_ok() {
                // The refresh is a separate outcome, its failure shows up as load state.
                let _ = session.store.fetch_all(&owner, token).await;
            }
            session.render(saved.as_ref().err());
            saved?;
        }
    }
    Ok(())
}

async fn analyze(client: &Arc<Client>, Analyze { text }: Analyze, token: Option<&AuthToken>) -> Result<()> {
    let mut session = Session::new(client);
    let analyzed = session.analysis.analyze(&text.join(" "), token).await;
    session.render(None);
    analyzed?;
    Ok(())
}

async fn mood(client: &Arc<Client>, command: Mood, token: Option<&AuthToken>) -> Result<()> {
    let tracker = MoodTracker::new(client.clone());
    match command {
        Mood::Add(MoodArgs {
            happiness,
            anxiety,
            energy,
            stress,
            activity,
            notes,
        }) => {
            let entry = MoodEntry {
                id: None,
                happiness,
                anxiety,
                energy,
                stress,
                activity: activity.unwrap_or_default(),
                notes: notes.unwrap_or_default(),
            };
            tracker.submit(&entry, token).await?;
            println!("Mood entry saved.");
        }
        Mood::List => {
            let entries = tracker.fetch_all(token).await?;
            if entries.is_empty() {
                println!("No mood entries yet.");
            }
            for entry in entries {
                let metrics = entry
                    .metrics()
                    .map(|(name, value)| format!("{name}={value:.0}"))
                    .join(" ");
                println!("{metrics}  {} {}", entry.activity, entry.notes);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    mindsage_utils::tracing::setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .build(),
    )?;

    let config = Config::new(cli.url).with_timeout(Duration::from_secs(cli.timeout_secs));
    let client = Arc::new(SimpleClient::new(config)?);
    let token = cli.token.map(AuthToken::new);
    let token = token.as_ref();

    match cli.command {
        Commands::Journal(command) => journal(&client, command, token).await,
        Commands::Analyze(command) => analyze(&client, command, token).await,
        Commands::Mood(command) => mood(&client, command, token).await,
    }
}
