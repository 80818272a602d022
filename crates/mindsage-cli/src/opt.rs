use clap::{Args, Parser, Subcommand};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "mindsage", about = "Journal, analyze and track moods with a MindSage service")]
pub(crate) struct Cli {
    #[arg(long, env = "MINDSAGE_URL", default_value = "http://localhost:5000/")]
    pub(crate) url: Url,

    /// Bearer token of the signed in user.
    #[arg(long, env = "MINDSAGE_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,

    #[arg(long, default_value_t = 30)]
    pub(crate) timeout_secs: u64,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    #[command(subcommand)]
    Journal(Journal),

    /// Analyze text without saving it.
    Analyze(Analyze),

    #[command(subcommand)]
    Mood(Mood),
}

#[derive(Debug, Subcommand)]
pub(crate) enum Journal {
    List {
        #[arg(short, long)]
        owner: String,
    },
    Add {
        #[arg(short, long)]
        owner: String,
        /// Analyze the draft before saving it.
        #[arg(long)]
        analyze: bool,
        #[arg(required = true)]
        content: Vec<String>,
    },
}

#[derive(Debug, Parser)]
pub(crate) struct Analyze {
    #[arg(required = true)]
    pub(crate) text: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mood {
    Add(MoodArgs),
    List,
}

#[derive(Debug, Args)]
pub(crate) struct MoodArgs {
    #[arg(long, default_value_t = 50.0)]
    pub(crate) happiness: f64,
    #[arg(long, default_value_t = 50.0)]
    pub(crate) anxiety: f64,
    #[arg(long, default_value_t = 50.0)]
    pub(crate) energy: f64,
    #[arg(long, default_value_t = 50.0)]
    pub(crate) stress: f64,
    #[arg(long)]
    pub(crate) activity: Option<String>,
    #[arg(long)]
    pub(crate) notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_journal_add() {
        let cli = Cli::try_parse_from([
            "mindsage",
            "--url",
            "http://journal.test/api",
            "--token",
            "abc",
            "journal",
            "add",
            "--owner",
            "user-1",
            "--analyze",
            "Long",
            "day",
        ])
        .unwrap();
        assert_eq!(cli.url.as_str(), "http://journal.test/api");
        assert_eq!(cli.token.as_deref(), Some("abc"));
        let (owner, analyze, content) = match cli.command {
            Commands::Journal(Journal::Add { owner, analyze, content }) => (owner, analyze, content),
            other => panic!("unexpected command {other:?}"),
        };
        assert_eq!(owner, "user-1");
        assert!(analyze);
        assert_eq!(content, ["Long", "day"]);
    }

    #[test]
    fn mood_defaults() {
        let cli = Cli::try_parse_from(["mindsage", "mood", "add", "--stress", "80"]).unwrap();
        let args = match cli.command {
            Commands::Mood(Mood::Add(args)) => args,
            other => panic!("unexpected command {other:?}"),
        };
        assert!((args.stress - 80.0).abs() < f64::EPSILON);
        assert!((args.happiness - 50.0).abs() < f64::EPSILON);
        assert_eq!(args.activity, None);
    }
}
