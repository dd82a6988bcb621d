use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "noty - a personal logbook client",
    long_about = "noty talks to a Noty logbook server: record entries (optionally polished by AI), browse the timeline, pick the assistant persona, and manage AI and GitHub settings."
)]
pub struct Cli {
    /// Base URL of the logbook server. Overrides the config file and NOTY_API_URL.
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shows logbook entries, newest first.
    Timeline {
        #[arg(long, help = "Only show entries for this date (format: YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Records a new entry.
    New {
        #[arg(short = 'm', long, help = "Entry content (markdown)")]
        content: String,
        #[arg(short, long, help = "Comma-separated tags")]
        tags: Option<String>,
        #[arg(short, long, help = "General, Work, Personal, Project Noty, or any label")]
        category: Option<String>,
        #[arg(long, help = "Neutral, Productive, Tired, Excited, or Stressed")]
        mood: Option<String>,
        #[arg(long, help = "Entry date (format: YYYY-MM-DD). Defaults to today")]
        date: Option<String>,
        #[arg(long, help = "Entry time (format: HH:MM or HH:MM:SS). Defaults to now")]
        time: Option<String>,
        #[arg(long, help = "Let the AI polish the content before saving")]
        polish: bool,
    },

    /// Deletes an entry by id.
    Delete {
        #[arg(help = "The numeric id of the entry")]
        id: i64,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Lists assistant personas.
    Personas,

    /// Makes a persona the active one.
    Activate {
        #[arg(help = "The numeric id of the persona")]
        id: i64,
    },

    /// Shows user and AI settings.
    Settings,

    /// Updates user and AI settings. Omitted fields keep their current value.
    SetSettings {
        #[arg(long)]
        username: Option<String>,
        #[arg(long, help = "One of the ids printed by `noty models`")]
        model: Option<String>,
        #[arg(long, help = "New AI API key. The stored key is kept when omitted")]
        api_key: Option<String>,
    },

    /// Shows the GitHub integration.
    Github,

    /// Updates the GitHub integration. Omitted fields keep their current value.
    SetGithub {
        #[arg(long, help = "Repository in owner/repo form")]
        repo: Option<String>,
        #[arg(long, help = "New access token. The stored token is kept when omitted")]
        token: Option<String>,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },

    /// Sends one message to the active persona.
    Chat {
        message: String,
    },

    /// Lists the selectable AI models.
    Models,
}
