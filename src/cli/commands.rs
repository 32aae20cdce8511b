//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mindvault")]
#[command(about = "Personal mood journal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Field values shared by `new` and `edit`
#[derive(clap::Args, Debug, Default)]
pub struct EntryArgs {
    /// Entry title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Entry text
    #[arg(short, long)]
    pub content: Option<String>,

    /// Mood (radiant, happy, neutral, down, gloomy)
    #[arg(short, long)]
    pub mood: Option<String>,

    /// Image file to attach
    #[arg(short, long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new vault
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Write a new entry
    New {
        #[command(flatten)]
        entry: EntryArgs,
    },

    /// List entries, newest first
    List {
        /// Only show entries whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show a single entry
    Show {
        /// Entry id
        id: String,
    },

    /// Change an existing entry
    Edit {
        /// Entry id
        id: String,

        #[command(flatten)]
        entry: EntryArgs,

        /// Remove the attached image
        #[arg(long, conflicts_with = "image")]
        clear_image: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Mood analytics
    Stats,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
