use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use jester_core::{Item, ItemId};
use jester_logging::jester_warn;

use super::config::CONFIG_FILENAME;
use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "jester",
    version,
    about = "Collect dad jokes, vote on them, keep the best at the top",
    long_about = None
)]
pub struct Cli {
    /// Directory holding the joke collection, config and log file.
    #[arg(long, global = true, default_value = ".jester")]
    pub data_dir: PathBuf,

    /// Config file; defaults to `jester.ron` inside the data directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to `jester.log` in the data directory.
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the collection, best-voted first (default).
    List,
    /// Fetch a batch of new jokes.
    Fetch {
        /// How many new jokes to fetch; defaults to `jokes_per_fetch` from the config.
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Upvote a joke by id or unique id prefix.
    Up { id: String },
    /// Downvote a joke by id or unique id prefix.
    Down { id: String },
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.data_dir.join(CONFIG_FILENAME))
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_file {
            LogDestination::Both
        } else {
            LogDestination::Terminal
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::List)
    }
}

/// Resolves user input to a joke id.
///
/// A full UUID is taken as-is, even if no joke carries it. Anything else is
/// matched as a prefix of the known ids; no match yields `None`.
pub fn resolve_id(input: &str, items: &[Item]) -> anyhow::Result<Option<ItemId>> {
    let input = input.trim();
    if let Ok(id) = ItemId::parse_str(input) {
        return Ok(Some(id));
    }

    let needle = input.to_ascii_lowercase();
    let matches: Vec<ItemId> = items
        .iter()
        .map(|item| item.id)
        .filter(|id| !needle.is_empty() && id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [] => {
            jester_warn!("No joke id starts with {:?}", input);
            Ok(None)
        }
        [id] => Ok(Some(*id)),
        _ => bail!("id prefix {input:?} matches {} jokes; use more characters", matches.len()),
    }
}
