use std::path::{Path, PathBuf};

mod crud;
mod lock;
mod new;
mod profile;
mod show;
mod terminal;
mod validate;

use chrono::{DateTime, Utc};
use clap::ArgAction;
use crud::Crud;
use demandset::{Config, CrudFlag, DynamicDemandSet};
use lock::Lock;
use new::New;
use profile::Profile;
use show::Show;
use validate::Validate;

/// The configuration file looked up in the working directory.
const DEFAULT_CONFIG: &str = "dds.toml";

/// Parse a CRUD flag, normalizing to uppercase.
///
/// This is a CLI boundary function that accepts lowercase input
/// and normalizes it before parsing.
fn parse_crud_flag(s: &str) -> Result<CrudFlag, String> {
    s.to_uppercase().parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file (defaults to ./dds.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config_path = self
            .config
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
        let config = load_config(&config_path);

        self.command.run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Create a new demand set document
    New(New),

    /// Show a demand set
    Show(Show),

    /// Show the demand profile for a link
    Profile(Profile),

    /// Set the CRUD action flag
    Crud(Crud),

    /// Lock or unlock a demand set
    Lock(Lock),

    /// Check a demand set
    Validate(Validate),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::New(command) => command.run()?,
            Self::Show(command) => command.run(config)?,
            Self::Profile(command) => command.run()?,
            Self::Crud(command) => command.run()?,
            Self::Lock(command) => command.run()?,
            Self::Validate(command) => command.run(config)?,
        }
        Ok(())
    }
}

fn load_config(path: &Path) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

/// Load a demand set, naming the file in any error.
fn load_set(path: &Path) -> anyhow::Result<DynamicDemandSet> {
    DynamicDemandSet::load(path).map_err(|e| match e {
        demandset::LoadError::NotFound => {
            anyhow::anyhow!("No demand set found at {}", path.display())
        }
        other => anyhow::Error::new(other).context(format!("Failed to load {}", path.display())),
    })
}

/// Render a timestamp with the configured format.
///
/// Falls back to RFC 3339 if the format string is invalid.
fn format_timestamp(timestamp: DateTime<Utc>, format: &str) -> String {
    use std::fmt::Write;

    let mut rendered = String::new();
    if write!(rendered, "{}", timestamp.format(format)).is_err() {
        tracing::debug!("Invalid timestamp format '{format}', using RFC 3339");
        return timestamp.to_rfc3339();
    }
    rendered
}
