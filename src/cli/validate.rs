use std::path::PathBuf;

use clap::Parser;
use demandset::{Config, DynamicDemandSet};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Check a demand set")]
pub struct Validate {
    /// Path of the demand set document
    file: PathBuf,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

impl Validate {
    #[instrument(skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let set = super::load_set(&self.file)?;

        if !set.is_valid() {
            anyhow::bail!("Demand set {} is not valid", set.id());
        }

        if !self.quiet {
            for warning in duplicate_link_warnings(&set, config) {
                println!("{}", warning.warning());
            }
        }

        if !self.quiet {
            println!(
                "{}",
                format!(
                    "✅ Demand set {} is valid ({} profiles)",
                    set.id(),
                    set.profiles().len()
                )
                .success()
            );
        }

        Ok(())
    }
}

/// Warnings for links that carry more than one profile, if the config asks
/// for them.
#[must_use]
pub fn duplicate_link_warnings(set: &DynamicDemandSet, config: &Config) -> Vec<String> {
    if !config.warn_on_duplicate_links {
        return Vec::new();
    }
    set.duplicate_link_ids()
        .into_iter()
        .map(|link_id| format!("⚠️  Link {link_id} has more than one profile"))
        .collect()
}
