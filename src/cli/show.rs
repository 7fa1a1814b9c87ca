use std::{io, path::PathBuf};

use clap::Parser;
use demandset::{Config, DynamicDemandSet, DynamicDemandSetData, storage::document};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Display a demand set")]
pub struct Show {
    /// Path of the demand set document
    file: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Yaml,
}

impl Show {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut set = super::load_set(&self.file)?;

        match self.output {
            OutputFormat::Pretty => Self::output_pretty(&mut set, config),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(normalised_data(&mut set))?);
            }
            OutputFormat::Yaml => {
                document::write(normalised_data(&mut set), &mut io::stdout().lock())?;
            }
        }

        Ok(())
    }

    fn output_pretty(set: &mut DynamicDemandSet, config: &Config) {
        // Header
        println!("# Demand set {}", set.id());
        if !set.name().is_empty() {
            println!("{}", set.name());
        }
        if let Some(description) = set.description() {
            println!("\n{description}");
        }

        // Metadata
        println!("\n{}", "Metadata".dim());
        println!("  CRUD flag:  {}", set.crud_flag());
        println!("  Mod stamp:  {}", set.mod_stamp().unwrap_or("-"));
        println!(
            "  Locked:     edit={} history={}",
            set.is_locked_for_edit(),
            set.is_locked_for_history()
        );

        // Provenance
        println!("\n{}", "Estimation".dim());
        println!("  Run:        {}", set.app_run_id());
        match set.estimation_timestamp() {
            Some(timestamp) => println!(
                "  Estimated:  {}",
                super::format_timestamp(timestamp, config.timestamp_format())
            ),
            None => println!("  Estimated:  -"),
        }

        // Profiles
        let profiles = set.profiles();
        println!("\n{}", format!("Profiles ({})", profiles.len()).dim());
        for profile in profiles {
            let destination = profile
                .destination_link_id
                .map_or_else(String::new, |id| format!(" -> link {id}"));
            println!(
                "  • link {}{destination}: {} samples",
                profile.link_id,
                profile.demand.len()
            );
        }
    }
}

/// The raw data with the CRUD flag materialised, so every output format
/// reports the same flag.
pub fn normalised_data(set: &mut DynamicDemandSet) -> &DynamicDemandSetData {
    set.crud_flag();
    set.data()
}
