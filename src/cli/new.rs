use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use demandset::{CrudFlag, DynamicDemandSet};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Create a new demand set document")]
pub struct New {
    /// Path of the document to create
    file: PathBuf,

    /// Identifier of the demand set
    #[arg(long)]
    id: i64,

    /// Name of the demand set
    #[arg(long, short)]
    name: Option<String>,

    /// Description of the demand set
    #[arg(long, short)]
    description: Option<String>,

    /// Identifier of the estimation run that produced the set
    #[arg(long)]
    app_run_id: i64,

    /// Simulation time of the estimate (RFC 3339, e.g. 2013-06-01T08:15:00Z)
    #[arg(long, value_name = "TIMESTAMP")]
    estimated_at: Option<DateTime<Utc>>,
}

impl New {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        if self.file.exists() {
            anyhow::bail!("Refusing to overwrite existing file {}", self.file.display());
        }

        let mut set = DynamicDemandSet::default();
        set.set_id(self.id);
        if let Some(name) = self.name {
            set.set_name(name);
        }
        set.set_description(self.description);
        set.set_app_run_id(self.app_run_id);
        set.set_estimation_timestamp(self.estimated_at);
        set.set_crud_flag(CrudFlag::Create);
        set.profiles_mut();

        set.save(&self.file)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", self.file.display()))?;

        tracing::info!("Created demand set {} at {}", set.id(), self.file.display());
        println!(
            "{}",
            format!("✅ Created demand set {} in {}", set.id(), self.file.display()).success()
        );

        Ok(())
    }
}
