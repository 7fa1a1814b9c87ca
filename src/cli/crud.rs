use std::path::PathBuf;

use clap::Parser;
use demandset::CrudFlag;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Set the CRUD action flag of a demand set")]
pub struct Crud {
    /// Path of the demand set document
    file: PathBuf,

    /// The new flag (NONE, CREATE, RETRIEVE, UPDATE or DELETE)
    #[clap(value_parser = super::parse_crud_flag)]
    flag: CrudFlag,
}

impl Crud {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        let mut set = super::load_set(&self.file)?;

        let previous = set.crud_flag();
        set.set_crud_flag(self.flag);
        set.save(&self.file)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", self.file.display()))?;

        tracing::info!("CRUD flag of demand set {}: {previous} -> {}", set.id(), self.flag);
        println!(
            "{}",
            format!("✅ Demand set {} flagged {}", set.id(), self.flag).success()
        );

        Ok(())
    }
}
