use std::path::PathBuf;

use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Lock or unlock a demand set")]
pub struct Lock {
    /// Path of the demand set document
    file: PathBuf,

    /// Lock (true) or unlock (false) for editing
    #[arg(long, value_name = "BOOL")]
    edit: Option<bool>,

    /// Lock (true) or unlock (false) for history
    #[arg(long, value_name = "BOOL")]
    history: Option<bool>,
}

impl Lock {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        if self.edit.is_none() && self.history.is_none() {
            anyhow::bail!("Nothing to do: pass --edit and/or --history");
        }

        let mut set = super::load_set(&self.file)?;

        if let Some(locked) = self.edit {
            set.set_locked_for_edit(locked);
        }
        if let Some(locked) = self.history {
            set.set_locked_for_history(locked);
        }

        set.save(&self.file)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", self.file.display()))?;

        println!(
            "{}",
            format!(
                "✅ Demand set {} locked: edit={} history={}",
                set.id(),
                set.is_locked_for_edit(),
                set.is_locked_for_history()
            )
            .success()
        );

        Ok(())
    }
}
