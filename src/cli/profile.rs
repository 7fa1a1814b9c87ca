use std::path::PathBuf;

use clap::Parser;
use demandset::DemandProfile;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Display the demand profile for a link")]
pub struct Profile {
    /// Path of the demand set document
    file: PathBuf,

    /// The link to look up
    link_id: i64,

    /// Print the profile as JSON
    #[arg(long)]
    json: bool,
}

impl Profile {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let set = super::load_set(&self.file)?;

        let Some(profile) = set.profile_at_link(self.link_id) else {
            anyhow::bail!(
                "Demand set {} has no profile for link {}",
                set.id(),
                self.link_id
            );
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(profile)?);
        } else {
            output_pretty(profile);
        }

        if set.duplicate_link_ids().contains(&self.link_id) {
            println!(
                "\n{}",
                format!(
                    "⚠️  Link {} has more than one profile; showing the first",
                    self.link_id
                )
                .warning()
            );
        }

        Ok(())
    }
}

fn output_pretty(profile: &DemandProfile) {
    println!("# Link {}", profile.link_id);
    if let Some(destination) = profile.destination_link_id {
        println!("  Destination: link {destination}");
    }
    println!("  Start time:  {}s", profile.start_time);
    println!("  Sample rate: {}s", profile.sample_rate);
    println!("  Knob:        {}", profile.knob);

    if !profile.demand.is_empty() {
        println!("\n{}", "Demand".dim());
        let mut offset = profile.start_time;
        for sample in &profile.demand {
            println!("  {offset:>8}s  {sample}");
            offset += profile.sample_rate;
        }
    }
}
