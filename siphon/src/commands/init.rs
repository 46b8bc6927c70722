use std::path::PathBuf;

use clap::Args;
use dialoguer::{Input, theme::ColorfulTheme};
use eyre::{Context, Result};
use siphon_manifest::{MANIFEST_FILE, parse_manifest, starter_manifest};

use super::UnwrapOrExit;
use crate::files::{File, WriteResult};

#[derive(Args)]
pub struct InitCommand {
    /// GraphQL endpoint URL (prompted for when omitted)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Directory to write siphon.toml into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let endpoint = match &self.endpoint {
            Some(url) => url.clone(),
            None => Self::prompt_endpoint()?,
        };

        let path = self.output.join(MANIFEST_FILE);
        let content = starter_manifest(&endpoint);
        parse_manifest(&content, &path.display().to_string()).unwrap_or_exit();

        let file = File::new(path, content).if_missing();
        match file.write()? {
            WriteResult::Written => {
                println!("Created {}", file.path().display());
                println!("\nNext steps:");
                println!("  siphon introspect   # list the endpoint's types");
                println!("  siphon columns <TYPE>");
            }
            WriteResult::Skipped => {
                println!("{} already exists, leaving it as is", file.path().display());
            }
        }

        Ok(())
    }

    fn prompt_endpoint() -> Result<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("GraphQL endpoint URL")
            .with_initial_text("https://")
            .interact_text()
            .wrap_err("Failed to read endpoint URL")
    }
}
