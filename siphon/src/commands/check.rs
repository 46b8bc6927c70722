use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use siphon_manifest::SiphonToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to siphon.toml (defaults to ./siphon.toml)
    #[arg(short, long, default_value = "siphon.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let siphon_toml = SiphonToml::open(&self.config).unwrap_or_exit();

        let report = ops::check(&siphon_toml);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
