use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use siphon_manifest::SiphonToml;
use siphon_store::Store;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PreviewCommand {
    /// Source whose table to show
    pub source: String,

    /// Path to siphon.toml (defaults to ./siphon.toml)
    #[arg(short, long, default_value = "siphon.toml")]
    pub config: PathBuf,

    /// Number of rows to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,
}

impl PreviewCommand {
    pub fn run(&self) -> Result<()> {
        let siphon_toml = SiphonToml::open(&self.config).unwrap_or_exit();
        let source = siphon_toml.manifest().source(&self.source).unwrap_or_exit();

        let mut options = siphon_toml.database_options().unwrap_or_exit();
        options.create_if_missing = false;
        let store = Store::open(&options)
            .wrap_err_with(|| format!("failed to open {}", options.path.display()))?;

        let report = ops::preview(&store, source, self.limit)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
