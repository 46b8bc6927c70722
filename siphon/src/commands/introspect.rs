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
pub struct IntrospectCommand {
    /// Path to siphon.toml (defaults to ./siphon.toml)
    #[arg(short, long, default_value = "siphon.toml")]
    pub config: PathBuf,

    /// Write the introspection document here instead of the configured dump
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl IntrospectCommand {
    pub fn run(&self) -> Result<()> {
        let siphon_toml = SiphonToml::open(&self.config).unwrap_or_exit();
        let endpoint = &siphon_toml.manifest().endpoint;
        let dump = self.output.clone().or_else(|| siphon_toml.dump_path());

        let client = ops::connect(endpoint)?;
        let (_, report) = ops::introspect(&client, &endpoint.url, dump.as_deref())?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
