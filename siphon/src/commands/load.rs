use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use siphon_manifest::{Source, SiphonToml};
use siphon_store::Store;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct LoadCommand {
    /// Sources to load (defaults to all, in manifest order)
    pub sources: Vec<String>,

    /// Path to siphon.toml (defaults to ./siphon.toml)
    #[arg(short, long, default_value = "siphon.toml")]
    pub config: PathBuf,
}

impl LoadCommand {
    pub fn run(&self) -> Result<()> {
        let siphon_toml = SiphonToml::open(&self.config).unwrap_or_exit();
        let manifest = siphon_toml.manifest();

        let sources: Vec<Source<'_>> = if self.sources.is_empty() {
            manifest.sources().collect()
        } else {
            self.sources
                .iter()
                .map(|name| manifest.source(name))
                .collect::<siphon_manifest::Result<_>>()
                .unwrap_or_exit()
        };
        if sources.is_empty() {
            eyre::bail!(
                "{} defines no sources; add a [sources.<name>] table",
                siphon_toml.path().display()
            );
        }

        let options = siphon_toml.database_options().unwrap_or_exit();
        let mut store = Store::open(&options)
            .wrap_err_with(|| format!("failed to open {}", options.path.display()))?;

        let client = ops::connect(&manifest.endpoint)?;
        let dump = siphon_toml.dump_path();
        let (schema, _) = ops::introspect(&client, &manifest.endpoint.url, dump.as_deref())?;

        let mut out = TerminalOutput::new();
        let mut failed = 0;
        for source in sources {
            let report = ops::load(&client, &schema, &mut store, source)?;
            failed += report.failures.len();
            report.render(&mut out);
        }

        if failed > 0 {
            tracing::warn!(failed, "some records were not inserted");
        }
        Ok(())
    }
}
