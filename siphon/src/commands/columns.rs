use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use siphon_manifest::SiphonToml;
use siphon_schema::Schema;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ColumnsCommand {
    /// GraphQL type name, e.g. Country
    pub type_name: String,

    /// Path to siphon.toml; the endpoint is introspected unless --schema is given
    #[arg(short, long, default_value = "siphon.toml")]
    pub config: PathBuf,

    /// Read an introspection dump instead of querying the endpoint
    #[arg(short, long, conflicts_with = "config")]
    pub schema: Option<PathBuf>,

    /// Print the CREATE TABLE statement instead of the column list
    #[arg(long)]
    pub ddl: bool,

    /// Object levels below the type to expand
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl ColumnsCommand {
    pub fn run(&self) -> Result<()> {
        let schema = self.load_schema()?;

        let report = ops::columns(&schema, &self.type_name, self.max_depth, self.ddl)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }

    fn load_schema(&self) -> Result<Schema> {
        if let Some(path) = &self.schema {
            return Schema::from_file(path)
                .wrap_err_with(|| format!("failed to load schema from {}", path.display()));
        }

        let siphon_toml = SiphonToml::open(&self.config).unwrap_or_exit();
        let endpoint = &siphon_toml.manifest().endpoint;
        let client = ops::connect(endpoint)?;
        let (schema, _) = ops::introspect(&client, &endpoint.url, None)?;
        Ok(schema)
    }
}
