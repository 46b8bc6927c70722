mod check;
mod columns;
mod completions;
mod init;
mod introspect;
mod load;
mod preview;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use columns::ColumnsCommand;
use completions::CompletionsCommand;
use eyre::Result;
use init::InitCommand;
use introspect::IntrospectCommand;
use load::LoadCommand;
use preview::PreviewCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for siphon_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "siphon")]
#[command(version)]
#[command(about = "Load GraphQL data into SQLite tables inferred from the endpoint's schema")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Introspect(cmd) => cmd.run(),
            Commands::Columns(cmd) => cmd.run(),
            Commands::Load(cmd) => cmd.run(),
            Commands::Preview(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter siphon.toml
    Init(InitCommand),

    /// Validate siphon.toml and list its sources
    Check(CheckCommand),

    /// Fetch the endpoint's schema and summarize its types
    Introspect(IntrospectCommand),

    /// Show the table columns derived for a GraphQL type
    Columns(ColumnsCommand),

    /// Fetch sources and insert their records into SQLite
    Load(LoadCommand),

    /// Show the row count and first rows of a source's table
    Preview(PreviewCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["siphon", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbosity(), 2);

        let cli = Cli::try_parse_from(["siphon", "load", "countries", "-v"]).unwrap();
        assert_eq!(cli.verbosity(), 1);
    }

    #[test]
    fn test_columns_requires_single_schema_source() {
        let result = Cli::try_parse_from([
            "siphon",
            "columns",
            "Country",
            "--schema",
            "schema.json",
            "--config",
            "siphon.toml",
        ]);
        assert!(result.is_err());
    }
}
