use canopy::{
    config::{CONFIG_FILE_NAME, CanopyConfig},
    prelude::*,
};
use clap::{Args, Parser, Subcommand};
use std::{fs, path::PathBuf, process::ExitCode};
use thiserror::Error as ThisError;
use tracing_subscriber::EnvFilter;

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "canopy", version, about = "Normalize object schema definitions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize a JSON schema file and print the canonical schema.
    Normalize {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a JSON schema file without printing it.
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Debug, Args)]
struct InputArgs {
    /// JSON file holding an array of object definitions.
    file: PathBuf,

    /// Config file; defaults to ./canopy.toml when present.
    #[arg(long, env = "CANOPY_CONFIG")]
    config: Option<PathBuf>,

    /// Accept the deprecated array-of-properties shape regardless of config.
    #[arg(long)]
    allow_values_arrays: bool,
}

impl InputArgs {
    fn options(&self) -> Result<NormalizeOptions, CliError> {
        let config = match &self.config {
            Some(path) => CanopyConfig::load(path),
            None => CanopyConfig::load_or_default(CONFIG_FILE_NAME),
        }
        .map_err(canopy::Error::from)?;

        let mut options = config.normalize_options();
        options.allow_values_arrays |= self.allow_values_arrays;

        Ok(options)
    }

    fn normalize(&self) -> Result<Vec<CanonicalObjectSchema>, CliError> {
        let options = self.options()?;
        let json = fs::read_to_string(&self.file).map_err(|source| CliError::Io {
            path: self.file.display().to_string(),
            source,
        })?;

        tracing::info!(file = %self.file.display(), ?options, "normalizing schema");

        Ok(canopy::normalize_json(&json, &options)?)
    }
}

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error(transparent)]
    Canopy(#[from] canopy::Error),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Normalize { input, pretty } => {
            let schema = input.normalize()?;
            let out = if pretty {
                serde_json::to_string_pretty(&schema)?
            } else {
                serde_json::to_string(&schema)?
            };
            println!("{out}");
        }

        Command::Check { input } => {
            let schema = input.normalize()?;
            let registry = canopy::SchemaRegistry::new(schema).map_err(canopy::Error::from)?;

            for (object, property, target) in registry.dangling_links() {
                tracing::warn!(%object, %property, %target, "relationship target is not declared");
            }
            println!("ok: {} object schema(s)", registry.len());
        }
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_normalize_flags() {
        let cli = Cli::try_parse_from([
            "canopy",
            "normalize",
            "schema.json",
            "--pretty",
            "--allow-values-arrays",
        ])
        .unwrap();

        let Command::Normalize { input, pretty } = cli.command else {
            panic!("expected normalize");
        };
        assert!(pretty);
        assert!(input.allow_values_arrays);
        assert_eq!(input.file, PathBuf::from("schema.json"));
    }
}
