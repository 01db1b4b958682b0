use std::{
    fmt,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand, ValueEnum};

mod log;

pub(crate) use log::LogLevel;

use crate::config::Config;

const DEFAULT_CONFIG_PATH: &str = "./gqlvector.toml";

#[derive(Debug, Parser)]
#[command(name = "gqlvector", version)]
#[command(arg_required_else_help = true)]
/// Generates nested GraphQL list queries and fragments from an SDL schema
pub(crate) struct Args {
    /// Path to the GraphQL SDL schema
    #[arg(long, short, env = "GQLVECTOR_SCHEMA")]
    pub schema: PathBuf,
    /// Path to the TOML configuration file. Defaults to ./gqlvector.toml when it exists.
    #[arg(long, short, env = "GQLVECTOR_CONFIG")]
    pub config: Option<PathBuf>,
    /// Set the logging level. RUST_LOG takes precedence when set.
    #[arg(long = "log", env = "GQLVECTOR_LOG")]
    pub log_level: Option<LogLevel>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Build a list query over the given types, the first one being the root of the query
    Build(BuildArgs),
    /// Document a query with @param, @returns and @property comments
    Explain {
        /// Path to the query, `-` reads it from stdin
        query: PathBuf,
    },
    /// Print the generated fragment of a type
    Fragment {
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Also select the object fields of the type, through their medium fragment
        #[arg(long)]
        large: bool,
    },
    /// Print the shortest field path between two types
    Path {
        from: String,
        to: String,
    },
}

#[derive(Debug, clap::Args)]
pub(crate) struct BuildArgs {
    /// The root type followed by the types to reach from it
    #[arg(value_name = "TYPE", required = true)]
    pub types: Vec<String>,
    /// The Query field returning a list of the root type. Defaults to the first one in the schema.
    #[arg(long)]
    pub page_operation: Option<String>,
    /// A field name never to select, in addition to the ones from the configuration
    #[arg(long = "disable", value_name = "FIELD")]
    pub disabled_fields: Vec<String>,
    /// Prefix the query with its documentation
    #[arg(long)]
    pub explain: bool,
    /// Output format
    #[arg(long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// The GraphQL document as is
    Text,
    /// A JSON object with the requested types and the query
    Json,
}

impl AsRef<str> for OutputFormat {
    fn as_ref(&self) -> &str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl Args {
    /// The configuration file given on the command line, or the default one if present.
    pub fn config(&self) -> anyhow::Result<Config> {
        match self.config.as_deref() {
            Some(path) => Config::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => Config::load(Path::new(DEFAULT_CONFIG_PATH)),
            None => Ok(Config::default()),
        }
    }
}

pub(crate) fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_arguments() {
        let args = Args::try_parse_from([
            "gqlvector",
            "--schema",
            "schema.graphql",
            "build",
            "Event",
            "User",
            "--disable",
            "createdBy",
            "--disable",
            "updatedBy",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.schema, Path::new("schema.graphql"));

        let Command::Build(build) = args.command else {
            unreachable!("expected build, got {:?}", args.command);
        };

        assert_eq!(build.types, ["Event", "User"]);
        assert_eq!(build.disabled_fields, ["createdBy", "updatedBy"]);
        assert_eq!(build.format, OutputFormat::Json);
        assert!(!build.explain);
        assert_eq!(build.page_operation, None);
    }

    #[test]
    fn build_requires_a_type() {
        assert!(Args::try_parse_from(["gqlvector", "--schema", "schema.graphql", "build"]).is_err());
    }

    #[test]
    fn log_levels() {
        let args = Args::try_parse_from([
            "gqlvector",
            "--schema",
            "schema.graphql",
            "--log",
            "debug",
            "path",
            "Event",
            "User",
        ])
        .unwrap();

        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(LogLevel::default(), LogLevel::Warn);
    }

    #[test]
    fn fragment_arguments() {
        let args = Args::try_parse_from(["gqlvector", "-s", "schema.graphql", "fragment", "Event", "--large"]).unwrap();

        let Command::Fragment { type_name, large } = args.command else {
            unreachable!("expected fragment, got {:?}", args.command);
        };

        assert_eq!(type_name, "Event");
        assert!(large);
    }
}
