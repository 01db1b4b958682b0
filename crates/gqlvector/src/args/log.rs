use std::fmt;

use clap::ValueEnum;

/// Crates whose events are shown below the `trace` level.
const SCOPED_CRATES: [&str; 2] = [env!("CARGO_CRATE_NAME"), "graphql_query_vector"];

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LogLevel {
    /// Nothing at all
    Off,
    Error,
    /// Fields and fragments of an explained query missing from the schema
    #[default]
    Warn,
    Info,
    /// Schema sizes, page operations, type paths and generated fragments
    Debug,
    /// Everything, dependencies included
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// `EnvFilter` directives enabling this level for the workspace crates only.
    pub(crate) fn directives(self) -> String {
        match self {
            LogLevel::Off | LogLevel::Trace => self.as_str().to_owned(),
            level => {
                let mut directives = SCOPED_CRATES
                    .iter()
                    .map(|krate| format!("{krate}={}", level.as_str()))
                    .collect::<Vec<_>>();

                directives.push(String::from("off"));
                directives.join(",")
            }
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
