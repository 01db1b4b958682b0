use std::{collections::BTreeMap, fs, path::Path};

use anyhow::Context;

use crate::args::LogLevel;

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Field names never selected nor followed, on any type.
    pub disabled_fields: Vec<String>,
    /// The page operation to use per root type, instead of the first matching Query field.
    pub page_operations: BTreeMap<String, String>,
    /// Whether `build` documents the query by default.
    pub explain: bool,
    /// Logging level used when none is given on the command line.
    pub log_level: Option<LogLevel>,
}

impl Config {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("could not read the configuration at {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("invalid configuration at {}", path.display()))
    }
}
