use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `QCLAUSE_FORMAT=jsonl`.
pub const ENV_PREFIX: &str = "QCLAUSE";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub pretty: bool,
}

impl Settings {
    /// Load settings from an optional YAML file, then `QCLAUSE_*` variables.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }
        let settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON array
    #[default]
    Json,
    /// One clause per line
    #[value(name = "jsonl", alias = "ndjson")]
    #[serde(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_yaml_file() {
        let file = settings_file("format: jsonl\npretty: true\n");
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.format, OutputFormat::Jsonl);
        assert!(settings.pretty);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let file = settings_file("pretty: true\n");
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        let file = settings_file("format: xml\n");
        assert!(Settings::load(Some(file.path())).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/qclause.yaml"))).is_err());
    }

    #[test]
    fn accepts_ndjson_alias_in_file() {
        let file = settings_file("format: ndjson\n");
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.format, OutputFormat::Jsonl);
    }
}
