use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::clause::{Clause, parse_clauses};
use crate::config::{OutputFormat, Settings};
use crate::params::RawParameters;
use crate::sinks::{ClauseSink, JsonSink, JsonlSink};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Query string or URL, e.g. "price=gt:23&name=lk:john"
    #[arg(conflicts_with = "input", required_unless_present = "input")]
    pub query: Option<String>,

    /// YAML or JSON file mapping parameter names to values
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file, or - for stdout
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Output format (overrides settings)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Settings file (YAML)
    #[arg(short, long, env = "QCLAUSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Flags win over the settings file and environment.
pub fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())
        .with_context(|| format!("CLI: Failed to load settings from {:?}", cli.config))?;
    if let Some(format) = cli.format {
        settings.format = format;
    }
    settings.pretty |= cli.pretty;
    Ok(settings)
}

pub fn load_params_file(path: &Path) -> Result<RawParameters> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Input: Failed to read {:?}", path))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let params = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Input: Invalid JSON parameters in {:?}", path))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Input: Invalid YAML parameters in {:?}", path))?
    };
    Ok(params)
}

pub fn load_params(cli: &Cli) -> Result<RawParameters> {
    match (&cli.query, &cli.input) {
        (Some(query), _) => Ok(RawParameters::from_query(query)),
        (None, Some(path)) => load_params_file(path),
        (None, None) => anyhow::bail!("CLI: Provide a query string or --input"),
    }
}

pub fn init_sink(settings: &Settings, output: &Path) -> Result<Box<dyn ClauseSink>> {
    let target = if output == Path::new("-") {
        "stdout".to_string()
    } else {
        format!("{:?}", output)
    };
    tracing::info!("Sink: {} -> {}", settings.format.label(), target);

    let sink: Box<dyn ClauseSink> = match settings.format {
        OutputFormat::Json => Box::new(
            JsonSink::new(output, settings.pretty)
                .with_context(|| format!("Sink: Failed to open {}", target))?,
        ),
        OutputFormat::Jsonl => Box::new(
            JsonlSink::new(output).with_context(|| format!("Sink: Failed to open {}", target))?,
        ),
    };
    Ok(sink)
}

pub fn write_clauses(sink: &mut dyn ClauseSink, clauses: &[Clause]) -> Result<()> {
    for clause in clauses {
        sink.add_clause(clause)?;
    }
    sink.finish().context("Sink: Failed to finalize output")
}

/// Parse the CLI input and write its clauses. Returns the clause count.
pub fn run(cli: &Cli) -> Result<usize> {
    let settings = resolve_settings(cli)?;
    let params = load_params(cli)?;

    let clauses = parse_clauses(&params);
    let skipped = params.value_count() - clauses.len();
    tracing::info!(
        "Parsed {} parameters into {} clauses ({} skipped)",
        params.len(),
        clauses.len(),
        skipped
    );

    let mut sink = init_sink(&settings, &cli.output)?;
    write_clauses(sink.as_mut(), &clauses)?;
    Ok(clauses.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("qclause").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn query_and_input_conflict() {
        let result =
            Cli::try_parse_from(["qclause", "a=1", "--input", "params.yaml"]);
        assert!(result.is_err());
        assert!(Cli::try_parse_from(["qclause"]).is_err());
    }

    #[test]
    fn flags_override_settings() {
        let settings = resolve_settings(&cli(&["a=1", "--format", "jsonl", "--pretty"])).unwrap();
        assert_eq!(settings.format, OutputFormat::Jsonl);
        assert!(settings.pretty);
    }

    #[test]
    fn format_flag_accepts_ndjson() {
        let settings = resolve_settings(&cli(&["a=1", "--format", "ndjson"])).unwrap();
        assert_eq!(settings.format, OutputFormat::Jsonl);
    }

    #[test]
    fn loads_params_from_json_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, r#"{{"price": "gt:23", "tag": ["a", "b"]}}"#).unwrap();
        file.flush().unwrap();

        let params = load_params_file(file.path()).unwrap();
        let clauses = parse_clauses(&params);
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].key, "price");
        assert_eq!(clauses[2].key, "tag");
    }

    #[test]
    fn invalid_params_file_is_an_error() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(file, "- not\n- a\n- map\n").unwrap();
        file.flush().unwrap();

        assert!(load_params_file(file.path()).is_err());
    }

    #[test]
    fn run_writes_output_file() {
        let output = NamedTempFile::with_suffix(".jsonl").unwrap();
        let output_path = output.path().to_str().unwrap();
        let count = run(&cli(&[
            "price=gt:23&bad key=1&tag=a&tag=b",
            "--format",
            "jsonl",
            "--output",
            output_path,
        ]))
        .unwrap();
        assert_eq!(count, 3);

        let content = std::fs::read_to_string(output.path()).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
