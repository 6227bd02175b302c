use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use regex::Regex;
use serde_yaml::Value;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mapop::{
    collect, keys, map_keys, merge, parse_document, partition, reject, render, render_document,
    select, select_func, split, to_yaml, DocumentError, DocumentFormat, Mapping,
};

#[derive(Parser, Debug)]
#[command(name = "mapop")]
#[command(about = "Apply functional map operations to YAML or JSON documents")]
struct Args {
    /// Output format: yaml or json
    #[arg(long, global = true, default_value = "yaml", value_name = "FORMAT")]
    format: DocumentFormat,

    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the keys of a mapping, one per line
    Keys { file: PathBuf },

    /// Print the values of a mapping as a sequence, ordered by key
    Values { file: PathBuf },

    /// Keep only the listed keys
    Select { file: PathBuf, keys: Vec<String> },

    /// Drop the listed keys
    Reject { file: PathBuf, keys: Vec<String> },

    /// Keep only the keys matching a regular expression
    SelectMatching { file: PathBuf, pattern: String },

    /// Split a mapping into matched and unmatched keys
    Partition { file: PathBuf, pattern: String },

    /// Remove entries with null values
    Collect { file: PathBuf },

    /// Change the case of every key
    MapKeys {
        file: PathBuf,

        #[arg(long, value_enum)]
        case: KeyCase,
    },

    /// Merge mappings; later files override earlier ones
    Merge {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum KeyCase {
    Upper,
    Lower,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Document {
        path: String,
        source: DocumentError,
    },

    #[error("Failed to render output: {0}")]
    Render(#[from] DocumentError),

    #[error("Invalid key pattern: {0}")]
    Pattern(#[from] regex::Error),
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();

    debug!("mapop started with verbosity level: {}", verbose);
}

fn run(args: &Args) -> Result<String, CliError> {
    let format = args.format;

    match &args.command {
        Command::Keys { file } => {
            let input = read_mapping(file)?;
            let mut names = keys(&input);
            names.sort_unstable();
            Ok(names.iter().map(|name| format!("{}\n", name)).collect())
        }
        Command::Values { file } => {
            let input = read_mapping(file)?;
            let (names, values) = split(&input);
            let mut pairs: Vec<(&str, &Value)> = names.into_iter().zip(values).collect();
            pairs.sort_unstable_by_key(|(name, _)| *name);
            let ordered: Vec<&Value> = pairs.into_iter().map(|(_, value)| value).collect();
            Ok(render(&ordered, format)?)
        }
        Command::Select { file, keys } => {
            let input = read_mapping(file)?;
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            Ok(render_document(&select(&input, &keys), format)?)
        }
        Command::Reject { file, keys } => {
            let input = read_mapping(file)?;
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            Ok(render_document(&reject(&input, &keys), format)?)
        }
        Command::SelectMatching { file, pattern } => {
            let pattern = Regex::new(pattern)?;
            let input = read_mapping(file)?;
            let output = select_func(Some(|key: &str, _: &Value| pattern.is_match(key)), &input);
            Ok(render_document(&output, format)?)
        }
        Command::Partition { file, pattern } => {
            let pattern = Regex::new(pattern)?;
            let input = read_mapping(file)?;
            let (matched, unmatched) =
                partition(|key: &str, _: &Value| pattern.is_match(key), Some(&input));

            let mut output = serde_yaml::Mapping::new();
            output.insert(
                Value::String("matched".to_string()),
                matched.as_ref().map(to_yaml).unwrap_or(Value::Null),
            );
            output.insert(
                Value::String("unmatched".to_string()),
                unmatched.as_ref().map(to_yaml).unwrap_or(Value::Null),
            );
            Ok(render(&Value::Mapping(output), format)?)
        }
        Command::Collect { file } => {
            let input = read_mapping(file)?;
            Ok(render_document(&collect(&input), format)?)
        }
        Command::MapKeys { file, case } => {
            let input = read_mapping(file)?;
            let output = match case {
                KeyCase::Upper => map_keys(|key| key.to_uppercase(), &input),
                KeyCase::Lower => map_keys(|key| key.to_lowercase(), &input),
            };
            Ok(render_document(&output, format)?)
        }
        Command::Merge { files } => {
            let inputs = files
                .iter()
                .map(|file| read_mapping(file))
                .collect::<Result<Vec<_>, _>>()?;
            let refs: Vec<&Mapping<Value>> = inputs.iter().collect();
            Ok(render_document(&merge(&refs), format)?)
        }
    }
}

/// Read a YAML or JSON mapping, choosing the parser from the file extension
fn read_mapping(path: &Path) -> Result<Mapping<Value>, CliError> {
    let path_name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path_name.clone(),
        source,
    })?;

    let mapping = parse_document(&text, DocumentFormat::from_path(path)).map_err(|source| {
        CliError::Document {
            path: path_name.clone(),
            source,
        }
    })?;

    info!(file = %path_name, entries = mapping.len(), "loaded mapping");
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["mapop", "keys", "values.yaml", "--format", "json", "-vv"])
                .unwrap();
        assert_eq!(args.format, DocumentFormat::Json);
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.command, Command::Keys { .. }));
    }

    #[test]
    fn test_args_reject_unknown_format() {
        let parsed = Args::try_parse_from(["mapop", "--format", "toml", "keys", "values.yaml"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_merge_requires_files() {
        assert!(Args::try_parse_from(["mapop", "merge"]).is_err());
    }

    #[test]
    fn test_read_mapping_missing_file() {
        let err = read_mapping(Path::new("does-not-exist.yaml")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
