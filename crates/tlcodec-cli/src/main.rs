use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tlcodec_core::{CheckOutcome, EncodeOptions, Registry};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TLCODEC_BUILD_COMMIT"),
    " ",
    env!("TLCODEC_BUILD_DATE"),
    ")"
);

const DEFAULT_FILTER: &str = "tlcodec=info,tlcodec_core=info";
const VERBOSE_FILTER: &str = "tlcodec=debug,tlcodec_core=debug";

#[derive(Parser, Debug)]
#[command(name = "tlcodec")]
#[command(version = VERSION)]
#[command(
    about = "Type-tagged JSON encoding for protocol objects.",
    long_about = None,
    after_help = "Examples:\n  tlcodec check\n  tlcodec classes --duplicates\n  tlcodec sample -o message.json --pretty\n  tlcodec decode message.json"
)]
struct Cli {
    /// Log every patched class and the objects under test
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Patch every class, report duplicate names and round-trip a sample message.
    Check,
    /// List patched class paths.
    Classes {
        /// Only list short names shared by several classes
        #[arg(long)]
        duplicates: bool,
    },
    /// Encode the sample message.
    Sample {
        /// Output path (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Keep non-ASCII characters unescaped
        #[arg(long)]
        no_ascii: bool,
    },
    /// Decode a tagged JSON document and print the restored object.
    Decode {
        /// Path to a JSON file, or `-` for stdin
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check => cmd_check(),
        Commands::Classes { duplicates } => cmd_classes(duplicates),
        Commands::Sample {
            output,
            pretty,
            no_ascii,
        } => cmd_sample(output, pretty, no_ascii),
        Commands::Decode { input } => cmd_decode(&input),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn patch() -> &'static Registry {
    let registry = tlcodec_core::patch_classes();
    debug!("registry holds {} classes", registry.len());
    registry
}

fn cmd_check() -> Result<ExitCode, CliError> {
    let registry = patch();
    registry.report_duplicates();

    let sample = tlcodec_core::make_test_message();
    let outcome = tlcodec_core::check_round_trip(registry, &sample);
    let status = check_status(&outcome)?;
    println!("{}", outcome);
    Ok(ExitCode::from(status))
}

/// Exit status of `check`: 0 when the sample survives, 1 on a mismatch.
fn check_status(outcome: &CheckOutcome) -> Result<u8, CliError> {
    match outcome {
        CheckOutcome::Ok => Ok(0),
        CheckOutcome::Failed(message) => Err(CliError::new(
            format!("round trip failed: {}", message),
            Some("rerun with --verbose to dump the sample".to_string()),
        )),
        CheckOutcome::ClassMismatch { .. } | CheckOutcome::Mismatch { .. } => Ok(1),
    }
}

fn cmd_classes(duplicates: bool) -> Result<ExitCode, CliError> {
    let registry = patch();
    if duplicates {
        for (name, paths) in tlcodec_core::duplicate_names(registry.classes()) {
            println!("{} [{}]: {}", name, paths.len(), paths.join(", "));
        }
    } else {
        let mut paths: Vec<String> = registry.classes().map(|class| class.path()).collect();
        paths.sort();
        for path in paths {
            println!("{}", path);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_sample(output: Option<PathBuf>, pretty: bool, no_ascii: bool) -> Result<ExitCode, CliError> {
    let registry = patch();
    let options = EncodeOptions {
        ensure_ascii: !no_ascii,
        indent: pretty.then_some(2),
    };
    let json = registry
        .encode_with(&tlcodec_core::make_test_message(), &options)
        .context("encoding the sample message failed")?;

    let Some(output) = output else {
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, json)
        .with_context(|| format!("Failed to write sample: {}", output.display()))?;
    eprintln!("OK: sample written -> {}", output.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_decode(input: &Path) -> Result<ExitCode, CliError> {
    let text = read_input(input)?;
    let registry = patch();
    let object = registry.decode(&text).map_err(|err| {
        CliError::new(
            format!("cannot decode {}: {}", display_input(input), err),
            Some("input must be produced by `tlcodec sample` or the encoder".to_string()),
        )
    })?;
    println!("{}", object.class().path());
    println!("{:#?}", object);
    Ok(ExitCode::SUCCESS)
}

fn read_input(input: &Path) -> Result<String, CliError> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a JSON file, or `-` to read stdin".to_string()),
        ));
    }
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    Ok(text)
}

fn display_input(input: &Path) -> String {
    if input == Path::new("-") {
        "stdin".to_string()
    } else {
        input.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_status_maps_outcomes() {
        assert_eq!(check_status(&CheckOutcome::Ok).unwrap(), 0);

        let mismatch = CheckOutcome::Mismatch {
            original: "Message { id: 1 }".to_string(),
            restored: "Message { id: 0 }".to_string(),
        };
        assert_eq!(check_status(&mismatch).unwrap(), 1);

        let moved = CheckOutcome::ClassMismatch {
            expected: "tl.patched.Message".to_string(),
            restored: "tl.types.Message".to_string(),
        };
        assert_eq!(check_status(&moved).unwrap(), 1);

        let err = check_status(&CheckOutcome::Failed("boom".to_string())).unwrap_err();
        assert_eq!(err.message, "round trip failed: boom");
        assert!(err.hint.is_some());
    }
}
