//! # BioBloom CLI
//!
//! Argument parsing, configuration layering and the query loop behind the
//! `biobloom` binary. Kept in a library so the loop can be driven from tests
//! with in-memory readers and writers.
//!
//! Configuration is layered, later layers winning:
//! 1. `BloomConfig::default()`
//! 2. `BIOBLOOM_*` environment variables
//! 3. command-line arguments

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;

use biobloom_filter::adapters::parse_fasta;
use biobloom_filter::{BloomConfig, BloomFilterService, KeyFormat, MetricsRecorder, ResultSink};

/// Prompt shown before each interactive query
pub const PROMPT: &str = "Enter key to check if it is in filter: ";

/// Input that ends an interactive session
pub const QUIT_COMMAND: &str = ":Q";

/// Environment variable overriding the target false positive rate
pub const ENV_FPR: &str = "BIOBLOOM_FPR";
/// Environment variable selecting the key format (`lines` or `fasta`)
pub const ENV_FORMAT: &str = "BIOBLOOM_FORMAT";
/// Environment variable disabling key trimming when set to `0` or `false`
pub const ENV_TRIM: &str = "BIOBLOOM_TRIM";
/// Environment variable overriding the maximum filter size in bits
pub const ENV_MAX_SIZE_BITS: &str = "BIOBLOOM_MAX_SIZE_BITS";

/// BioBloom: load keys into a Bloom filter and query it
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "biobloom", version)]
#[command(about = "Load keys into a Bloom filter and answer membership queries")]
pub struct Args {
    /// File of keys to load, one per line (or FASTA with --fasta)
    pub input: PathBuf,

    /// File that query answers are appended to
    pub output: PathBuf,

    /// Target false positive rate, strictly between 0 and 1
    /// (falls back to BIOBLOOM_FPR when omitted)
    pub p: Option<f64>,

    /// Treat INPUT as FASTA: one key per record
    #[arg(long)]
    pub fasta: bool,

    /// Answer every line of FILE instead of prompting on stdin
    #[arg(short, long, value_name = "FILE")]
    pub queries: Option<PathBuf>,

    /// Keep leading and trailing whitespace in keys
    #[arg(long)]
    pub keep_whitespace: bool,

    /// Refuse to build filters larger than this many bits in total
    #[arg(long, value_name = "BITS")]
    pub max_size_bits: Option<usize>,

    /// Print load report and metrics as JSON on exit
    #[arg(long)]
    pub stats_json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log level implied by `-v` occurrences
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Build the effective configuration from defaults, environment and arguments
///
/// `env` looks up a variable by name; the binary passes `std::env::var`.
pub fn resolve_config<F>(args: &Args, env: F) -> Result<BloomConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = BloomConfig::default();

    // The environment value is only consulted when P is absent
    let fpr = match (args.p, env(ENV_FPR)) {
        (Some(p), _) => Some(p),
        (None, Some(value)) => Some(
            value
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{} is not a number: '{}'", ENV_FPR, value))?,
        ),
        (None, None) => None,
    };
    if let Some(value) = env(ENV_FORMAT) {
        config.key_format = value
            .parse()
            .with_context(|| format!("invalid {}", ENV_FORMAT))?;
    }
    if let Some(value) = env(ENV_TRIM) {
        config.trim_keys = parse_flag(&value).with_context(|| format!("invalid {}", ENV_TRIM))?;
    }
    if let Some(value) = env(ENV_MAX_SIZE_BITS) {
        config.max_size_bits = value
            .trim()
            .parse()
            .with_context(|| format!("{} is not a bit count: '{}'", ENV_MAX_SIZE_BITS, value))?;
    }

    if args.fasta {
        config.key_format = KeyFormat::Fasta;
    }
    if args.keep_whitespace {
        config.trim_keys = false;
    }
    if let Some(bits) = args.max_size_bits {
        config.max_size_bits = bits;
    }

    match fpr {
        Some(p) => config.target_fpr = p,
        None => bail!("missing false positive rate: pass P or set {}", ENV_FPR),
    }

    config.validate().context("invalid configuration")?;
    debug!(?config, "Resolved configuration");
    Ok(config)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}

/// Answer shown to the user for one query
pub fn answer_text(possibly_present: bool) -> &'static str {
    if possibly_present {
        "Possible in filter"
    } else {
        "Not in filter"
    }
}

/// Totals for one query session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuerySummary {
    pub queries: usize,
    pub positives: usize,
}

fn answer<W, S, M>(
    service: &BloomFilterService<M>,
    key: &str,
    out: &mut W,
    sink: &mut S,
    summary: &mut QuerySummary,
) -> Result<()>
where
    W: Write,
    S: ResultSink + ?Sized,
    M: MetricsRecorder,
{
    let found = service
        .query_and_record(key, sink)
        .context("failed to record query result")?;
    summary.queries += 1;
    if found {
        summary.positives += 1;
    }
    writeln!(out, "{}", answer_text(found))?;
    Ok(())
}

/// Drive queries from `input` until EOF or `:Q`
///
/// With `prompt` set, the prompt is written to `out` before every read.
/// Every answer is echoed to `out` and recorded in `sink`. Line terminators
/// are always stripped, surrounding whitespace only when `trim` is set;
/// invalid UTF-8 is replaced as it is for key files.
pub fn run_queries<R, W, S, M>(
    service: &BloomFilterService<M>,
    mut input: R,
    out: &mut W,
    sink: &mut S,
    prompt: Option<&str>,
    trim: bool,
) -> Result<QuerySummary>
where
    R: BufRead,
    W: Write,
    S: ResultSink + ?Sized,
    M: MetricsRecorder,
{
    let mut summary = QuerySummary::default();
    let mut buf = Vec::new();

    loop {
        if let Some(prompt) = prompt {
            write!(out, "{}", prompt)?;
            out.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf).context("failed to read query")? == 0 {
            if prompt.is_some() {
                writeln!(out)?;
            }
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let key = line.trim_end_matches(['\n', '\r']);
        let key = if trim { key.trim() } else { key };
        if key == QUIT_COMMAND {
            break;
        }

        answer(service, key, out, sink, &mut summary)?;
    }

    Ok(summary)
}

/// Answer one query per FASTA record of `input`
///
/// Used when the key file is FASTA, so the query file is read the same way.
pub fn run_query_records<R, W, S, M>(
    service: &BloomFilterService<M>,
    input: R,
    out: &mut W,
    sink: &mut S,
    trim: bool,
) -> Result<QuerySummary>
where
    R: BufRead,
    W: Write,
    S: ResultSink + ?Sized,
    M: MetricsRecorder,
{
    let keys = parse_fasta(input, trim).context("failed to read FASTA queries")?;
    let mut summary = QuerySummary::default();
    for key in &keys {
        answer(service, key, out, sink, &mut summary)?;
    }
    Ok(summary)
}
