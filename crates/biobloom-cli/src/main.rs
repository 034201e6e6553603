//! BioBloom: build a Bloom filter from a key file and query it
//!
//! ```text
//! biobloom keys.txt answers.txt 0.01
//! biobloom reads.fa answers.txt 0.001 --fasta --queries queries.fa
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use biobloom_cli::{resolve_config, run_queries, run_query_records, Args, PROMPT};
use biobloom_filter::{AppendFileSink, BloomFilterService, FileKeySource, KeyFormat, Metrics};

fn init_tracing(args: &Args) -> Result<()> {
    // RUST_LOG takes precedence over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = resolve_config(&args, |name| std::env::var(name).ok())?;

    let metrics = Arc::new(Metrics::new());
    let mut source = FileKeySource::new(&args.input, config.key_format, config.trim_keys);
    let service = BloomFilterService::load(&mut source, config.clone(), metrics.clone())
        .with_context(|| format!("failed to build filter from {}", args.input.display()))?;

    let report = service.report();
    println!(
        "Created bloom filter with m={} and k={}",
        report.size_bits, report.hash_count
    );
    println!(
        "Filled filter with {} keys in {:.6} seconds",
        report.keys_loaded,
        report.fill_time.as_secs_f64()
    );
    println!("Filter memory: {} bytes", report.memory_bytes);

    let mut sink = AppendFileSink::open(&args.output)
        .with_context(|| format!("failed to open {}", args.output.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match &args.queries {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            let reader = BufReader::new(file);
            // FASTA input implies FASTA queries: one query per record
            if config.key_format == KeyFormat::Fasta {
                run_query_records(&service, reader, &mut out, &mut sink, config.trim_keys)?
            } else {
                run_queries(&service, reader, &mut out, &mut sink, None, config.trim_keys)?
            }
        }
        None => {
            let stdin = io::stdin();
            run_queries(&service, stdin.lock(), &mut out, &mut sink, Some(PROMPT), config.trim_keys)?
        }
    };

    info!(
        queries = summary.queries,
        positives = summary.positives,
        output = %args.output.display(),
        "Query session finished"
    );

    if args.stats_json {
        let stats = json!({
            "config": config,
            "load": service.report(),
            "queries": summary.queries,
            "positives": summary.positives,
            "metrics": metrics.snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;
    run(args)
}
