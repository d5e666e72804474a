//! # Preloader Runtime
//!
//! Scans classpath roots into the membership store, prints the build
//! report, and resolves any given resource paths through guarded finders.
//!
//! ```text
//! cp-runtime --classpath target/classes --classpath target/resources \
//!     app/Page.html app/Page_de.html
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use cp_preloader::{BuildReport, ClasspathEnumerator, ClasspathPreloader};
use cp_runtime::{guarded_chain, init_logging, probe, ProbeResult, RuntimeConfig};

#[derive(Parser)]
#[command(name = "cp-runtime", about = "Classpath preloader: scan once, prune missing resource lookups")]
struct Cli {
    /// Classpath root directory (repeat for several)
    #[arg(long = "classpath", short = 'c', value_name = "DIR", required = true)]
    classpath: Vec<PathBuf>,

    /// Prefix the finders apply below each root
    #[arg(long, default_value = "")]
    prefix: String,

    /// Number of paths the store is sized for
    #[arg(long)]
    expected_items: Option<usize>,

    /// Target false positive rate, in (0, 1)
    #[arg(long = "fpr")]
    false_positive_rate: Option<f64>,

    /// Keep an exact path set next to the filter (diagnostic)
    #[arg(long)]
    retain_plain_paths: bool,

    /// Scan classpath roots in parallel
    #[arg(long)]
    parallel: bool,

    /// Do not descend into symlinked directories
    #[arg(long)]
    no_follow_links: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Resource paths to resolve after the scan
    paths: Vec<String>,
}

impl Cli {
    fn apply(&self, config: &mut RuntimeConfig) {
        if let Some(items) = self.expected_items {
            config.preloader.expected_items = items;
        }
        if let Some(fpr) = self.false_positive_rate {
            config.preloader.false_positive_rate = fpr;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.preloader.retain_plain_paths |= self.retain_plain_paths;
        config.parallel_scan |= self.parallel;
        config.json_output |= self.json;
    }
}

#[derive(Serialize)]
struct Output<'a> {
    report: &'a BuildReport,
    probes: Vec<ProbeResult>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env().context("invalid CP_* environment")?;
    cli.apply(&mut config);
    config.validate().context("invalid preloader configuration")?;

    init_logging(&config.log_level)?;

    let classpath = ClasspathEnumerator::new(&cli.classpath).follow_links(!cli.no_follow_links);
    let preloader = if config.parallel_scan {
        ClasspathPreloader::build_parallel(&config.preloader, classpath.elements())
    } else {
        ClasspathPreloader::build(&config.preloader, &classpath)
    }
    .context("classpath scan failed, refusing to serve from a partial snapshot")?;

    let chain = guarded_chain(&preloader, &cli.classpath, &cli.prefix);
    let probes: Vec<ProbeResult> = cli
        .paths
        .iter()
        .map(|path| probe(&preloader, &chain, &cli.prefix, path))
        .collect();
    let pruned = probes.iter().filter(|p| !p.might_exist).count();
    info!(probes = probes.len(), pruned, "resolved candidate paths");

    let output = Output {
        report: preloader.report(),
        probes,
    };
    if config.json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text(&output);
    }

    Ok(())
}

fn print_text(output: &Output<'_>) {
    let report = output.report;
    println!("paths found:     {}", report.paths_found);
    if let Some(distinct) = report.distinct_paths {
        println!("distinct paths:  {}", distinct);
    }
    println!("scan time:       {} ms", report.elapsed_ms);
    println!("stores:          {}", report.stores_allocated);
    println!(
        "filter:          {} bytes, {} bits, k={}",
        report.filter_bytes, report.size_bits, report.hash_count
    );
    println!(
        "false positives: target {:.4}, estimated {:.6}",
        report.target_fpr, report.estimated_fpr
    );
    if let Some(bytes) = report.plain_set_bytes {
        println!("plain set:       ~{} bytes", bytes);
    }

    for result in &output.probes {
        let status = match (&result.resolved, result.might_exist) {
            (Some(file), _) => format!("found {}", file.display()),
            (None, true) => "absent (false positive, delegate probed)".to_string(),
            (None, false) => "absent (pruned)".to_string(),
        };
        println!("{:<40} {}", result.path, status);
    }
}
