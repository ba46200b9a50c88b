// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shingle::protocol::Response;
use shingle::{classify, normalize, worker, EngineConfig, Flags, SearchEngine};

mod cli;
use cli::corpus::load_documents;
use cli::display;
use cli::{Cli, Commands};

const LOG_ENV: &str = "SHINGLE_LOG";
const DEFAULT_LOG_FILTER: &str = "shingle=info";

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Serve {
            config,
            fast,
            shadow,
        } => run_serve(config.as_deref(), fast, shadow),
        Commands::Search {
            docs,
            query,
            limit,
            no_fast,
            json,
            config,
        } => run_search(&docs, &query, limit, !no_fast, json, config.as_deref()),
        Commands::Normalize { text } => {
            run_normalize(&text);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries protocol messages or results.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::from_json_str(&raw).with_context(|| format!("in {}", path.display()))
}

// ═══════════════════════════════════════════════════════════════════════════
// SERVE
// ═══════════════════════════════════════════════════════════════════════════

fn run_serve(config: Option<&Path>, fast: bool, shadow: bool) -> Result<()> {
    let config = load_config(config)?;
    let flags = Flags {
        enable_fast_search: config.flags.enable_fast_search || fast,
        enable_shadow_test: config.flags.enable_shadow_test || shadow,
    };
    let engine = Arc::new(SearchEngine::new(config.with_flags(flags)));
    let (handle, responses, worker_thread) =
        worker::spawn(engine).context("failed to start worker thread")?;

    let writer = std::thread::spawn(move || -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for response in responses {
            serde_json::to_writer(&mut out, &response)?;
            out.write_all(b"\n")?;
            out.flush()?;
        }
        Ok(())
    });

    info!(
        enable_fast_search = flags.enable_fast_search,
        enable_shadow_test = flags.enable_shadow_test,
        "worker listening on stdin"
    );

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        if !handle.post_json(&line) {
            break;
        }
    }

    // Closing the job queue lets the worker drain and exit, which closes the
    // response channel and ends the writer.
    drop(handle);
    worker_thread
        .join()
        .map_err(|_| anyhow!("worker thread panicked"))?;
    writer
        .join()
        .map_err(|_| anyhow!("writer thread panicked"))?
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

fn run_search(
    docs: &Path,
    query: &str,
    limit: usize,
    use_fast: bool,
    json: bool,
    config: Option<&Path>,
) -> Result<()> {
    let engine = SearchEngine::new(load_config(config)?);
    let documents = load_documents(docs)?;
    let total = documents.len();

    #[cfg(feature = "parallel")]
    let progress = {
        let pb = indicatif::ProgressBar::new(total as u64);
        pb.set_style(
            indicatif::ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("━━╸"),
        );
        pb.set_prefix("Indexing");
        pb.set_message("documents...");
        pb
    };

    let build = engine.build_index(documents, None, |p| {
        #[cfg(feature = "parallel")]
        progress.set_position(p.processed as u64);
        #[cfg(not(feature = "parallel"))]
        let _ = p;
    });

    #[cfg(feature = "parallel")]
    progress.finish_and_clear();

    if let Err(e) = build {
        // Search still works on the legacy tiers
        warn!(error = %e, "continuing without the trigram index");
    }

    let outcome = engine.search(query, Some(limit), Some(use_fast))?;

    if json {
        let response = Response::SearchResult {
            id: "cli".to_string(),
            results: outcome.results,
            used: outcome.used,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    display::section_top(&format!("{} documents", total));
    display::row(&format!(
        " query {}  →  {}",
        query,
        display::truncate_text(&normalize(query), 40)
    ));
    display::row(&format!(
        " used {}  tier {}  margin {}",
        display::used_label(outcome.used),
        display::tier_badge(outcome.tier),
        display::margin_value(outcome.margin())
    ));
    display::section_top("results");
    if outcome.results.is_empty() {
        display::row(&display::themed(display::GRAY, &[], " no match"));
    }
    for (rank, result) in outcome.results.iter().enumerate() {
        display::row(&display::result_line(rank + 1, result));
    }
    display::section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// NORMALIZE
// ═══════════════════════════════════════════════════════════════════════════

fn run_normalize(text: &str) {
    let normalized = normalize(text);
    println!(
        "{}\t{}\t{} chars",
        normalized,
        display::class_label(classify(text)),
        normalized.chars().count()
    );
}
