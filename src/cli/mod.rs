// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the shingle command-line interface.
//!
//! Three subcommands: `serve` runs the worker protocol over stdin/stdout,
//! `search` builds an index from a JSON file and queries it once, and
//! `normalize` shows what the normalizer does to a string.

pub mod corpus;
pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shingle",
    about = "Trigram fuzzy search for short, noisy queries",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the search worker, one JSON message per line on stdin
    ///
    /// Responses are written to stdout, one JSON object per line. Logs go to
    /// stderr; set SHINGLE_LOG=shingle=debug to see tier decisions.
    Serve {
        /// Engine config file (JSON, camelCase keys)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Turn on fast (trigram) search
        #[arg(long)]
        fast: bool,

        /// Log fast-vs-legacy agreement for every fast search
        #[arg(long)]
        shadow: bool,
    },

    /// Index a JSON document file and run one query against it
    Search {
        /// Document array, or a question/answer dump with a `data` array
        #[arg(short, long)]
        docs: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "3")]
        limit: usize,

        /// Skip the trigram tier
        #[arg(long)]
        no_fast: bool,

        /// Print the search-result message as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Engine config file (JSON, camelCase keys)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the normalized form of TEXT and its length class
    Normalize {
        text: String,
    },
}
