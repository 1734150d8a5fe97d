use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use search_core::{
    process_queries, remove_duplicates, DocumentStatus, ExecutionMode, RequestQueue, SearchEngine,
};
use search_cli::load_documents;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Query an in-memory TF-IDF index built from JSON/JSONL documents", long_about = None)]
struct Cli {
    /// Input path (file or directory of .json / .jsonl documents)
    #[arg(long, global = true, default_value = "./docs")]
    input: PathBuf,
    /// Space-delimited stop-words
    #[arg(long, global = true, default_value = "")]
    stop_words: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or more queries and print the top documents as JSON lines
    Search {
        /// Query text; repeat the flag for several queries
        #[arg(long = "query", required = true)]
        queries: Vec<String>,
        /// Only return documents with this status
        #[arg(long, value_enum, default_value_t = StatusArg::Active)]
        status: StatusArg,
        /// Rank on the rayon pool
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Drop documents with duplicate term sets before querying
        #[arg(long, default_value_t = false)]
        dedup: bool,
        /// Print how many queries came back empty
        #[arg(long, default_value_t = false)]
        track_empty: bool,
    },
    /// Report and drop documents whose term set duplicates an earlier one
    Dedup,
    /// Print the plus-terms of a query that occur in each document
    Match {
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Active,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => DocumentStatus::Active,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    took_s: f64,
    results: Vec<search_core::Document>,
}

fn execution_mode(parallel: bool) -> ExecutionMode {
    if parallel { ExecutionMode::Parallel } else { ExecutionMode::Sequential }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let mut engine = SearchEngine::with_stop_words_text(&cli.stop_words)?;
    load_documents(&mut engine, &cli.input)?;

    match cli.command {
        Commands::Search { queries, status, parallel, dedup, track_empty } => {
            if dedup {
                remove_duplicates(&mut engine);
            }
            run_search(&engine, &queries, status.into(), execution_mode(parallel), track_empty)
        }
        Commands::Dedup => {
            let removed = remove_duplicates(&mut engine);
            println!("{}", serde_json::json!({ "removed": removed, "remaining": engine.document_count() }));
            Ok(())
        }
        Commands::Match { query, parallel } => {
            let mode = execution_mode(parallel);
            for id in engine.document_ids() {
                let result = engine.match_document(mode, &query, id)?;
                println!("{}", serde_json::json!({ "doc_id": id, "match": result }));
            }
            Ok(())
        }
    }
}

fn run_search(
    engine: &SearchEngine,
    queries: &[String],
    status: DocumentStatus,
    mode: ExecutionMode,
    track_empty: bool,
) -> Result<()> {
    if track_empty {
        let mut queue = RequestQueue::new(engine);
        for query in queries {
            let start = std::time::Instant::now();
            let results = queue.add_find_request(query, status)?;
            print_output(query, start.elapsed().as_secs_f64(), results)?;
        }
        tracing::info!(empty = queue.empty_result_count(), "requests with no results");
        println!("{}", serde_json::json!({ "empty_requests": queue.empty_result_count() }));
        return Ok(());
    }

    if mode == ExecutionMode::Parallel && status == DocumentStatus::Active && queries.len() > 1 {
        let start = std::time::Instant::now();
        let batches = process_queries(engine, queries)?;
        let elapsed = start.elapsed().as_secs_f64();
        for (query, results) in queries.iter().zip(batches) {
            print_output(query, elapsed, results)?;
        }
        return Ok(());
    }

    for query in queries {
        let start = std::time::Instant::now();
        let results = engine.find_top_documents(mode, query, status)?;
        print_output(query, start.elapsed().as_secs_f64(), results)?;
    }
    Ok(())
}

fn print_output(query: &str, took_s: f64, results: Vec<search_core::Document>) -> Result<()> {
    let out = SearchOutput { query, took_s, results };
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
