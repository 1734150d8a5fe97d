use anyhow::{Context, Result};
use search_core::{DocId, DocumentStatus, SearchEngine};
use serde::Deserialize;
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub added: usize,
    pub skipped: usize,
}

/// Collects `.json` / `.jsonl` files under `input`, or `input` itself if it is a file.
pub fn collect_input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

/// Reads every input file into `engine`. Documents the engine rejects are
/// logged and skipped; unreadable or malformed files abort the load.
pub fn load_documents(engine: &mut SearchEngine, input: &Path) -> Result<IngestStats> {
    let mut stats = IngestStats::default();
    for file in collect_input_files(input) {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        for doc in docs {
            ingest_doc(engine, doc, &mut stats);
        }
    }
    tracing::info!(added = stats.added, skipped = stats.skipped, "documents loaded");
    Ok(stats)
}

fn ingest_doc(engine: &mut SearchEngine, doc: InputDoc, stats: &mut IngestStats) {
    match engine.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
        Ok(()) => stats.added += 1,
        Err(err) => {
            tracing::warn!(doc_id = doc.id, %err, "skipping document");
            stats.skipped += 1;
        }
    }
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut docs = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", file.display()))?;
    let docs = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<InputDoc>, _>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}
