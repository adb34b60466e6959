mod tokenizer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use corpus::{Bm25Params, CorpusIndex};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tokenizer::tokenize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct TermScore {
    term: String,
    score: f64,
}

#[derive(Parser)]
#[command(name = "ranker")]
#[command(about = "Rank document terms with BM25 or classic TF-IDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score terms of documents read from text files or JSONL
    Rank {
        /// Input path (file or directory; .jsonl files hold {id, body} records,
        /// other files are one document each keyed by path)
        #[arg(long)]
        input: String,
        /// Terms to print per document
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Use classic TF-IDF instead of BM25
        #[arg(long, default_value_t = false)]
        tfidf: bool,
        /// BM25 k1 parameter (term-frequency saturation)
        #[arg(long, default_value_t = 1.5)]
        k1: f64,
        /// BM25 b parameter (length-normalization strength)
        #[arg(long, default_value_t = 0.75)]
        b: f64,
        /// Emit JSON instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            input,
            top,
            tfidf,
            k1,
            b,
            json,
        } => rank(
            &input,
            top,
            tfidf,
            Bm25Params { k1, b, delta: 0.0 },
            json,
        ),
    }
}

fn rank(input: &str, top: usize, tfidf: bool, params: Bm25Params, json: bool) -> Result<()> {
    let input_path = Path::new(input);

    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        anyhow::bail!("input path not found: {input}");
    }

    let mut index: CorpusIndex<String> = CorpusIndex::new();
    for file in &files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            ingest_jsonl(file, &mut index)?;
        } else {
            ingest_text(file, &mut index)?;
        }
    }
    tracing::info!(
        docs = index.len(),
        updates = index.doc_count(),
        "corpus ingested"
    );

    let scores = if tfidf {
        index.generate_tfidf()
    } else {
        index.generate_bm25_with(params)
    };

    // Score maps are unordered; sort by score descending with a term
    // tie-break for deterministic output.
    let mut ranked: BTreeMap<String, Vec<TermScore>> = BTreeMap::new();
    for (doc_id, terms) in scores {
        let mut entries: Vec<TermScore> = terms
            .into_iter()
            .map(|(term, score)| TermScore { term, score })
            .collect();
        entries.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.term.cmp(&b.term))
        });
        entries.truncate(top.max(1));
        ranked.insert(doc_id, entries);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        for (doc_id, entries) in &ranked {
            println!("{doc_id}");
            for entry in entries {
                println!("  {:<24} {:.6}", entry.term, entry.score);
            }
        }
    }
    Ok(())
}

fn ingest_jsonl(file: &Path, index: &mut CorpusIndex<String>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)?;
        index.update(tokenize(&doc.body), doc.id);
    }
    Ok(())
}

fn ingest_text(file: &Path, index: &mut CorpusIndex<String>) -> Result<()> {
    let body = std::fs::read_to_string(file)?;
    let doc_id = file.to_string_lossy().to_string();
    index.update(tokenize(&body), doc_id);
    Ok(())
}
