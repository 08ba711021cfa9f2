//! Preview command handler

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::time::Duration;

use docview::cache::{new_document_loader, CacheStats, DocumentLoader, PreviewState};
use docview::Config;

use super::truncate_string;
use crate::cli::PreviewArgs;

/// Width of the id column in text output
const ID_COLUMN_WIDTH: usize = 28;

/// Outcome for one requested document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DocumentOutcome {
    Ready { id: String, reference: String },
    Unavailable { id: String, reason: String },
}

/// Everything `docview preview` reports
#[derive(Debug, Serialize)]
pub struct PreviewReport {
    pub documents: Vec<DocumentOutcome>,
    /// Ids still cached at the end, least recently used first
    pub cached: Vec<String>,
    pub stats: CacheStats,
}

/// Handle the preview command.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: PreviewArgs) -> Result<()> {
    let mut config = Config::load()?;
    apply_overrides(&mut config, &args)?;

    let root = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Could not determine current directory")?,
    };
    let mut loader = new_document_loader(&config, &root)
        .context("Failed to set up preview storage")?;

    let report = run(&mut loader, &args.ids, Duration::from_secs(args.timeout));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, args: &PreviewArgs) -> Result<()> {
    if let Some(capacity) = args.capacity {
        config.cache.max_size = capacity;
    }
    if let Some(backend) = args.storage {
        config.storage.backend = backend;
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid options: {}", e))
}

/// Preview each id in order, waiting for it before moving on.
pub fn run(loader: &mut DocumentLoader, ids: &[String], timeout: Duration) -> PreviewReport {
    let mut documents = Vec::with_capacity(ids.len());

    for id in ids {
        loader.request(id);
        loader.wait(timeout);

        let outcome = match loader.state(id) {
            PreviewState::Ready(display) => DocumentOutcome::Ready {
                id: id.clone(),
                reference: display.to_string(),
            },
            PreviewState::Unavailable(reason) => DocumentOutcome::Unavailable {
                id: id.clone(),
                reason,
            },
            PreviewState::Pending => DocumentOutcome::Unavailable {
                id: id.clone(),
                reason: format!("timed out after {}s", timeout.as_secs()),
            },
            PreviewState::Idle => DocumentOutcome::Unavailable {
                id: id.clone(),
                reason: "evicted before it could be shown".to_string(),
            },
        };
        documents.push(outcome);
    }

    let cache = loader.cache();
    PreviewReport {
        documents,
        cached: cache.keys().map(str::to_string).collect(),
        stats: cache.stats(),
    }
}

/// Render the report as aligned text.
pub fn render_text(report: &PreviewReport) -> String {
    let mut out = String::new();
    for document in &report.documents {
        let line = match document {
            DocumentOutcome::Ready { id, reference } => format!(
                "{:<width$}  {}",
                truncate_string(id, ID_COLUMN_WIDTH),
                reference,
                width = ID_COLUMN_WIDTH
            ),
            DocumentOutcome::Unavailable { id, reason } => format!(
                "{:<width$}  preview unavailable: {}",
                truncate_string(id, ID_COLUMN_WIDTH),
                reason,
                width = ID_COLUMN_WIDTH
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }

    let stats = &report.stats;
    out.push('\n');
    out.push_str(&format!(
        "Cache: {}/{} previews, {} stored\n",
        stats.entries,
        stats.capacity,
        humansize::format_size(stats.bytes as u64, humansize::BINARY)
    ));
    out.push_str(&format!(
        "Hits: {}  Misses: {}  Evictions: {}\n",
        stats.hits, stats.misses, stats.evictions
    ));
    if !report.cached.is_empty() {
        out.push_str(&format!("Cached (oldest first): {}\n", report.cached.join(", ")));
    }
    out
}
