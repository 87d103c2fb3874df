//! Vocabulary harvesting: reads every configured source, tokenizes the
//! selected cells and feeds the words into a `PrefixIndex`.
//!
//! Faults are isolated per row: a malformed row, or one that is too short
//! for its layout, is counted and skipped. A source that cannot be opened at
//! all is recorded as a failure and the remaining sources still load.
use listcomplete_core::PrefixIndex;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::error::IngestError;
use crate::reader::read_rows;
use crate::source::SourceSpec;
use crate::tokenize::Tokenizer;

/// Counters for one ingested source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub path: PathBuf,
    /// Data rows seen (header excluded).
    pub records_read: usize,
    /// Rows dropped because they failed to parse or lacked columns.
    pub records_skipped: usize,
    /// Words handed to the index.
    pub words_inserted: u64,
}

/// A source that contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a full build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub sources: Vec<SourceReport>,
    pub failures: Vec<SourceFailure>,
}

impl BuildReport {
    pub fn words_inserted(&self) -> u64 {
        self.sources.iter().map(|s| s.words_inserted).sum()
    }

    pub fn records_skipped(&self) -> usize {
        self.sources.iter().map(|s| s.records_skipped).sum()
    }
}

/// Fills a `PrefixIndex` from tabular sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct VocabularyBuilder {
    tokenizer: Tokenizer,
}

impl VocabularyBuilder {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Insert the words of every selected cell of `spec` into `index`.
    pub fn ingest(
        &self,
        index: &mut PrefixIndex,
        spec: &SourceSpec,
    ) -> Result<SourceReport, IngestError> {
        let layout = spec.layout()?;
        let rows = read_rows(&spec.path, &layout)?;

        let mut report = SourceReport {
            path: spec.path.clone(),
            ..SourceReport::default()
        };

        for (n, row) in rows.enumerate() {
            report.records_read += 1;
            let row = match row {
                Ok(row) => row,
                Err(reason) => {
                    warn!(path = %spec.path.display(), row = n + 1, %reason, "skipping malformed row");
                    report.records_skipped += 1;
                    continue;
                }
            };
            if !layout.accepts(row.len()) {
                debug!(path = %spec.path.display(), row = n + 1, columns = row.len(), "skipping short row");
                report.records_skipped += 1;
                continue;
            }
            for cell in layout.columns.pick(row.as_slice()) {
                for word in self.tokenizer.tokens(cell) {
                    // Tokens are never empty, so insertion cannot be rejected.
                    if index.insert(&word).is_ok() {
                        report.words_inserted += 1;
                    }
                }
            }
        }

        info!(
            path = %spec.path.display(),
            records = report.records_read,
            skipped = report.records_skipped,
            words = report.words_inserted,
            "ingested source"
        );
        Ok(report)
    }

    /// Build one index from all `specs`.
    ///
    /// With `parallel`, each source is read into its own index on a scoped
    /// thread; the partial indexes are then merged in `specs` order, so the
    /// result is the same as a sequential build.
    pub fn build(&self, specs: &[SourceSpec], parallel: bool) -> (PrefixIndex, BuildReport) {
        let mut index = PrefixIndex::new();
        let mut report = BuildReport::default();

        if parallel && specs.len() > 1 {
            let partials: Vec<Result<(PrefixIndex, SourceReport), IngestError>> =
                std::thread::scope(|scope| {
                    let handles: Vec<_> = specs
                        .iter()
                        .map(|spec| {
                            scope.spawn(move || {
                                let mut local = PrefixIndex::new();
                                self.ingest(&mut local, spec).map(|r| (local, r))
                            })
                        })
                        .collect();
                    handles
                        .into_iter()
                        .map(|h| match h.join() {
                            Ok(res) => res,
                            Err(_) => Err(IngestError::WorkerPanicked),
                        })
                        .collect()
                });

            for (spec, partial) in specs.iter().zip(partials) {
                match partial {
                    Ok((local, source_report)) => {
                        index.merge_from(&local);
                        report.sources.push(source_report);
                    }
                    Err(e) => record_failure(&mut report, spec, e),
                }
            }
        } else {
            for spec in specs {
                match self.ingest(&mut index, spec) {
                    Ok(source_report) => report.sources.push(source_report),
                    Err(e) => record_failure(&mut report, spec, e),
                }
            }
        }

        info!(
            sources = report.sources.len(),
            failed = report.failures.len(),
            words = index.len(),
            nodes = index.node_count(),
            "vocabulary built"
        );
        (index, report)
    }
}

fn record_failure(report: &mut BuildReport, spec: &SourceSpec, e: IngestError) {
    error!(path = %spec.path.display(), error = %e, "source failed");
    report.failures.push(SourceFailure {
        path: spec.path.clone(),
        reason: e.to_string(),
    });
}
