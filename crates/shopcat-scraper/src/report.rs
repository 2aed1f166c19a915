//! Progress narration emitted while a session runs.
//!
//! Reporting is a side channel: the engine never reads anything back from a
//! [`Reporter`], and nothing it reports changes control flow.

use std::fmt;
use std::time::Duration;

use shopcat_core::{CatalogKind, ProductRecord};

use crate::pacing::Pause;

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Navigating { url: String },
    PageLoaded,
    InitialLoadFailed { waited_secs: u64 },
    PageStarted { page: u32 },
    /// One newly found record; `index` is 1-based within its catalog.
    RecordPreview {
        kind: CatalogKind,
        index: usize,
        record: ProductRecord,
    },
    /// Emitted once, when the first record past the preview limit is found.
    PreviewTruncated { kind: CatalogKind, limit: usize },
    NoNewRecords { kind: CatalogKind },
    NextClicked { page: u32 },
    NoNextControl,
    Waiting { pause: Pause, delay: Duration },
    LoadingSoldOut,
    LoadMoreClicked { clicks: u32 },
    SoldOutLoaded { clicks: u32 },
    ExtractingSoldOut,
    SectionSkipped { title: String },
    Totals { available: usize, sold_out: usize },
    CatalogPreview {
        kind: CatalogKind,
        records: Vec<ProductRecord>,
    },
    Exported { destination: String },
}

/// Receives [`ProgressEvent`]s.
pub trait Reporter {
    fn report(&mut self, event: ProgressEvent);
}

/// Collects events in order; handy for inspecting a run after the fact.
impl Reporter for Vec<ProgressEvent> {
    fn report(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}

/// Reports a [`ProgressEvent::RecordPreview`] for each of `records` whose
/// 1-based catalog index is within `limit`, and a single
/// [`ProgressEvent::PreviewTruncated`] when the index first passes it.
///
/// `first_index` is the catalog index of `records[0]`.
pub(crate) fn preview_new_records(
    reporter: &mut dyn Reporter,
    kind: CatalogKind,
    first_index: usize,
    records: &[ProductRecord],
    limit: usize,
) {
    for (offset, record) in records.iter().enumerate() {
        let index = first_index + offset;
        if index <= limit {
            reporter.report(ProgressEvent::RecordPreview {
                kind,
                index,
                record: record.clone(),
            });
        } else if index == limit + 1 {
            reporter.report(ProgressEvent::PreviewTruncated { kind, limit });
        }
    }
}

/// Formats `n` with `,` between groups of three digits.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn write_record(f: &mut fmt::Formatter<'_>, record: &ProductRecord) -> fmt::Result {
    write!(
        f,
        "{} | Price: Rp{} | Sold: {}",
        record.name,
        group_thousands(record.price),
        record.monthly_sales
    )
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::Navigating { url } => write!(f, "Visiting {url}"),
            ProgressEvent::PageLoaded => write!(f, "Page loaded."),
            ProgressEvent::InitialLoadFailed { waited_secs } => write!(
                f,
                "Page failed to load or no products were found within {waited_secs}s."
            ),
            ProgressEvent::PageStarted { page } => {
                write!(f, "\nScraping available products - page {page}...")
            }
            ProgressEvent::RecordPreview {
                kind,
                index,
                record,
            } => {
                write!(f, "  [{} #{index}] ", kind.label())?;
                write_record(f, record)
            }
            ProgressEvent::PreviewTruncated { kind, limit } => write!(
                f,
                "\n... (previewing up to {limit} {kind} products, scraping continues) ..."
            ),
            ProgressEvent::NoNewRecords { kind } => write!(f, "No new {kind} products."),
            ProgressEvent::NextClicked { page } => write!(f, "Clicked next, now on page {page}."),
            ProgressEvent::NoNextControl => {
                write!(f, "No next button. Moving on to sold-out products.")
            }
            ProgressEvent::Waiting { pause, delay } => {
                let secs = delay.as_secs_f64();
                match pause {
                    Pause::PageTurn => {
                        write!(f, "Waiting {secs:.2} seconds before the next page...")
                    }
                    Pause::Section => {
                        write!(f, "Waiting {secs:.2} seconds before the next section...")
                    }
                    Pause::PhaseBreak => write!(
                        f,
                        "Resting {secs:.2} seconds before scraping sold-out products..."
                    ),
                    _ => write!(f, "Waiting {secs:.2} seconds..."),
                }
            }
            ProgressEvent::LoadingSoldOut => write!(f, "\nLoading all sold-out products..."),
            ProgressEvent::LoadMoreClicked { clicks } => {
                write!(f, "Clicked 'see more' to load more sold-out products ({clicks}).")
            }
            ProgressEvent::SoldOutLoaded { clicks } => write!(
                f,
                "All sold-out products loaded after {clicks} 'see more' clicks."
            ),
            ProgressEvent::ExtractingSoldOut => write!(f, "\nScraping sold-out products..."),
            ProgressEvent::SectionSkipped { title } => {
                write!(f, "Skipping recommendation section \"{title}\".")
            }
            ProgressEvent::Totals {
                available,
                sold_out,
            } => write!(
                f,
                "\nTotal available products: {available}\nTotal sold-out products : {sold_out}"
            ),
            ProgressEvent::CatalogPreview { kind, records } => {
                write!(f, "\nFinal preview of {kind} products:")?;
                if records.is_empty() {
                    return write!(f, "\nNo data.");
                }
                for (i, record) in records.iter().enumerate() {
                    write!(f, "\n{i:>5}  ")?;
                    write_record(f, record)?;
                }
                Ok(())
            }
            ProgressEvent::Exported { destination } => {
                write!(f, "Data saved to {destination}")
            }
        }
    }
}
