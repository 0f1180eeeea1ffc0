// 🌱 Seeding - build a ledger from a CSV file
//
// Rows are `left,right,value`. Entities are matched by name (first match)
// and created on demand. A bad row is recorded and skipped; it never leaves
// a half-created entity behind.

use crate::ledger::{Domain, Ledger, Role};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRow {
    pub left: String,
    pub right: String,
    #[serde(default)]
    pub value: String,
}

impl SeedRow {
    pub fn new(left: impl Into<String>, right: impl Into<String>, value: impl Into<String>) -> Self {
        SeedRow {
            left: left.into(),
            right: right.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// Line in the source file (header is line 1)
    pub line: usize,
    pub kind: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub accepted: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Rows read from a seed file, each tagged with its source line, plus the
/// lines that could not be read as a row at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedInput {
    pub rows: Vec<(usize, SeedRow)>,
    pub malformed: Vec<RejectedRow>,
}

impl SeedInput {
    /// Number rows as if they followed a header line
    pub fn from_rows(rows: Vec<SeedRow>) -> Self {
        SeedInput {
            rows: rows.into_iter().enumerate().map(|(i, row)| (i + 2, row)).collect(),
            malformed: Vec::new(),
        }
    }
}

pub fn load_csv(csv_path: &Path) -> Result<SeedInput> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open seed file {}", csv_path.display()))?;
    read_rows(file)
}

/// Read `left,right,value` rows. A line with the wrong shape is kept aside
/// as malformed; only I/O failures and an unreadable header abort.
pub fn read_rows<R: Read>(reader: R) -> Result<SeedInput> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers().context("Failed to read seed header")?.clone();

    let mut input = SeedInput::default();
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => {
                return Err(err).context("Failed to read seed file");
            }
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line() as usize);
                input.malformed.push(malformed(line, err.to_string()));
                continue;
            }
        };

        let line = record.position().map_or(0, |p| p.line() as usize);
        if record.len() != headers.len() {
            let reason = format!("found {} fields, expected {}", record.len(), headers.len());
            input.malformed.push(malformed(line, reason));
            continue;
        }

        match record.deserialize::<SeedRow>(Some(&headers)) {
            Ok(row) => input.rows.push((line, row)),
            Err(err) => input.malformed.push(malformed(line, err.to_string())),
        }
    }

    Ok(input)
}

fn malformed(line: usize, reason: String) -> RejectedRow {
    warn!(line, "malformed seed row: {}", reason);
    RejectedRow {
        line,
        kind: "malformed_row".to_string(),
        reason,
    }
}

/// Apply the rows of `input` to `ledger`, one join per row.
pub fn seed_ledger<D: Domain>(ledger: &mut Ledger<D>, input: &SeedInput) -> SeedSummary {
    let mut summary = SeedSummary {
        accepted: 0,
        rejected: input.malformed.clone(),
    };

    for (line, row) in &input.rows {
        let line = *line;
        match apply_row(ledger, row) {
            Ok(()) => summary.accepted += 1,
            Err(err) => {
                warn!(line, kind = err.kind(), "rejected seed row: {}", err);
                summary.rejected.push(RejectedRow {
                    line,
                    kind: err.kind().to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }
    summary.rejected.sort_by_key(|r| r.line);

    info!(
        join = D::JOIN,
        accepted = summary.accepted,
        rejected = summary.rejected.len(),
        "seeding finished"
    );
    summary
}

fn apply_row<D: Domain>(ledger: &mut Ledger<D>, row: &SeedRow) -> crate::error::Result<()> {
    // Validate everything before creating anything
    let existing_left = ledger.find_by_name(Role::Left, &row.left).map(|e| e.id());
    let existing_right = ledger.find_by_name(Role::Right, &row.right).map(|e| e.id());
    if existing_left.is_none() {
        ledger.check_name(Role::Left, &row.left)?;
    }
    if existing_right.is_none() {
        ledger.check_name(Role::Right, &row.right)?;
    }
    let payload = D::parse_payload(&row.value, ledger.config())?;
    ledger.check_payload(&payload)?;

    let left = match existing_left {
        Some(id) => id,
        None => ledger.add_left(row.left.as_str())?,
    };
    let right = match existing_right {
        Some(id) => id,
        None => ledger.add_right(row.right.as_str())?,
    };

    ledger.associate(left, right, payload)?;
    Ok(())
}
