//! Parsers for the domain-search tool's per-target tabular report (`--tblout`).
//!
//! Data rows are whitespace separated: target sequence id, target accession,
//! query model name, query accession (the domain id, possibly `PF00067.24`),
//! full-sequence e-value, then score and bookkeeping columns. Lines starting
//! with `#` are comments.

use crate::domain::model::{BestHit, DomainCount, RawHit};
use crate::utils::text::for_each_lossy_line;
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;

const COMMENT_MARKER: char = '#';

/// Columns required for a row to take part in best-hit selection.
pub const BEST_HIT_MIN_COLUMNS: usize = 18;

/// Columns required by the presence parser.
pub const PRESENCE_MIN_COLUMNS: usize = 13;

pub const DEFAULT_PRESENCE_EVALUE: f64 = 1e-5;

/// Drops the version suffix: `PF00067.24` -> `PF00067`.
pub fn strip_version(domain_id: &str) -> &str {
    domain_id.split('.').next().unwrap_or(domain_id)
}

fn data_columns(line: &str, min_columns: usize) -> Option<Vec<&str>> {
    if line.starts_with(COMMENT_MARKER) {
        return None;
    }
    let columns: Vec<&str> = line.split_whitespace().collect();
    (columns.len() >= min_columns).then_some(columns)
}

fn parse_e_value(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parses one data row. Comments, short rows and unparsable e-values yield `None`.
pub fn parse_row(line: &str) -> Option<RawHit> {
    let columns = data_columns(line, BEST_HIT_MIN_COLUMNS)?;
    let e_value = parse_e_value(columns[4])?;
    Some(RawHit {
        sequence_id: columns[0].to_string(),
        model_name: columns[2].to_string(),
        domain_id: strip_version(columns[3]).to_string(),
        e_value,
    })
}

/// Keeps the lowest e-value hit per sequence and counts sequences per
/// `(domain, model)`.
///
/// Selection is a running minimum, so the result does not depend on how the
/// report is sorted. A later row replaces the stored hit only when its e-value
/// is strictly lower, so ties keep the first row. Groups are emitted in the
/// order their first sequence appeared in the report.
pub fn parse_best_hits<R: BufRead>(reader: R) -> std::io::Result<Vec<DomainCount>> {
    let mut sequence_order: Vec<String> = Vec::new();
    let mut best_hits: HashMap<String, BestHit> = HashMap::new();

    for_each_lossy_line(reader, |line| {
        let Some(hit) = parse_row(line) else {
            return;
        };
        match best_hits.get_mut(&hit.sequence_id) {
            Some(current) => {
                if hit.e_value < current.e_value {
                    *current = BestHit {
                        domain_id: hit.domain_id,
                        model_name: hit.model_name,
                        e_value: hit.e_value,
                    };
                }
            }
            None => {
                sequence_order.push(hit.sequence_id.clone());
                best_hits.insert(
                    hit.sequence_id,
                    BestHit {
                        domain_id: hit.domain_id,
                        model_name: hit.model_name,
                        e_value: hit.e_value,
                    },
                );
            }
        }
    })?;

    let mut profile: Vec<DomainCount> = Vec::new();
    let mut group_index: HashMap<(String, String), usize> = HashMap::new();
    for sequence_id in &sequence_order {
        let Some(best) = best_hits.remove(sequence_id) else {
            continue;
        };
        let key = (best.domain_id, best.model_name);
        match group_index.get(&key) {
            Some(&index) => profile[index].count += 1,
            None => {
                group_index.insert(key.clone(), profile.len());
                profile.push(DomainCount {
                    domain_id: key.0,
                    model_name: key.1,
                    count: 1,
                });
            }
        }
    }

    Ok(profile)
}

/// Domain ids with at least one row below `threshold`, regardless of which
/// sequence they hit.
pub fn parse_domain_presence<R: BufRead>(
    reader: R,
    threshold: f64,
) -> std::io::Result<BTreeSet<String>> {
    let mut domains = BTreeSet::new();
    for_each_lossy_line(reader, |line| {
        let Some(columns) = data_columns(line, PRESENCE_MIN_COLUMNS) else {
            return;
        };
        let Some(e_value) = parse_e_value(columns[4]) else {
            return;
        };
        if e_value < threshold {
            domains.insert(strip_version(columns[3]).to_string());
        }
    })?;
    Ok(domains)
}
