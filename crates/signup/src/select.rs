use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::{ContactRecord, RawRow};

/// E-mails already recorded in a tracking sheet.
///
/// Reads `column` of every row after the header; blank cells are skipped.
pub fn existing_emails(rows: &[RawRow], column: usize) -> HashSet<String> {
    rows.iter()
        .skip(1)
        .filter_map(|row| row.get(column))
        .filter(|cell| !cell.is_blank())
        .map(|cell| cell.to_string())
        .collect()
}

/// Sign-ups to copy: not yet recorded, with a class day on or after `cutoff`.
///
/// Output is ordered by class day (stable for equal days). Records without
/// a usable class day sort last and are never selected.
pub fn select_new(
    existing: &HashSet<String>,
    candidates: &[ContactRecord],
    cutoff: NaiveDate,
) -> Vec<ContactRecord> {
    let mut sorted: Vec<&ContactRecord> = candidates.iter().collect();
    sorted.sort_by(|a, b| compare_class_day(a, b));

    sorted
        .into_iter()
        .filter(|c| !existing.contains(&c.email))
        .filter(|c| c.class_day.is_some_and(|day| day >= cutoff))
        .cloned()
        .collect()
}

fn compare_class_day(a: &ContactRecord, b: &ContactRecord) -> Ordering {
    match (a.class_day, b.class_day) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
