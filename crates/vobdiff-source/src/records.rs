//! Raw change-record parsing and exclusion filtering.
//!
//! The revision source emits newline-separated records of tab-separated
//! fields: path, previous version, current version, and (branch queries
//! only) hyperlink annotations.

use regex::Regex;
use tracing::debug;

use vobdiff_types::ChangeRecord;

use crate::error::{SourceError, SourceResult};

/// Parse raw revision-source output into change records.
///
/// Empty lines are skipped. A line with fewer than three fields indicates
/// a corrupted response and fails the whole query.
pub fn parse_records(output: &str) -> SourceResult<Vec<ChangeRecord>> {
    let mut records = Vec::new();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let [path, previous, current, rest @ ..] = fields.as_slice() else {
            return Err(SourceError::MalformedRecord(line.to_string()));
        };

        let annotations = rest
            .iter()
            .filter(|field| !field.is_empty())
            .map(|field| field.to_string())
            .collect();

        records.push(ChangeRecord::new(*path, *previous, *current).with_annotations(annotations));
    }

    Ok(records)
}

/// Drops records whose path matches an exclusion pattern.
///
/// Pass-through when no pattern is configured.
#[derive(Clone, Debug, Default)]
pub struct RecordFilter {
    pattern: Option<Regex>,
}

impl RecordFilter {
    pub fn new(pattern: Option<Regex>) -> Self {
        Self { pattern }
    }

    /// Remove every record whose path matches the pattern.
    pub fn apply(&self, records: Vec<ChangeRecord>) -> Vec<ChangeRecord> {
        let Some(pattern) = &self.pattern else {
            return records;
        };

        records
            .into_iter()
            .filter(|record| {
                if pattern.is_match(&record.path) {
                    debug!(path = %record.path, "excluding from diff");
                    false
                } else {
                    true
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_checkout_records() {
        let output = "foo.c\t/main/1\t/main/CHECKEDOUT\nbar.h\t/main/3\t/main/CHECKEDOUT\n";
        let records = parse_records(output).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, "foo.c");
        assert_eq!(records[0].previous.as_str(), "/main/1");
        assert!(records[0].current.is_checkedout());
        assert!(records[0].annotations.is_empty());
    }

    #[test]
    fn parses_branch_record_with_annotation() {
        let output = "foo.c\t/main/2\t/main/topic/1\t\"Merge@/vobs/proj\" <- \"/main/other\"\n";
        let records = parse_records(output).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].annotations,
            vec!["\"Merge@/vobs/proj\" <- \"/main/other\""]
        );
    }

    #[test]
    fn empty_annotation_field_is_dropped() {
        let output = "foo.c\t/main/2\t/main/topic/1\t\n";
        let records = parse_records(output).unwrap();
        assert!(records[0].annotations.is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let records = parse_records("\nfoo.c\t/main/1\t/main/2\n\n").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn short_record_is_malformed() {
        let result = parse_records("foo.c\t/main/1\n");
        assert!(matches!(result, Err(SourceError::MalformedRecord(_))));
    }

    #[test]
    fn filter_drops_matching_paths() {
        let records = vec![
            ChangeRecord::new("src/foo.c", "/main/1", "/main/2"),
            ChangeRecord::new("docs/readme.txt", "/main/1", "/main/2"),
        ];
        let filter = RecordFilter::new(Some(Regex::new(r"\.txt$").unwrap()));
        let kept = filter.apply(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].path, "src/foo.c");
    }

    #[test]
    fn filter_without_pattern_is_pass_through() {
        let records = vec![ChangeRecord::new("src/foo.c", "/main/1", "/main/2")];
        let kept = RecordFilter::new(None).apply(records.clone());
        assert_eq!(kept, records);
    }
}
