//! # jamboree-parser
//!
//! Parser for jamboree problem documents (JSON).
//!
//! This crate provides:
//! - Serde document records mirroring the JSON input contract
//! - Document to domain model conversion, including selection
//!   materialization from the groups' stated priorities
//!
//! ## Example
//!
//! ```rust
//! use jamboree_parser::parse_problem;
//!
//! let input = r#"{
//!   "activities": [{
//!     "name": "Archery",
//!     "identifier": "A1",
//!     "allowed_age_groups": [10, 11],
//!     "max_participants": 20,
//!     "available_sessions": [
//!       {"start": "2025-09-25T09:00:00", "end": "2025-09-25T10:00:00"}
//!     ],
//!     "out_of_camp": false
//!   }],
//!   "scoutgroups": [{
//!     "name": "Eagles",
//!     "identifier": "G1",
//!     "agegroup": 10,
//!     "size": 12,
//!     "available_timeslots": [
//!       {"start": "2025-09-25T08:00:00", "end": "2025-09-25T18:00:00"}
//!     ],
//!     "priorities": [{"activity": "A1", "value": 3}]
//!   }]
//! }"#;
//!
//! let problem = parse_problem(input).unwrap();
//! assert_eq!(problem.selections().len(), 1);
//! ```

pub mod document;

use jamboree_core::{Problem, ValidationError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parsing error
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed problem document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scout group '{group}' ranks unknown activity '{activity}'")]
    UnknownActivity { group: String, activity: String },

    #[error("scout group '{group}' ranks activity '{activity}' more than once")]
    DuplicatePriority { group: String, activity: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Parse a problem from a JSON document string.
pub fn parse_problem(input: &str) -> Result<Problem, ParseError> {
    let doc: document::ProblemDocument = serde_json::from_str(input)?;
    doc.into_problem()
}

/// Parse a problem document from a path.
pub fn load_problem(path: &Path) -> Result<Problem, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_problem(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(priorities: &str) -> String {
        format!(
            r#"{{
              "activities": [
                {{
                  "name": "Archery",
                  "identifier": "A1",
                  "allowed_age_groups": [10, 11, 12],
                  "max_participants": 20,
                  "available_sessions": [
                    {{"start": "2025-09-26T09:00:00", "end": "2025-09-26T10:00:00"}},
                    {{"start": "2025-09-25T09:00:00", "end": "2025-09-25T10:00:00"}}
                  ],
                  "out_of_camp": false
                }}
              ],
              "scoutgroups": [
                {{
                  "name": "Eagles",
                  "identifier": "G1",
                  "agegroup": 12,
                  "size": 10,
                  "available_timeslots": [
                    {{"start": "2025-09-25T08:00:00", "end": "2025-09-26T18:00:00"}}
                  ],
                  "priorities": [{priorities}]
                }}
              ]
            }}"#
        )
    }

    #[test]
    fn test_parse_materializes_one_selection_per_session() {
        let problem = parse_problem(&document(r#"{"activity": "A1", "value": 3}"#)).unwrap();

        assert_eq!(problem.selections().len(), 2);
        // sessions come out sorted by start
        assert!(problem.selections()[0].slot < problem.selections()[1].slot);
        assert!(problem
            .selections()
            .iter()
            .all(|s| s.group == "G1" && s.activity == "A1" && s.priority == 3));
    }

    #[test]
    fn test_parse_rejects_unknown_activity_in_priorities() {
        let result = parse_problem(&document(r#"{"activity": "A9", "value": 3}"#));
        assert!(matches!(
            result,
            Err(ParseError::UnknownActivity { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_priority() {
        let result = parse_problem(&document(
            r#"{"activity": "A1", "value": 3}, {"activity": "A1", "value": 1}"#,
        ));
        assert!(matches!(
            result,
            Err(ParseError::DuplicatePriority { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let result = parse_problem("{\"activities\": [");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_propagates_domain_validation() {
        // reversed session bounds
        let input = document("").replace(
            r#""start": "2025-09-26T09:00:00", "end": "2025-09-26T10:00:00""#,
            r#""start": "2025-09-26T10:00:00", "end": "2025-09-26T09:00:00""#,
        );
        let result = parse_problem(&input);
        assert!(matches!(
            result,
            Err(ParseError::Invalid(ValidationError::EmptyTimeSlot { .. }))
        ));
    }

    #[test]
    fn test_load_problem_not_found() {
        let result = load_problem(Path::new("/nonexistent/path/problem.json"));
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }

    #[test]
    fn test_load_problem_from_file() {
        use std::io::Write;
        let mut temp_file = tempfile::NamedTempFile::with_suffix(".json").unwrap();
        write!(temp_file, "{}", document(r#"{"activity": "A1", "value": 2}"#)).unwrap();

        let problem = load_problem(temp_file.path()).unwrap();
        assert_eq!(problem.activities().len(), 1);
        assert_eq!(problem.groups().len(), 1);
        assert_eq!(problem.selections().len(), 2);
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnknownActivity {
            group: "G1".to_string(),
            activity: "A9".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("G1"));
        assert!(msg.contains("A9"));

        let err2 = ParseError::DuplicatePriority {
            group: "G1".to_string(),
            activity: "A1".to_string(),
        };
        assert!(format!("{}", err2).contains("more than once"));
    }
}
