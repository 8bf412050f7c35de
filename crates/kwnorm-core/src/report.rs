//! Duplicate report — near-duplicate groups laid out for manual review

use serde::{Deserialize, Serialize};

use crate::annotate::Annotation;

/// One row that belongs to a duplicate group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Zero-based data row index (header excluded)
    pub row: usize,
    /// The keyword exactly as it appeared in the source
    pub keyword: String,
}

/// All rows sharing one canonical key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub key: String,
    pub members: Vec<GroupMember>,
}

impl DuplicateGroup {
    pub fn variants(&self) -> usize {
        self.members.len()
    }
}

/// Summary of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub total_rows: usize,
    /// Rows carrying a non-empty duplicate-group label
    pub duplicate_rows: usize,
    /// Groups sorted by key; members in row order
    pub groups: Vec<DuplicateGroup>,
}

impl DuplicateReport {
    /// Build the report from the original keywords and their annotations.
    ///
    /// `keywords[i]` is the display form of row `i`; non-text rows can pass
    /// an empty string.
    pub fn from_annotations<S: AsRef<str>>(keywords: &[S], annotations: &[Annotation]) -> Self {
        let mut groups: Vec<DuplicateGroup> = Vec::new();
        let mut order: Vec<(&str, usize)> = annotations
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_duplicate())
            .map(|(row, a)| (a.duplicate_group.as_str(), row))
            .collect();
        let duplicate_rows = order.len();

        // Stable sort keeps row order inside a group
        order.sort_by(|a, b| a.0.cmp(b.0));

        for (key, row) in order {
            let member = GroupMember {
                row,
                keyword: keywords
                    .get(row)
                    .map(|k| k.as_ref().to_string())
                    .unwrap_or_default(),
            };
            match groups.last_mut() {
                Some(group) if group.key == key => group.members.push(member),
                _ => groups.push(DuplicateGroup {
                    key: key.to_string(),
                    members: vec![member],
                }),
            }
        }

        Self {
            total_rows: annotations.len(),
            duplicate_rows,
            groups,
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Pretty-printed JSON form
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
