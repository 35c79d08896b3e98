//! Grouping and sorting of declarations into canonical order.
//!
//! Groups hold positions into the caller's declaration slice, so the
//! canonical sequence is a permutation of indices and identity survives
//! the reordering.

use crate::classify::{classify, Category};
use crate::collate;
use crate::models::Declaration;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Non-empty run of declarations sharing a category, sorted by specifier.
pub struct Group {
    pub category: Category,
    pub members: Vec<usize>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition `decls` into category groups in fixed category order.
///
/// Empty categories are omitted. Members are sorted by specifier with a
/// stable sort, so identical specifiers keep their original relative order.
pub fn build_groups(decls: &[Declaration]) -> Vec<Group> {
    let mut buckets: [Vec<usize>; 4] = Default::default();
    for (i, decl) in decls.iter().enumerate() {
        let category = classify(decl.source.as_deref());
        buckets[category.index()].push(i);
    }
    Category::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, members)| !members.is_empty())
        .map(|(category, mut members)| {
            members.sort_by(|&a, &b| collate::compare(decls[a].sort_key(), decls[b].sort_key()));
            Group { category, members }
        })
        .collect()
}

/// Concatenate group members in group order.
pub fn flatten(groups: &[Group]) -> Vec<usize> {
    groups
        .iter()
        .flat_map(|g| g.members.iter().copied())
        .collect()
}
