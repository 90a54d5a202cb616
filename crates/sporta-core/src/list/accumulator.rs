//! Merging appended pages for infinite scroll.

use std::collections::HashSet;

use crate::traits::Identified;

/// Merge a freshly fetched page into the rendered items.
///
/// A first page replaces everything. Later pages only append items whose
/// id is not rendered yet, keeping `existing` order followed by `incoming`
/// order, so re-merging the same page is a no-op.
pub fn merge<T: Identified>(existing: Vec<T>, incoming: Vec<T>, is_first_page: bool) -> Vec<T> {
    let (mut merged, mut seen) = if is_first_page {
        (Vec::with_capacity(incoming.len()), HashSet::new())
    } else {
        let seen = existing.iter().map(Identified::id).collect::<HashSet<_>>();
        (existing, seen)
    };

    for item in incoming {
        if seen.insert(item.id()) {
            merged.push(item);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u64);

    impl Identified for Row {
        type Id = u64;

        fn id(&self) -> u64 {
            self.0
        }
    }

    fn rows(ids: &[u64]) -> Vec<Row> {
        ids.iter().copied().map(Row).collect()
    }

    #[test]
    fn pages_accumulate_without_duplicates() {
        let merged = merge(Vec::new(), rows(&[1, 2, 3]), true);
        let merged = merge(merged, rows(&[3, 4, 5]), false);
        let merged = merge(merged, rows(&[5, 6]), false);
        assert_eq!(merged, rows(&[1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn first_page_replaces() {
        let merged = merge(rows(&[5, 6]), rows(&[1, 2]), true);
        assert_eq!(merged, rows(&[1, 2]));
    }

    #[test]
    fn re_merge_is_idempotent() {
        let existing = rows(&[1, 2, 3]);
        let incoming = rows(&[3, 4]);
        let once = merge(existing.clone(), incoming.clone(), false);
        let again = merge(existing, incoming.clone(), false);
        assert_eq!(once, again);

        let retried = merge(once.clone(), incoming, false);
        assert_eq!(retried, once);
    }

    #[test]
    fn duplicates_inside_one_page_collapse() {
        let merged = merge(Vec::new(), rows(&[7, 7, 8]), true);
        assert_eq!(merged, rows(&[7, 8]));
    }

    #[test]
    fn existing_items_never_removed() {
        let merged = merge(rows(&[1, 2]), Vec::new(), false);
        assert_eq!(merged, rows(&[1, 2]));
    }
}
