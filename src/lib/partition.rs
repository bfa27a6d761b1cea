//! Predicate splits of a sequence collection.

use crate::collection::SequenceCollection;

/// Splits a collection into the records whose category satisfies the
/// predicate and the rest. Both halves are bulk-built, so each carries its
/// own full set of aggregates; together they hold exactly the original
/// record multiset.
pub fn partition_by_category<F>(
    collection: &SequenceCollection,
    predicate: F,
) -> (SequenceCollection, SequenceCollection)
where
    F: Fn(&str) -> bool,
{
    let (matching, rest): (Vec<_>, Vec<_>) =
        collection.records().iter().cloned().partition(|record| predicate(&record.category));
    (SequenceCollection::from_records(matching), SequenceCollection::from_records(rest))
}
