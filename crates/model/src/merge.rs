use crate::record::UnifiedRecord;

/// Concatenates `first` then `second` and stable-sorts by timestamp.
///
/// Equal timestamps keep concatenation order, so records from `first`
/// precede those from `second`.
pub fn merge_ordered(first: Vec<UnifiedRecord>, second: Vec<UnifiedRecord>) -> Vec<UnifiedRecord> {
    let mut merged = first;
    merged.extend(second);
    merged.sort_by_key(|record| record.timestamp);
    merged
}
