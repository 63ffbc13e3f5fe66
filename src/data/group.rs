use super::model::{FileGroup, RunIndex, UNINDEXED};

// ---------------------------------------------------------------------------
// Index extraction
// ---------------------------------------------------------------------------

/// Parse the integer before the first `_` of a file name.
///
/// Names without a parseable prefix map to [`UNINDEXED`].
pub fn extract_index(name: &str) -> RunIndex {
    let prefix = name.split('_').next().unwrap_or("");
    prefix.parse::<RunIndex>().unwrap_or(UNINDEXED)
}

/// Stable ascending sort by [`extract_index`].
pub fn sort_by_index(files: &mut [String]) {
    files.sort_by_key(|name| extract_index(name));
}

// ---------------------------------------------------------------------------
// Gap clustering
// ---------------------------------------------------------------------------

/// Split an index-sorted file list into groups.
///
/// A new group starts whenever the index difference between a file and the
/// one immediately before it exceeds `max_gap`. Concatenating the groups in
/// order gives back the input.
pub fn group_by_gap(files: &[String], max_gap: RunIndex) -> Vec<FileGroup> {
    let mut groups = Vec::new();
    let Some((first, rest)) = files.split_first() else {
        return groups;
    };

    let mut prev = extract_index(first);
    let mut current = FileGroup::start(first.clone(), prev);

    for name in rest {
        let index = extract_index(name);
        if index.saturating_sub(prev) > max_gap {
            groups.push(std::mem::replace(
                &mut current,
                FileGroup::start(name.clone(), index),
            ));
        } else {
            current.push(name.clone(), index);
        }
        prev = index;
    }
    groups.push(current);

    groups
}
