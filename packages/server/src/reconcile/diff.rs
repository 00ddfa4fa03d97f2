use std::collections::HashSet;

/// Assets present in storage that no content record references.
pub fn find_unused(stored: &HashSet<String>, referenced: &HashSet<String>) -> HashSet<String> {
    stored.difference(referenced).cloned().collect()
}
