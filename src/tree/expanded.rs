use std::collections::HashSet;

/// Set of directory ids whose children are visible.
///
/// Absent ids are collapsed. Operations consume the set and return the
/// updated value, so callers always hold exactly one copy of the state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedPaths {
    ids: HashSet<String>,
}

impl ExpandedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`.
    #[must_use]
    pub fn toggle(mut self, id: &str) -> Self {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
        self
    }

    /// Replace membership with exactly the given directory ids.
    #[must_use]
    pub fn expand_all<I, S>(self, directory_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: directory_ids.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn collapse_all(self) -> Self {
        Self::default()
    }

    /// Add every given id without removing any.
    #[must_use]
    pub fn expand<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_is_collapsed() {
        let set = ExpandedPaths::new();
        assert_eq!(set.len(), 0);
        assert!(!set.is_expanded("lib"));
    }

    #[test]
    fn toggle_flips_membership() {
        let set = ExpandedPaths::new().toggle("lib");
        assert!(set.is_expanded("lib"));
        let set = set.toggle("lib");
        assert!(!set.is_expanded("lib"));
    }

    #[test]
    fn toggle_leaves_other_ids_alone() {
        let set = ExpandedPaths::new().toggle("lib").toggle("assets").toggle("lib");
        assert!(set.is_expanded("assets"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn expand_all_then_every_directory_is_expanded() {
        let dirs = ["root-addon", "lib", "lib/vendor"];
        let set = ExpandedPaths::new().toggle("stale").expand_all(dirs);
        for dir in dirs {
            assert!(set.is_expanded(dir));
        }
        assert!(!set.is_expanded("stale"));
    }

    #[test]
    fn collapse_all_then_nothing_is_expanded() {
        let dirs = ["root-addon", "lib", "lib/vendor"];
        let set = ExpandedPaths::new().expand_all(dirs).collapse_all();
        for dir in dirs {
            assert!(!set.is_expanded(dir));
        }
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn expand_adds_without_removing() {
        let set = ExpandedPaths::new()
            .toggle("assets")
            .expand(vec!["lib".to_string(), "lib/vendor".to_string()]);
        assert!(set.is_expanded("assets"));
        assert!(set.is_expanded("lib/vendor"));
        assert_eq!(set.len(), 3);
    }
}
