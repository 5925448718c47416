use std::collections::HashMap;

use tracing::warn;

/// Profile name -> role ARN, iterated in insertion order.
///
/// Two roles deriving the same profile name collide: the later role
/// replaces the earlier one, keeping the earlier position.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProfileMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ProfileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the role ARN that was replaced, if any.
    pub fn insert(&mut self, profile_name: String, role_arn: String) -> Option<String> {
        if let Some(&i) = self.index.get(&profile_name) {
            let old = std::mem::replace(&mut self.entries[i].1, role_arn);
            warn!(
                "Profile name `{profile_name}` is derived from more than one role; using {} instead of {old}",
                self.entries[i].1
            );
            return Some(old);
        }
        self.index.insert(profile_name.clone(), self.entries.len());
        self.entries.push((profile_name, role_arn));
        None
    }

    pub fn get(&self, profile_name: &str) -> Option<&str> {
        self.index
            .get(profile_name)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, profile_name: &str) -> bool {
        self.index.contains_key(profile_name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, arn)| (name.as_str(), arn.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
