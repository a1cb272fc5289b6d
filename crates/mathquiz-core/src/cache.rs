//! Session-scoped answer cache.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::problem::AnswerKey;

/// Which cached answers keep a problem from being served again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReusePolicy {
    /// Only problems answered correctly are withheld.
    #[default]
    Correct,
    /// Any problem already answered, right or wrong, is withheld.
    Any,
}

impl fmt::Display for ReusePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReusePolicy::Correct => write!(f, "correct"),
            ReusePolicy::Any => write!(f, "any"),
        }
    }
}

impl FromStr for ReusePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correct" => Ok(ReusePolicy::Correct),
            "any" => Ok(ReusePolicy::Any),
            other => Err(format!("unknown reuse policy: {other}")),
        }
    }
}

/// Maps a problem's identity to whether it was answered correctly.
#[derive(Debug, Clone, Default)]
pub struct AnswerCache {
    entries: HashMap<AnswerKey, bool>,
}

impl AnswerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of an answer, overwriting any earlier one.
    pub fn record(&mut self, key: AnswerKey, correct: bool) {
        self.entries.insert(key, correct);
    }

    pub fn get(&self, key: &AnswerKey) -> Option<bool> {
        self.entries.get(key).copied()
    }

    /// Whether `key` must be regenerated before it is served.
    pub fn blocks(&self, key: &AnswerKey, policy: ReusePolicy) -> bool {
        match (self.get(key), policy) {
            (None, _) => false,
            (Some(correct), ReusePolicy::Correct) => correct,
            (Some(_), ReusePolicy::Any) => true,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnswerKey, bool)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::OperatorKey;

    fn good() -> AnswerKey {
        AnswerKey::new(1, 5, OperatorKey::MultiplicationTable)
    }

    fn bad() -> AnswerKey {
        AnswerKey::new(1, 3, OperatorKey::Subtraction)
    }

    fn cache() -> AnswerCache {
        let mut cache = AnswerCache::new();
        cache.record(good(), true);
        cache.record(bad(), false);
        cache
    }

    #[test]
    fn unknown_key_never_blocks() {
        let cache = cache();
        let key = AnswerKey::new(1, 2, OperatorKey::Addition);
        assert!(!cache.blocks(&key, ReusePolicy::Correct));
        assert!(!cache.blocks(&key, ReusePolicy::Any));
    }

    #[test]
    fn correct_policy_blocks_only_good_answers() {
        let cache = cache();
        assert!(cache.blocks(&good(), ReusePolicy::Correct));
        assert!(!cache.blocks(&bad(), ReusePolicy::Correct));
    }

    #[test]
    fn any_policy_blocks_every_answer() {
        let cache = cache();
        assert!(cache.blocks(&good(), ReusePolicy::Any));
        assert!(cache.blocks(&bad(), ReusePolicy::Any));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut cache = cache();
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&good()), None);
    }

    #[test]
    fn policy_parse() {
        assert_eq!("Correct".parse::<ReusePolicy>().unwrap(), ReusePolicy::Correct);
        assert_eq!("any".parse::<ReusePolicy>().unwrap(), ReusePolicy::Any);
        assert!("sometimes".parse::<ReusePolicy>().is_err());
    }
}
