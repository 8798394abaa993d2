use anchor_lang::prelude::*;
use std::collections::BTreeMap;

/// Resolves an account to its human-readable name, if it has one.
pub trait NameResolver {
    fn resolve(&self, account: &Pubkey) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    names: BTreeMap<Pubkey, String>,
}

impl NameRegistry {
    pub fn insert(&mut self, account: Pubkey, name: impl Into<String>) {
        self.names.insert(account, name.into());
    }
}

impl NameResolver for NameRegistry {
    fn resolve(&self, account: &Pubkey) -> Option<String> {
        self.names.get(account).cloned()
    }
}

/// `alice.dao.algo` is a segment of `dao.algo`; `dao.algo` itself is not.
pub fn is_segment_of(name: &str, root: &str) -> bool {
    name.strip_suffix(root)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .is_some_and(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_matching() {
        assert!(is_segment_of("alice.dao.algo", "dao.algo"));
        assert!(is_segment_of("x.y.dao.algo", "dao.algo"));
        assert!(!is_segment_of("dao.algo", "dao.algo"));
        assert!(!is_segment_of("alicedao.algo", "dao.algo"));
        assert!(!is_segment_of(".dao.algo", "dao.algo"));
        assert!(!is_segment_of("alice.other.algo", "dao.algo"));
    }

    #[test]
    fn test_registry_resolves() {
        let account = Pubkey::new_from_array([6; 32]);
        let mut registry = NameRegistry::default();
        registry.insert(account, "alice.dao.algo");

        assert_eq!(registry.resolve(&account).as_deref(), Some("alice.dao.algo"));
        assert_eq!(registry.resolve(&Pubkey::default()), None);
    }
}
