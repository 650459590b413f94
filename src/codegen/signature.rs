//! Per-type registry of emitted member signatures.
//!
//! Metadata can carry several members that end up with the same C++ shape: overloads that
//! differ only in value-type parameters (all spelled as the same template), explicit
//! interface implementations that sanitize to the same name, or property accessors next to
//! a field of the same name. C++ rejects such redeclarations, so the first member with a
//! given [`SignatureKey`] is emitted and later ones are dropped.

use std::collections::HashSet;

use log::debug;

use crate::codegen::sanitize::rename_identifiers;

/// Dedup identity of an emitted member
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureKey {
    /// Identity of the declaring type
    pub declaring: String,
    /// Emitted (sanitized) member name
    pub name: String,
    /// Number of template parameters
    pub arity: usize,
    /// Spelled parameter types in order
    pub params: Vec<String>,
}

/// The signatures emitted so far for one declaring type.
#[derive(Debug)]
pub struct SignatureRegistry {
    declaring: String,
    seen: HashSet<SignatureKey>,
}

impl SignatureRegistry {
    /// Create an empty registry for the type `declaring`
    pub fn new(declaring: impl Into<String>) -> Self {
        SignatureRegistry {
            declaring: declaring.into(),
            seen: HashSet::new(),
        }
    }

    /// Record a member; returns false if an equivalent signature was already emitted.
    ///
    /// `templates` are the member's template parameter names in declaration order. They are
    /// compared by position, so `template <typename T> void Add(T)` and
    /// `template <typename TP0 = void*> void Add(TP0)` are the same signature.
    pub fn register(&mut self, name: &str, templates: &[String], params: &[String]) -> bool {
        let positional: Vec<(String, String)> = templates
            .iter()
            .enumerate()
            .map(|(index, template)| (template.clone(), format!("`{index}")))
            .collect();

        let key = SignatureKey {
            declaring: self.declaring.clone(),
            name: name.to_string(),
            arity: templates.len(),
            params: params
                .iter()
                .map(|param| rename_identifiers(param, &positional))
                .collect(),
        };

        if self.seen.contains(&key) {
            debug!(
                "Dropping duplicate {}::{}<{}>({})",
                self.declaring,
                name,
                templates.join(", "),
                params.join(", ")
            );
            return false;
        }

        self.seen.insert(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_registration_wins() {
        let mut registry = SignatureRegistry::new("Game.Inventory");
        let one = vec!["TP0".to_string()];
        let two = vec!["TRet".to_string(), "TP0".to_string()];
        let opaque = vec!["TP0".to_string()];

        assert!(registry.register("Get", &two, &opaque));
        assert!(!registry.register("Get", &two, &opaque));
        assert!(registry.register("Get", &one, &opaque));
        assert!(registry.register("Get", &two, &["int".to_string()]));
        assert!(registry.register("Set", &two, &opaque));
    }

    #[test]
    fn test_template_names_compare_by_position() {
        let mut registry = SignatureRegistry::new("Game.Bag");

        assert!(registry.register("Add", &["T".to_string()], &["T".to_string()]));
        assert!(!registry.register("Add", &["TP0".to_string()], &["TP0".to_string()]));

        let list = vec!["::BNM::Structures::Mono::List<T>*".to_string()];
        assert!(registry.register("Fill", &["T".to_string()], &list));
        let renamed = vec!["::BNM::Structures::Mono::List<U>*".to_string()];
        assert!(!registry.register("Fill", &["U".to_string()], &renamed));

        // Same position, different parameter order
        let pair = vec!["T".to_string(), "U".to_string()];
        assert!(registry.register("Swap", &pair, &pair));
        assert!(registry.register("Swap", &pair, &["U".to_string(), "T".to_string()]));
    }

    #[test]
    fn test_registries_are_scoped() {
        let mut first = SignatureRegistry::new("A");
        let mut second = SignatureRegistry::new("B");
        assert!(first.register("dyn_value", &[], &[]));
        assert!(second.register("dyn_value", &[], &[]));
    }
}
