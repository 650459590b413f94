//! Per-unit dependency collection.
//!
//! Every spelled type reference leaves a requirement in a [`DependencySet`]: a header to
//! include, a type that must be complete (its unit is included), or a type that only needs a
//! forward declaration. [`DependencySet::finalize`] partitions and orders them for the unit
//! assembler.

use std::collections::{BTreeMap, BTreeSet};

use crate::metadata::RegisteredType;

/// A forward declaration of a top-level type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardDeclaration {
    /// C++ namespace the declaration lives in (`Game::Actors`)
    pub namespace: String,
    /// The declaration without namespace (`class Player;`)
    pub declaration: String,
}

/// Requirements collected while emitting one unit.
#[derive(Debug, Default)]
pub struct DependencySet {
    includes: BTreeSet<String>,
    complete: BTreeSet<String>,
    forward: BTreeMap<String, ForwardDeclaration>,
}

/// The ordered requirements of a unit, ready to be written
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UnitDependencies {
    /// Sorted include tokens
    pub includes: Vec<String>,
    /// Forward declarations grouped by namespace; both levels sorted
    pub forward: BTreeMap<String, Vec<String>>,
}

impl DependencySet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a header
    pub fn include(&mut self, token: &str) {
        if !token.is_empty() && !self.includes.contains(token) {
            self.includes.insert(token.to_string());
        }
    }

    /// Require the full definition of the top-level type `identity`, provided by `unit`
    pub fn require_complete(&mut self, identity: &str, unit: &str) {
        self.complete.insert(identity.to_string());
        self.include(unit);
    }

    /// Require a forward declaration of the top-level type `identity`
    pub fn require_forward(&mut self, identity: &str, declaration: ForwardDeclaration) {
        self.forward
            .entry(identity.to_string())
            .or_insert(declaration);
    }

    /// Returns true if `token` is required
    #[must_use]
    pub fn has_include(&self, token: &str) -> bool {
        self.includes.contains(token)
    }

    /// Returns true if `identity` is forward declared
    #[must_use]
    pub fn has_forward(&self, identity: &str) -> bool {
        self.forward.contains_key(identity)
    }

    /// Returns true if `identity` must be complete
    #[must_use]
    pub fn is_complete(&self, identity: &str) -> bool {
        self.complete.contains(identity)
    }

    /// Partition the requirements for the unit of `subject`, whose own unit is `own_unit`.
    ///
    /// Forward declarations of the subject, of types nested in it and of types whose unit
    /// is included are dropped, as is the subject's own unit include.
    #[must_use]
    pub fn finalize(self, subject: &RegisteredType, own_unit: &str) -> UnitDependencies {
        let includes = self
            .includes
            .into_iter()
            .filter(|token| token != own_unit)
            .collect();

        let mut grouped: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (identity, declaration) in self.forward {
            if identity == subject.identity || identity_nested_in(&identity, &subject.identity) {
                continue;
            }
            if self.complete.contains(&identity) {
                continue;
            }
            grouped
                .entry(declaration.namespace)
                .or_default()
                .insert(identity, declaration.declaration);
        }

        let forward = grouped
            .into_iter()
            .map(|(namespace, declarations)| (namespace, declarations.into_values().collect()))
            .collect();

        UnitDependencies { includes, forward }
    }
}

fn identity_nested_in(identity: &str, outer: &str) -> bool {
    identity.len() > outer.len()
        && identity.starts_with(outer)
        && identity[outer.len()..].starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::TypeKind,
        test::{create_registry, create_type},
    };

    fn declaration(namespace: &str, name: &str) -> ForwardDeclaration {
        ForwardDeclaration {
            namespace: namespace.to_string(),
            declaration: format!("class {name};"),
        }
    }

    #[test]
    fn test_finalize_elides_and_orders() {
        let registry = create_registry(vec![create_type("Game", "Player", TypeKind::Class)]);
        let subject = registry.resolve("Game.Player").unwrap();

        let mut deps = DependencySet::new();
        deps.include("cstdint");
        deps.include("Game/Player.h");
        deps.include("BNM/Class.hpp");
        deps.require_forward("Game.Player", declaration("Game", "Player"));
        deps.require_forward("Game.Player/Inner", declaration("Game", "Inner"));
        deps.require_forward("Zed.Item", declaration("Zed", "Item"));
        deps.require_forward("Game.Weapon", declaration("Game", "Weapon"));
        deps.require_forward("Game.Armor", declaration("Game", "Armor"));
        deps.require_forward("Game.Base", declaration("Game", "Base"));
        deps.require_complete("Game.Base", "Game/Base.h");

        let resolved = deps.finalize(subject, "Game/Player.h");
        assert_eq!(
            resolved.includes,
            vec!["BNM/Class.hpp", "Game/Base.h", "cstdint"]
        );
        assert_eq!(resolved.forward.len(), 2);
        assert_eq!(
            resolved.forward["Game"],
            vec!["class Armor;", "class Weapon;"]
        );
        assert_eq!(resolved.forward["Zed"], vec!["class Item;"]);
    }
}
