//! Identity-keyed index of every loaded type definition.
//!
//! The [`TypeRegistry`] is filled once by the project loader and is read-only afterwards;
//! code generation workers share it by reference. Identities follow the ECMA-335
//! reflection notation: `Namespace.Name` for top-level types and `Parent/Nested` for nested
//! types, with the generic arity marker kept (`Game.Pool`1/Slot`).
//!
//! The registry also derives the [`SymbolTable`], which fixes the C++ identifier every type
//! is emitted under once sanitizing collisions have been dealt with.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

use log::{debug, warn};

use crate::{
    codegen::sanitize::{namespace_segments, sanitize},
    config::CollisionPolicy,
    metadata::{ModuleDump, TypeDescriptor},
};

/// Separator between an enclosing type identity and a nested type name
pub const NESTED_SEPARATOR: char = '/';

/// Identity of a type nested in `parent`
#[must_use]
pub fn nested_identity(parent: &str, name: &str) -> String {
    format!("{parent}{NESTED_SEPARATOR}{name}")
}

/// A type definition together with its position in the type graph.
#[derive(Debug)]
pub struct RegisteredType {
    /// Unique identity of the type
    pub identity: String,
    /// The definition
    pub descriptor: Arc<TypeDescriptor>,
    /// Enclosing type definitions, outermost first; empty for top-level types
    pub enclosing: Vec<Arc<TypeDescriptor>>,
    /// Name of the module that declared the type
    pub module: Arc<str>,
}

impl RegisteredType {
    /// Returns true if the type is declared inside another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.enclosing.is_empty()
    }

    /// The outermost enclosing type, or the type itself when it is top-level
    #[must_use]
    pub fn top_level(&self) -> &Arc<TypeDescriptor> {
        self.enclosing.first().unwrap_or(&self.descriptor)
    }

    /// Namespace the type lives in; nested types share their top-level type's namespace
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.top_level().namespace
    }

    /// Identity of the outermost enclosing type
    #[must_use]
    pub fn top_identity(&self) -> &str {
        self.identity
            .split(NESTED_SEPARATOR)
            .next()
            .unwrap_or(&self.identity)
    }

    /// Identities of the enclosing types, outermost first
    #[must_use]
    pub fn enclosing_identities(&self) -> Vec<&str> {
        self.identity
            .match_indices(NESTED_SEPARATOR)
            .map(|(index, _)| &self.identity[..index])
            .collect()
    }

    /// Returns true if `identity` is this type or one of its enclosing types
    #[must_use]
    pub fn is_within(&self, identity: &str) -> bool {
        self.identity == identity
            || (self.identity.starts_with(identity)
                && self.identity[identity.len()..].starts_with(NESTED_SEPARATOR))
    }

    /// Returns true if the type or any of its enclosing types is a generic definition
    #[must_use]
    pub fn in_generic_scope(&self) -> bool {
        self.descriptor.is_generic() || self.enclosing.iter().any(|outer| outer.is_generic())
    }

    /// Generic parameter names declared by the enclosing types
    pub fn inherited_generic_params(&self) -> impl Iterator<Item = &str> {
        self.enclosing
            .iter()
            .flat_map(|outer| outer.generic_params.iter().map(String::as_str))
    }
}

/// Index of all loaded types by identity.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, Arc<RegisteredType>>,
    modules: Vec<Arc<str>>,
}

impl TypeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every type of `dump`, nested types included.
    ///
    /// A type whose identity was already registered by an earlier module is skipped with a
    /// warning, together with its nested types. Returns the number of registered types.
    pub fn register_module(&mut self, dump: &ModuleDump) -> usize {
        let module: Arc<str> = Arc::from(dump.name.as_str());
        self.modules.push(module.clone());

        let mut registered = 0;
        for descriptor in &dump.types {
            registered += self.register(
                descriptor.fullname(),
                descriptor.clone(),
                Vec::new(),
                &module,
            );
        }

        debug!("Registered {} types from {}", registered, module);
        registered
    }

    fn register(
        &mut self,
        identity: String,
        descriptor: Arc<TypeDescriptor>,
        enclosing: Vec<Arc<TypeDescriptor>>,
        module: &Arc<str>,
    ) -> usize {
        if let Some(existing) = self.types.get(&identity) {
            warn!(
                "Type {} from {} is already defined by {}, keeping the first definition",
                identity, module, existing.module
            );
            return 0;
        }

        let mut nested_enclosing = enclosing.clone();
        nested_enclosing.push(descriptor.clone());

        let entry = Arc::new(RegisteredType {
            identity: identity.clone(),
            descriptor: descriptor.clone(),
            enclosing,
            module: module.clone(),
        });
        self.types.insert(identity.clone(), entry);

        let mut registered = 1;
        for nested in &descriptor.nested_types {
            registered += self.register(
                nested_identity(&identity, &nested.name),
                nested.clone(),
                nested_enclosing.clone(),
                module,
            );
        }

        registered
    }

    /// Look up a type by identity
    #[must_use]
    pub fn resolve(&self, identity: &str) -> Option<&Arc<RegisteredType>> {
        self.types.get(identity)
    }

    /// Returns true if `identity` is registered
    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.types.contains_key(identity)
    }

    /// Number of registered types, nested types included
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Names of the registered modules, in registration order
    #[must_use]
    pub fn modules(&self) -> &[Arc<str>] {
        &self.modules
    }

    /// All registered types, ordered by identity
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RegisteredType>> {
        self.types.values()
    }

    /// Top-level types, ordered by identity
    pub fn top_level(&self) -> impl Iterator<Item = &Arc<RegisteredType>> {
        self.types.values().filter(|entry| !entry.is_nested())
    }

    /// Top-level types declared by `module`, ordered by identity
    pub fn module_types<'a>(
        &'a self,
        module: &'a str,
    ) -> impl Iterator<Item = &'a Arc<RegisteredType>> + 'a {
        self.top_level()
            .filter(move |entry| entry.module.as_ref() == module)
    }

    /// Fix the emitted identifier of every type under `policy`.
    #[must_use]
    pub fn symbols(&self, policy: CollisionPolicy) -> SymbolTable {
        SymbolTable::build(self, policy)
    }
}

/// Emitted C++ identifier per type identity.
///
/// Two types collide when their sanitized names are equal within the same C++ scope (the
/// same namespace for top-level types, the same enclosing type for nested types).
/// Collisions are resolved in identity order: the first type keeps its spelling; later ones
/// are suffixed ([`CollisionPolicy::Suffix`]) or suppressed ([`CollisionPolicy::Preserve`]).
/// Suppressed types keep the lossy spelling, so references to them land on the surviving
/// type.
#[derive(Debug, Default)]
pub struct SymbolTable {
    names: HashMap<String, String>,
    suppressed: BTreeSet<String>,
}

impl SymbolTable {
    fn build(registry: &TypeRegistry, policy: CollisionPolicy) -> SymbolTable {
        let mut table = SymbolTable::default();
        let mut taken: BTreeMap<String, String> = BTreeMap::new();

        for entry in registry.iter() {
            let scope = if entry.is_nested() {
                entry
                    .identity
                    .rsplit_once(NESTED_SEPARATOR)
                    .map_or_else(String::new, |(parent, _)| parent.to_string())
            } else {
                namespace_segments(entry.namespace()).join("::")
            };

            let base = sanitize(&entry.descriptor.name);
            let mut symbol = base.clone();
            if let Some(owner) = taken.get(&scope_key(&scope, &symbol)) {
                match policy {
                    CollisionPolicy::Preserve => {
                        warn!(
                            "{} collides with {} as '{}', skipping it",
                            entry.identity, owner, symbol
                        );
                        table.suppressed.insert(entry.identity.clone());
                    }
                    CollisionPolicy::Suffix => {
                        let mut counter = 1;
                        while taken.contains_key(&scope_key(&scope, &symbol)) {
                            symbol = format!("{base}_{counter}");
                            counter += 1;
                        }
                        debug!("{} collides, emitted as '{}'", entry.identity, symbol);
                    }
                }
            }

            if !table.suppressed.contains(&entry.identity) {
                taken.insert(scope_key(&scope, &symbol), entry.identity.clone());
            }
            table.names.insert(entry.identity.clone(), symbol);
        }

        table
    }

    /// The emitted identifier of `identity`
    #[must_use]
    pub fn name(&self, identity: &str) -> Option<&str> {
        self.names.get(identity).map(String::as_str)
    }

    /// Returns true if `identity` lost a collision under [`CollisionPolicy::Preserve`]
    #[must_use]
    pub fn is_suppressed(&self, identity: &str) -> bool {
        self.suppressed.contains(identity)
    }

    /// Identities that lost a collision, ordered
    pub fn suppressed(&self) -> impl Iterator<Item = &str> {
        self.suppressed.iter().map(String::as_str)
    }
}

fn scope_key(scope: &str, symbol: &str) -> String {
    format!("{scope}\u{0}{symbol}")
}
