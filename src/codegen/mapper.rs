//! Type reference to C++ spelling.
//!
//! The [`TypeMapper`] turns every [`TypeReference`] into a [`Spelling`] and records what the
//! spelling needs to compile in a [`DependencySet`]. Lookups go through [`Resolution`], a
//! closed classification of an identity that is computed once and then matched on:
//!
//! | Resolution   | Spelling                       | Requirement                               |
//! |--------------|--------------------------------|-------------------------------------------|
//! | `WellKnown`  | configured spelling            | configured include                        |
//! | `Unresolved` | `::BNM::IL2CPP::Il2CppObject*` | `BNM/Il2CppHeaders.hpp`                   |
//! | `Value`      | `void*` (opaque)               | none                                      |
//! | `Enum`       | `::Ns::Name` by value          | forward declaration, or the defining unit |
//! | `Nested`     | `::Ns::Top::Inner*`            | unit of the top-level enclosing type      |
//! | `TopLevel`   | `::Ns::Name*`                  | forward declaration, or the unit          |
//!
//! Which of the two requirements a top-level type gets depends on the [`Position`]: only
//! [`Position::Complete`] pulls in the defining unit. Pointers cross unit boundaries through
//! forward declarations, which keeps mutually referencing types from forming include cycles.

use crate::{
    codegen::{
        deps::{DependencySet, ForwardDeclaration},
        runtime,
        sanitize::{namespace_segments, sanitize},
    },
    config::{GeneratorConfig, MappedType},
    metadata::{RegisteredType, SymbolTable, TypeKind, TypeReference, TypeRegistry},
};

/// Whether a use site needs the complete definition of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// A declaration is enough (pointers, by-value enums with fixed underlying type)
    Reference,
    /// The definition must be visible (base classes, enum fields)
    Complete,
}

/// A spelled C++ type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spelling {
    /// The type as written at the use site
    pub text: String,
    /// The type is a value type whose layout is not reproduced; callers substitute a
    /// defaulted template parameter
    pub opaque: bool,
}

impl Spelling {
    fn plain(text: impl Into<String>) -> Self {
        Spelling {
            text: text.into(),
            opaque: false,
        }
    }
}

/// Classification of a type identity
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// Listed in the type map
    WellKnown(&'a MappedType),
    /// Not loaded, or filtered out of generation
    Unresolved,
    /// A struct
    Value(&'a RegisteredType),
    /// An enum, top-level or nested
    Enum(&'a RegisteredType),
    /// A class or interface declared inside another type
    Nested(&'a RegisteredType),
    /// A top-level class or interface
    TopLevel(&'a RegisteredType),
}

/// Spells type references for one generation run.
pub struct TypeMapper<'a> {
    registry: &'a TypeRegistry,
    symbols: &'a SymbolTable,
    config: &'a GeneratorConfig,
}

impl<'a> TypeMapper<'a> {
    /// Create a mapper over `registry`
    #[must_use]
    pub fn new(
        registry: &'a TypeRegistry,
        symbols: &'a SymbolTable,
        config: &'a GeneratorConfig,
    ) -> Self {
        TypeMapper {
            registry,
            symbols,
            config,
        }
    }

    /// The generator configuration
    #[must_use]
    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// The type registry
    #[must_use]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// The symbol table fixing emitted identifiers
    #[must_use]
    pub fn symbols(&self) -> &'a SymbolTable {
        self.symbols
    }

    /// Classify `identity`
    #[must_use]
    pub fn resolve(&self, identity: &str) -> Resolution<'a> {
        if let Some(mapped) = self.config.type_map.lookup(identity) {
            return Resolution::WellKnown(mapped);
        }

        let Some(entry) = self.registry.resolve(identity) else {
            return Resolution::Unresolved;
        };
        let entry: &'a RegisteredType = entry;

        if self.config.skips(&entry.descriptor)
            || entry.enclosing.iter().any(|outer| self.config.skips(outer))
        {
            return Resolution::Unresolved;
        }

        match entry.descriptor.kind {
            TypeKind::Struct => Resolution::Value(entry),
            TypeKind::Enum => Resolution::Enum(entry),
            TypeKind::Class | TypeKind::Interface if entry.is_nested() => Resolution::Nested(entry),
            TypeKind::Class | TypeKind::Interface => Resolution::TopLevel(entry),
        }
    }

    /// Spell `reference`, recording its requirements in `deps`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bnm_sdkgen::{
    ///     codegen::{deps::DependencySet, mapper::{Position, TypeMapper}},
    ///     config::{CollisionPolicy, GeneratorConfig},
    ///     metadata::{TypeReference, TypeRegistry},
    /// };
    ///
    /// let registry = TypeRegistry::new();
    /// let symbols = registry.symbols(CollisionPolicy::Preserve);
    /// let config = GeneratorConfig::default();
    /// let mapper = TypeMapper::new(&registry, &symbols, &config);
    ///
    /// let mut deps = DependencySet::new();
    /// let reference = TypeReference::named("System.Int32").array();
    /// let spelling = mapper.map(&reference, Position::Reference, &mut deps);
    /// assert_eq!(spelling.text, "::BNM::Structures::Mono::Array<int>*");
    /// assert!(deps.has_include("BNM/BasicMonoStructures.hpp"));
    /// ```
    pub fn map(
        &self,
        reference: &TypeReference,
        position: Position,
        deps: &mut DependencySet,
    ) -> Spelling {
        match reference {
            TypeReference::ByRef { element } => {
                let inner = self.map(element, position, deps);
                Spelling::plain(format!("{}&", inner.text))
            }
            TypeReference::Pointer { element } => {
                let inner = self.map(element, position, deps);
                Spelling::plain(format!("{}*", inner.text))
            }
            TypeReference::Array { element, .. } => {
                let inner = self.map(element, Position::Reference, deps);
                let array = &self.config.type_map.array;
                deps.include(&array.include);
                Spelling::plain(array.render(&inner.text))
            }
            TypeReference::GenericParameter { name } => Spelling::plain(sanitize(name)),
            TypeReference::GenericInstance { base, args } => {
                self.map_generic_instance(base, args, position, deps)
            }
            TypeReference::Named { name } => self.map_named(name, position, deps),
        }
    }

    fn map_named(&self, identity: &str, position: Position, deps: &mut DependencySet) -> Spelling {
        match self.resolve(identity) {
            Resolution::WellKnown(mapped) => {
                deps.include(&mapped.include);
                Spelling::plain(mapped.spelling.clone())
            }
            Resolution::Unresolved => self.external_object(deps),
            Resolution::Value(_) => self.opaque_value(),
            Resolution::Enum(entry) => {
                self.require(entry, position, deps);
                Spelling::plain(self.cpp_path(entry))
            }
            Resolution::Nested(entry) | Resolution::TopLevel(entry) => {
                self.require(entry, position, deps);
                Spelling::plain(format!("{}*", self.cpp_path(entry)))
            }
        }
    }

    fn map_generic_instance(
        &self,
        base: &str,
        args: &[TypeReference],
        position: Position,
        deps: &mut DependencySet,
    ) -> Spelling {
        let spelled: Vec<String> = args
            .iter()
            .map(|arg| self.map(arg, Position::Reference, deps).text)
            .collect();

        if let Some(container) = self.config.type_map.container(base) {
            deps.include(&container.include);
            return Spelling::plain(container.render(&spelled.join(", ")));
        }

        match self.resolve(base) {
            Resolution::Value(_) => self.opaque_value(),
            Resolution::WellKnown(_) | Resolution::Unresolved => self.external_object(deps),
            Resolution::Enum(entry) => {
                self.require(entry, position, deps);
                Spelling::plain(self.cpp_path_with_args(entry, &spelled))
            }
            Resolution::Nested(entry) | Resolution::TopLevel(entry) => {
                self.require(entry, position, deps);
                Spelling::plain(format!("{}*", self.cpp_path_with_args(entry, &spelled)))
            }
        }
    }

    fn external_object(&self, deps: &mut DependencySet) -> Spelling {
        let external = &self.config.type_map.external_object;
        deps.include(&external.include);
        Spelling::plain(external.spelling.clone())
    }

    fn opaque_value(&self) -> Spelling {
        Spelling {
            text: self.config.type_map.opaque_value.clone(),
            opaque: true,
        }
    }

    /// Record what using `entry` in `position` requires.
    ///
    /// Nested types always pull in their top-level unit; they are never forward declared.
    pub fn require(&self, entry: &RegisteredType, position: Position, deps: &mut DependencySet) {
        if entry.is_nested() || position == Position::Complete {
            deps.require_complete(entry.top_identity(), &self.unit_path(entry));
        } else {
            let declaration = self.forward_declaration(entry, deps);
            deps.require_forward(&entry.identity, declaration);
        }
    }

    /// The emitted identifier of `entry`
    #[must_use]
    pub fn symbol(&self, entry: &RegisteredType) -> String {
        self.symbols
            .name(&entry.identity)
            .map_or_else(|| sanitize(&entry.descriptor.name), str::to_string)
    }

    fn symbol_of(&self, identity: &str, fallback: &str) -> String {
        self.symbols
            .name(identity)
            .map_or_else(|| sanitize(fallback), str::to_string)
    }

    /// Fully qualified C++ path (`::Game::Player::State`)
    #[must_use]
    pub fn cpp_path(&self, entry: &RegisteredType) -> String {
        let mut path = String::new();
        for segment in namespace_segments(entry.namespace()) {
            path.push_str("::");
            path.push_str(&segment);
        }

        for (identity, outer) in entry.enclosing_identities().into_iter().zip(&entry.enclosing) {
            path.push_str("::");
            path.push_str(&self.symbol_of(identity, &outer.name));
        }

        path.push_str("::");
        path.push_str(&self.symbol(entry));
        path
    }

    /// Fully qualified C++ path of a generic instantiation.
    ///
    /// When the arguments match the generic parameters declared along the nesting chain,
    /// they are distributed over the levels (`::Ns::Outer<int>::Inner`); otherwise they are
    /// all attached to the innermost name.
    #[must_use]
    pub fn cpp_path_with_args(&self, entry: &RegisteredType, args: &[String]) -> String {
        let mut levels: Vec<(String, usize)> = Vec::with_capacity(entry.enclosing.len() + 1);
        let mut inherited: Vec<&str> = Vec::new();
        let identities = entry.enclosing_identities();

        for (identity, outer) in identities.iter().zip(&entry.enclosing) {
            let own = own_generic_count(&outer.generic_params, &inherited);
            levels.push((self.symbol_of(identity, &outer.name), own));
            inherited.extend(outer.generic_params.iter().map(String::as_str));
        }
        levels.push((
            self.symbol(entry),
            own_generic_count(&entry.descriptor.generic_params, &inherited),
        ));

        let mut path = String::new();
        for segment in namespace_segments(entry.namespace()) {
            path.push_str("::");
            path.push_str(&segment);
        }

        let distributable = levels.iter().map(|(_, count)| count).sum::<usize>() == args.len();
        let mut remaining = args;
        let last = levels.len() - 1;
        for (index, (symbol, count)) in levels.iter().enumerate() {
            path.push_str("::");
            path.push_str(symbol);

            let take = if distributable {
                *count
            } else if index == last {
                remaining.len()
            } else {
                0
            };
            if take > 0 {
                let (current, rest) = remaining.split_at(take);
                path.push_str(&format!("<{}>", current.join(", ")));
                remaining = rest;
            }
        }

        path
    }

    /// Include token of the unit defining `entry` (its top-level type for nested types)
    #[must_use]
    pub fn unit_path(&self, entry: &RegisteredType) -> String {
        let top = entry.top_level();
        let top_symbol = self.symbol_of(entry.top_identity(), &top.name);
        let mut segments = namespace_segments(&top.namespace);
        segments.push(format!("{top_symbol}.h"));
        segments.join("/")
    }

    /// Forward declaration of the top-level type `entry`
    pub fn forward_declaration(
        &self,
        entry: &RegisteredType,
        deps: &mut DependencySet,
    ) -> ForwardDeclaration {
        let symbol = self.symbol(entry);
        let descriptor = &entry.descriptor;

        let declaration = match descriptor.kind {
            TypeKind::Enum => format!(
                "enum class {} : {};",
                symbol,
                self.enum_underlying(entry, deps)
            ),
            TypeKind::Struct => format!("{}struct {};", template_header(entry), symbol),
            TypeKind::Class | TypeKind::Interface => {
                format!("{}class {};", template_header(entry), symbol)
            }
        };

        ForwardDeclaration {
            namespace: namespace_segments(entry.namespace()).join("::"),
            declaration,
        }
    }

    /// Spelled underlying type of the enum `entry`
    pub fn enum_underlying(&self, entry: &RegisteredType, deps: &mut DependencySet) -> String {
        let underlying = entry.descriptor.enum_underlying();
        match underlying
            .identity()
            .and_then(|identity| self.config.type_map.lookup(identity))
        {
            Some(mapped) => {
                deps.include(&mapped.include);
                mapped.spelling.clone()
            }
            None => "int".to_string(),
        }
    }

    /// Choose the position for a field of type `reference`: by-value enums need their
    /// definition, everything else is used through a declaration
    #[must_use]
    pub fn field_position(&self, reference: &TypeReference) -> Position {
        match reference {
            TypeReference::Named { name } => match self.resolve(name) {
                Resolution::Enum(_) => Position::Complete,
                _ => Position::Reference,
            },
            _ => Position::Reference,
        }
    }

    /// Spelling of the managed object header, with its include recorded
    pub fn object_header(&self, deps: &mut DependencySet) -> &'static str {
        deps.include(runtime::IL2CPP_HEADERS_INCLUDE);
        runtime::OBJECT
    }
}

fn own_generic_count(params: &[String], inherited: &[&str]) -> usize {
    params
        .iter()
        .filter(|param| !inherited.contains(&param.as_str()))
        .count()
}

/// `template <typename ...> ` for the generic parameters `entry` declares itself, or an
/// empty string. Parameters repeated from enclosing types are left out.
pub(crate) fn template_header(entry: &RegisteredType) -> String {
    let inherited: Vec<&str> = entry.inherited_generic_params().collect();
    let params: Vec<String> = entry
        .descriptor
        .generic_params
        .iter()
        .filter(|param| !inherited.contains(&param.as_str()))
        .map(|param| format!("typename {}", sanitize(param)))
        .collect();

    if params.is_empty() {
        return String::new();
    }
    format!("template <{}> ", params.join(", "))
}
