//! Unit assembly.
//!
//! A unit is rendered in two passes. [`UnitRenderer`] first renders the type body (nested
//! types, members, registration thunks) while collecting requirements, then drives a
//! [`UnitAssembler`] through the fixed section order of a header:
//!
//! ```text
//! Start -> Includes -> ForwardDecls -> NamespaceOpen -> Body -> NamespaceClose
//!       -> RegistrationThunk -> Done
//! ```
//!
//! Sections may be empty, but none may be skipped or repeated.

use std::collections::BTreeMap;

use strum::Display;

use crate::{
    codegen::{
        deps::DependencySet,
        mapper::{template_header, Position, Resolution, TypeMapper},
        members::MemberEmitter,
        runtime,
        sanitize::namespace_segments,
        signature::SignatureRegistry,
        writer::CodeWriter,
    },
    metadata::{
        nested_identity, RegisteredType, TypeDescriptor, TypeKind, TypeReference,
        NESTED_SEPARATOR,
    },
    Error, Result,
};

/// Sections of a unit, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UnitState {
    /// Preamble written
    Start,
    /// Include block written
    Includes,
    /// Forward declaration block written
    ForwardDecls,
    /// Namespace blocks opened
    NamespaceOpen,
    /// Type body written
    Body,
    /// Namespace blocks closed
    NamespaceClose,
    /// Registration thunks written
    RegistrationThunk,
    /// Unit complete
    Done,
}

impl UnitState {
    /// The only state reachable from `self`
    #[must_use]
    pub fn next(self) -> Option<UnitState> {
        match self {
            UnitState::Start => Some(UnitState::Includes),
            UnitState::Includes => Some(UnitState::ForwardDecls),
            UnitState::ForwardDecls => Some(UnitState::NamespaceOpen),
            UnitState::NamespaceOpen => Some(UnitState::Body),
            UnitState::Body => Some(UnitState::NamespaceClose),
            UnitState::NamespaceClose => Some(UnitState::RegistrationThunk),
            UnitState::RegistrationThunk => Some(UnitState::Done),
            UnitState::Done => None,
        }
    }
}

/// Writes the sections of one unit in order.
pub struct UnitAssembler {
    state: UnitState,
    writer: CodeWriter,
    namespace_depth: usize,
}

impl UnitAssembler {
    /// Start a unit with `#pragma once` and the `banner` comment
    #[must_use]
    pub fn new(banner: &str) -> Self {
        let mut writer = CodeWriter::new();
        writer.write_line("#pragma once");
        writer.write_line(&format!("// {banner}"));

        UnitAssembler {
            state: UnitState::Start,
            writer,
            namespace_depth: 0,
        }
    }

    /// The last completed section
    #[must_use]
    pub fn state(&self) -> UnitState {
        self.state
    }

    fn advance(&mut self, to: UnitState) -> Result<()> {
        if self.state.next() != Some(to) {
            return Err(Error::InvalidTransition {
                from: self.state,
                to,
            });
        }

        self.state = to;
        Ok(())
    }

    /// Write the include block
    ///
    /// # Errors
    /// Returns [`Error::InvalidTransition`] when called out of order.
    pub fn includes(&mut self, includes: &[String]) -> Result<()> {
        self.advance(UnitState::Includes)?;

        self.writer.write_line("// Includes");
        for include in includes {
            self.writer.write_line(&format!("#include <{include}>"));
        }
        self.writer.blank_line();
        Ok(())
    }

    /// Write the forward declarations, one namespace block per namespace
    ///
    /// # Errors
    /// Returns [`Error::InvalidTransition`] when called out of order.
    pub fn forward_declarations(&mut self, forward: &BTreeMap<String, Vec<String>>) -> Result<()> {
        self.advance(UnitState::ForwardDecls)?;

        self.writer.write_line("// Forward Declarations");
        for (namespace, declarations) in forward {
            self.writer.write(&format!("namespace {namespace}"));
            self.writer.open_bracket();
            for declaration in declarations {
                self.writer.write_line(declaration);
            }
            self.writer.close_bracket("");
        }
        self.writer.blank_line();
        Ok(())
    }

    /// Open one namespace block per segment
    ///
    /// # Errors
    /// Returns [`Error::InvalidTransition`] when called out of order.
    pub fn open_namespace(&mut self, segments: &[String]) -> Result<()> {
        self.advance(UnitState::NamespaceOpen)?;

        self.writer.write_line("// Header Generation");
        for segment in segments {
            self.writer.write(&format!("namespace {segment}"));
            self.writer.open_bracket();
        }
        self.namespace_depth = segments.len();
        Ok(())
    }

    /// Append the rendered type body, which must be indented to the namespace depth
    ///
    /// # Errors
    /// Returns [`Error::InvalidTransition`] when called out of order.
    pub fn body(&mut self, body: CodeWriter) -> Result<()> {
        self.advance(UnitState::Body)?;
        self.writer.append(body);
        Ok(())
    }

    /// Close the namespace blocks opened by [`UnitAssembler::open_namespace`]
    ///
    /// # Errors
    /// Returns [`Error::InvalidTransition`] when called out of order.
    pub fn close_namespace(&mut self) -> Result<()> {
        self.advance(UnitState::NamespaceClose)?;
        for _ in 0..self.namespace_depth {
            self.writer.close_bracket("");
        }
        self.namespace_depth = 0;
        Ok(())
    }

    /// Write the registration thunks
    ///
    /// # Errors
    /// Returns [`Error::InvalidTransition`] when called out of order.
    pub fn registration_thunks(&mut self, thunks: &[String]) -> Result<()> {
        self.advance(UnitState::RegistrationThunk)?;
        for thunk in thunks {
            self.writer.blank_line();
            self.writer.append_text(thunk);
        }
        Ok(())
    }

    /// Complete the unit and return its text
    ///
    /// # Errors
    /// Returns [`Error::InvalidTransition`] unless every section was written.
    pub fn finish(mut self) -> Result<String> {
        self.advance(UnitState::Done)?;
        Ok(self.writer.into_string())
    }
}

/// Renders the unit of a top-level type.
pub struct UnitRenderer<'m, 'a> {
    mapper: &'m TypeMapper<'a>,
}

impl<'m, 'a> UnitRenderer<'m, 'a> {
    /// Create a renderer using `mapper` for all spellings
    #[must_use]
    pub fn new(mapper: &'m TypeMapper<'a>) -> Self {
        UnitRenderer { mapper }
    }

    /// Render the complete unit of the top-level type `entry`
    ///
    /// # Errors
    /// Returns [`Error::InvalidTransition`] if the unit sections are driven out of order.
    pub fn render(&self, entry: &RegisteredType) -> Result<String> {
        let segments = namespace_segments(entry.namespace());
        let mut body = CodeWriter::with_indent(segments.len());
        let mut deps = DependencySet::new();
        let mut thunks = Vec::new();

        self.render_type(entry, &mut body, &mut deps, &mut thunks);
        if !thunks.is_empty() {
            deps.include(runtime::CLASS_INCLUDE);
            deps.include(runtime::DEFAULTS_INCLUDE);
        }

        let own_unit = self.mapper.unit_path(entry);
        let resolved = deps.finalize(entry, &own_unit);

        let mut assembler = UnitAssembler::new(&self.mapper.config().banner);
        assembler.includes(&resolved.includes)?;
        assembler.forward_declarations(&resolved.forward)?;
        assembler.open_namespace(&segments)?;
        assembler.body(body)?;
        assembler.close_namespace()?;
        assembler.registration_thunks(&thunks)?;
        assembler.finish()
    }

    fn render_type(
        &self,
        entry: &RegisteredType,
        writer: &mut CodeWriter,
        deps: &mut DependencySet,
        thunks: &mut Vec<String>,
    ) {
        let emitter = MemberEmitter::new(self.mapper, entry);
        if !entry.in_generic_scope() {
            thunks.push(self.thunk(entry, emitter.class_getter()));
        }

        let symbol = self.mapper.symbol(entry);
        if entry.descriptor.is_enum() {
            let underlying = self.mapper.enum_underlying(entry, deps);
            writer.write(&format!("enum class {symbol} : {underlying}"));
            writer.open_bracket();
            emitter.emit_enumerators(writer);
            writer.close_bracket(";");
            return;
        }

        let header = template_header(entry);
        if !header.is_empty() {
            writer.write_line(header.trim_end());
        }
        let (keyword, base) = match entry.descriptor.kind {
            TypeKind::Class => ("class", self.base_clause(entry, deps)),
            TypeKind::Struct => ("struct", String::new()),
            _ => ("class", String::new()),
        };
        writer.write(&format!("{keyword} {symbol}{base}"));
        writer.open_bracket();
        writer.write_unindented("public:");

        let indent = writer.indent();
        let mut signatures = SignatureRegistry::new(&entry.identity);
        let mut sections = Vec::with_capacity(3);

        let nested = self.nested_types(entry);
        if !nested.is_empty() {
            let mut section = CodeWriter::with_indent(indent);
            for inner in &nested {
                let declaration = self.mapper.forward_declaration(inner, deps);
                section.write_line(&declaration.declaration);
            }
            for inner in &nested {
                self.render_type(inner, &mut section, deps, thunks);
            }
            sections.push(section);
        }

        let mut fields = CodeWriter::with_indent(indent);
        emitter.emit_fields(&mut fields, deps, &mut signatures);
        sections.push(fields);

        let mut methods = CodeWriter::with_indent(indent);
        emitter.emit_upcasts(&mut methods, deps, &mut signatures);
        emitter.emit_methods(&mut methods, deps, &mut signatures);
        sections.push(methods);

        let mut first = true;
        for section in sections.into_iter().filter(|section| !section.is_empty()) {
            if !first {
                writer.blank_line();
            }
            writer.append(section);
            first = false;
        }
        writer.close_bracket(";");
    }

    /// Emitted nested types of `entry`, with sibling base classes ahead of their subclasses
    fn nested_types(&self, entry: &RegisteredType) -> Vec<&'a RegisteredType> {
        let registry = self.mapper.registry();
        let symbols = self.mapper.symbols();
        let config = self.mapper.config();

        let siblings: Vec<&'a RegisteredType> = entry
            .descriptor
            .nested_types
            .iter()
            .filter_map(|inner| registry.resolve(&nested_identity(&entry.identity, &inner.name)))
            .map(|inner| &**inner)
            .filter(|inner| {
                !symbols.is_suppressed(&inner.identity) && !config.skips(&inner.descriptor)
            })
            .collect();

        let mut placed = vec![false; siblings.len()];
        let mut ordered = Vec::with_capacity(siblings.len());
        for index in 0..siblings.len() {
            place_sibling(index, &siblings, &mut placed, &mut ordered);
        }
        ordered
    }

    fn base_clause(&self, entry: &RegisteredType, deps: &mut DependencySet) -> String {
        let spelled = entry
            .descriptor
            .base
            .as_ref()
            .and_then(|base| self.spell_base(entry, base, deps));

        match spelled {
            Some(base) => format!(" : public {base}"),
            None => format!(" : public {}", self.mapper.object_header(deps)),
        }
    }

    fn spell_base(
        &self,
        entry: &RegisteredType,
        base: &TypeReference,
        deps: &mut DependencySet,
    ) -> Option<String> {
        let target = match self.mapper.resolve(base.identity()?) {
            Resolution::TopLevel(target) | Resolution::Nested(target) => target,
            _ => return None,
        };
        if target.descriptor.kind != TypeKind::Class
            || entry.is_within(&target.identity)
            || target.is_within(&entry.identity)
        {
            return None;
        }

        self.mapper.require(target, Position::Complete, deps);
        match base {
            TypeReference::GenericInstance { args, .. } => {
                let spelled: Vec<String> = args
                    .iter()
                    .map(|arg| self.mapper.map(arg, Position::Reference, deps).text)
                    .collect();
                Some(self.mapper.cpp_path_with_args(target, &spelled))
            }
            _ => Some(self.mapper.cpp_path(target)),
        }
    }

    fn thunk(&self, entry: &RegisteredType, class_getter: &str) -> String {
        let mut spelled = self.mapper.cpp_path(entry);
        if matches!(entry.descriptor.kind, TypeKind::Class | TypeKind::Interface) {
            spelled.push('*');
        }

        let mut writer = CodeWriter::new();
        writer.write(&format!(
            "template <> inline BNM::Defaults::DefaultTypeRef BNM::Defaults::Get<{spelled}>()"
        ));
        writer.open_bracket();
        writer.write_line("static BNM::Defaults::Internal::ClassType classCache = nullptr;");
        writer.write_line(&format!("if (!classCache) classCache = {class_getter}._data;"));
        writer.write_line("return BNM::Defaults::DefaultTypeRef { &classCache };");
        writer.close_bracket("");
        writer.into_string()
    }
}

fn place_sibling<'r>(
    index: usize,
    siblings: &[&'r RegisteredType],
    placed: &mut [bool],
    ordered: &mut Vec<&'r RegisteredType>,
) {
    if placed[index] {
        return;
    }
    placed[index] = true;

    // A sibling's nested types are defined inside it, so their bases must come first too
    let mut bases = Vec::new();
    collect_bases(
        &siblings[index].identity,
        &siblings[index].descriptor,
        &mut bases,
    );
    for base in &bases {
        let owner = siblings
            .iter()
            .position(|sibling| within(base, &sibling.identity));
        if let Some(base_index) = owner {
            place_sibling(base_index, siblings, placed, ordered);
        }
    }
    ordered.push(siblings[index]);
}

fn collect_bases(identity: &str, descriptor: &TypeDescriptor, bases: &mut Vec<String>) {
    if let Some(base) = descriptor.base.as_ref().and_then(TypeReference::identity) {
        if !within(base, identity) {
            bases.push(base.to_string());
        }
    }
    for inner in &descriptor.nested_types {
        collect_bases(&nested_identity(identity, &inner.name), inner, bases);
    }
}

fn within(identity: &str, scope: &str) -> bool {
    identity
        .strip_prefix(scope)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(NESTED_SEPARATOR))
}
