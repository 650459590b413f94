//! Field accessors, constructors, method thunks and interface up-casts.
//!
//! Generated members never touch object memory directly. Each body looks the member up by
//! name through the runtime class of its declaring type, once per process (function-local
//! statics), and then reads, writes or invokes it:
//!
//! ```cpp
//! int Compute(int x) {
//!     static ::BNM::Class _class_internal_ = ::BNM::Class("Game", "Player");
//!     static ::BNM::Method<int> _method_call_ = _class_internal_.GetMethod("Compute", {"x"});
//!     _method_call_.SetInstance(reinterpret_cast<::BNM::IL2CPP::Il2CppObject*>(this));
//!     return _method_call_.Call(x);
//! }
//! ```
//!
//! Types that can not be spelled (value types without a reproduced layout) become defaulted
//! template parameters, so callers can supply the real type at the use site.

use log::debug;

use crate::{
    codegen::{
        deps::DependencySet,
        mapper::{Position, Resolution, Spelling, TypeMapper},
        runtime::{self, bind_instance, string_literal},
        sanitize::{rename_identifiers, sanitize, unique_parameter_names},
        signature::SignatureRegistry,
        writer::CodeWriter,
    },
    metadata::{
        FieldAttributes, FieldDescriptor, MethodDescriptor, RegisteredType, TypeKind,
    },
};

/// Name of the generated constructor wrapper
pub const CONSTRUCTOR_NAME: &str = "New_ctor";
/// Prefix of generated field getters
pub const GETTER_PREFIX: &str = "dyn_";
/// Prefix of generated field setters
pub const SETTER_PREFIX: &str = "_set_";
/// Prefix of generated interface up-casts
pub const UPCAST_PREFIX: &str = "As_";

/// Emits the members of one declaring type.
pub struct MemberEmitter<'m, 'a> {
    mapper: &'m TypeMapper<'a>,
    entry: &'m RegisteredType,
    class_getter: String,
    generic_names: Vec<String>,
}

impl<'m, 'a> MemberEmitter<'m, 'a> {
    /// Create an emitter for the members of `entry`
    #[must_use]
    pub fn new(mapper: &'m TypeMapper<'a>, entry: &'m RegisteredType) -> Self {
        let mut names: Vec<&str> = entry
            .enclosing
            .iter()
            .map(|outer| outer.name.as_str())
            .collect();
        names.push(&entry.descriptor.name);

        let generic_names = entry
            .inherited_generic_params()
            .chain(entry.descriptor.generic_params.iter().map(String::as_str))
            .map(sanitize)
            .collect();

        MemberEmitter {
            mapper,
            entry,
            class_getter: runtime::class_getter(entry.namespace(), &names),
            generic_names,
        }
    }

    /// The expression resolving the runtime class of the declaring type
    #[must_use]
    pub fn class_getter(&self) -> &str {
        &self.class_getter
    }

    fn template_name(&self, base: &str, taken: &[String]) -> String {
        let mut candidate = base.to_string();
        while self.generic_names.contains(&candidate) || taken.contains(&candidate) {
            candidate.push('_');
        }
        candidate
    }

    fn write_class_local(&self, writer: &mut CodeWriter) {
        writer.write_line(&format!(
            "static {} {} = {};",
            runtime::CLASS,
            runtime::CLASS_LOCAL,
            self.class_getter
        ));
    }

    fn is_value_type(&self) -> bool {
        self.entry.descriptor.kind == TypeKind::Struct
    }

    /// Emit every member in declaration order: fields, up-casts, then constructors and
    /// methods. Enums get their enumerators instead.
    pub fn emit_all(
        &self,
        writer: &mut CodeWriter,
        deps: &mut DependencySet,
        signatures: &mut SignatureRegistry,
    ) {
        if self.entry.descriptor.is_enum() {
            self.emit_enumerators(writer);
            return;
        }

        self.emit_fields(writer, deps, signatures);
        self.emit_upcasts(writer, deps, signatures);
        self.emit_methods(writer, deps, signatures);
    }

    /// Emit the constant fields of an enum as `Name = value` enumerators
    pub fn emit_enumerators(&self, writer: &mut CodeWriter) {
        let members: Vec<(String, String)> = self
            .entry
            .descriptor
            .fields
            .iter()
            .filter(|field| field.is_constant())
            .filter_map(|field| {
                field
                    .constant
                    .as_ref()
                    .map(|value| (sanitize(&field.name), value.to_string()))
            })
            .collect();

        let last = members.len().saturating_sub(1);
        for (index, (name, value)) in members.iter().enumerate() {
            let separator = if index == last { "" } else { "," };
            writer.write_line(&format!("{name} = {value}{separator}"));
        }
    }

    /// Emit a getter and a setter per field
    pub fn emit_fields(
        &self,
        writer: &mut CodeWriter,
        deps: &mut DependencySet,
        signatures: &mut SignatureRegistry,
    ) {
        for field in &self.entry.descriptor.fields {
            if field.flags.contains(FieldAttributes::LITERAL) {
                debug!(
                    "Skipping literal field {}::{}",
                    self.entry.identity, field.name
                );
                continue;
            }
            if self.is_value_type() && !field.is_static() {
                continue;
            }

            let position = self.mapper.field_position(&field.field_type);
            let spelling = self.mapper.map(&field.field_type, position, deps);
            self.emit_field(field, &spelling, writer, deps, signatures);
        }
    }

    fn emit_field(
        &self,
        field: &FieldDescriptor,
        spelling: &Spelling,
        writer: &mut CodeWriter,
        deps: &mut DependencySet,
        signatures: &mut SignatureRegistry,
    ) {
        let name = sanitize(&field.name);
        let (template, value_type) = if spelling.opaque {
            let parameter = self.template_name("T", &[]);
            (
                Some(format!(
                    "template <typename {parameter} = {}>",
                    spelling.text
                )),
                parameter,
            )
        } else {
            (None, spelling.text.clone())
        };
        let templates: Vec<String> = template.iter().map(|_| value_type.clone()).collect();
        let is_static = field.is_static();

        deps.include(runtime::CLASS_INCLUDE);
        deps.include(runtime::FIELD_INCLUDE);
        if !is_static {
            deps.include(runtime::IL2CPP_HEADERS_INCLUDE);
        }

        let getter = format!("{GETTER_PREFIX}{name}");
        if signatures.register(&getter, &templates, &[]) {
            if let Some(template) = &template {
                writer.write_line(template);
            }
            if is_static {
                writer.write("static ");
            }
            writer.write(&format!("{value_type} {getter}()"));
            writer.open_bracket();
            self.write_field_local(field, &value_type, writer);
            writer.write_line(&format!("return {}.Get();", runtime::FIELD_LOCAL));
            writer.close_bracket("");
        }

        let setter = format!("{SETTER_PREFIX}{name}");
        if signatures.register(&setter, &templates, std::slice::from_ref(&value_type)) {
            if let Some(template) = &template {
                writer.write_line(template);
            }
            if is_static {
                writer.write("static ");
            }
            writer.write(&format!("void {setter}({value_type} value)"));
            writer.open_bracket();
            self.write_field_local(field, &value_type, writer);
            writer.write_line(&format!("{}.Set(value);", runtime::FIELD_LOCAL));
            writer.close_bracket("");
        }
    }

    fn write_field_local(
        &self,
        field: &FieldDescriptor,
        value_type: &str,
        writer: &mut CodeWriter,
    ) {
        self.write_class_local(writer);
        writer.write_line(&format!(
            "static {}<{}> {} = {}.GetField({});",
            runtime::FIELD,
            value_type,
            runtime::FIELD_LOCAL,
            runtime::CLASS_LOCAL,
            string_literal(&field.name)
        ));
        if !field.is_static() {
            writer.write_line(&bind_instance(runtime::FIELD_LOCAL));
        }
    }

    /// Emit `As_<Interface>()` for every implemented interface that is emitted itself
    pub fn emit_upcasts(
        &self,
        writer: &mut CodeWriter,
        deps: &mut DependencySet,
        signatures: &mut SignatureRegistry,
    ) {
        if self.entry.descriptor.kind != TypeKind::Class {
            return;
        }

        for interface in &self.entry.descriptor.interfaces {
            let Some(identity) = interface.identity() else {
                continue;
            };
            let target = match self.mapper.resolve(identity) {
                Resolution::TopLevel(target) | Resolution::Nested(target) => target,
                _ => continue,
            };

            let name = format!("{UPCAST_PREFIX}{}", self.mapper.symbol(target));
            if !signatures.register(&name, &[], &[]) {
                continue;
            }

            let spelling = self.mapper.map(interface, Position::Reference, deps);
            writer.write(&format!("{} {}()", spelling.text, name));
            writer.open_bracket();
            writer.write_line(&format!("return reinterpret_cast<{}>(this);", spelling.text));
            writer.close_bracket("");
        }
    }

    /// Emit constructor wrappers and method thunks in declaration order
    pub fn emit_methods(
        &self,
        writer: &mut CodeWriter,
        deps: &mut DependencySet,
        signatures: &mut SignatureRegistry,
    ) {
        for method in &self.entry.descriptor.methods {
            if method.is_operator() {
                debug!("Skipping operator {}::{}", self.entry.identity, method.name);
                continue;
            }
            if method.is_static_constructor() {
                continue;
            }

            if method.is_constructor() {
                if self.is_value_type() || self.entry.descriptor.kind == TypeKind::Interface {
                    continue;
                }
                self.emit_constructor(method, writer, deps, signatures);
                continue;
            }

            if self.is_value_type() && !method.is_static() {
                continue;
            }
            self.emit_method(method, writer, deps, signatures);
        }
    }

    /// Spell the parameters of `method`, turning opaque ones into defaulted template
    /// parameters named `<prefix><index>`. Method generic parameters listed in `renames`
    /// are respelled with their emitted names.
    fn spell_params(
        &self,
        method: &MethodDescriptor,
        prefix: &str,
        renames: &[(String, String)],
        templates: &mut Vec<String>,
        template_names: &mut Vec<String>,
        deps: &mut DependencySet,
    ) -> Vec<String> {
        method
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let spelling = self.mapper.map(&param.param_type, Position::Reference, deps);
                if spelling.opaque {
                    let name = self.template_name(&format!("{prefix}{index}"), template_names);
                    templates.push(format!("typename {name} = {}", spelling.text));
                    template_names.push(name.clone());
                    name
                } else {
                    rename_identifiers(&spelling.text, renames)
                }
            })
            .collect()
    }

    fn self_spelling(&self) -> String {
        let inherited: Vec<&str> = self.entry.inherited_generic_params().collect();
        let own: Vec<String> = self
            .entry
            .descriptor
            .generic_params
            .iter()
            .filter(|param| !inherited.contains(&param.as_str()))
            .map(|param| sanitize(param))
            .collect();

        let symbol = self.mapper.symbol(self.entry);
        if own.is_empty() {
            symbol
        } else {
            format!("{symbol}<{}>", own.join(", "))
        }
    }

    fn emit_constructor(
        &self,
        method: &MethodDescriptor,
        writer: &mut CodeWriter,
        deps: &mut DependencySet,
        signatures: &mut SignatureRegistry,
    ) {
        let mut templates = Vec::new();
        let mut template_names = Vec::new();
        let param_types = self.spell_params(
            method,
            "T",
            &[],
            &mut templates,
            &mut template_names,
            deps,
        );

        if !signatures.register(CONSTRUCTOR_NAME, &template_names, &param_types) {
            return;
        }

        let names = parameter_names(method);
        let declaration = declare_params(&param_types, &names);
        let target = format!("{}*", self.self_spelling());

        deps.include(runtime::CLASS_INCLUDE);
        if !templates.is_empty() {
            writer.write_line(&format!("template <{}>", templates.join(", ")));
        }
        writer.write(&format!("static {target} {CONSTRUCTOR_NAME}({declaration})"));
        writer.open_bracket();
        self.write_class_local(writer);
        writer.write_line(&format!(
            "return ({target}){}.CreateNewObjectParameters({});",
            runtime::CLASS_LOCAL,
            names.join(", ")
        ));
        writer.close_bracket("");
    }

    fn emit_method(
        &self,
        method: &MethodDescriptor,
        writer: &mut CodeWriter,
        deps: &mut DependencySet,
        signatures: &mut SignatureRegistry,
    ) {
        // Method generics must not shadow the generics of the declaring types
        let mut template_names: Vec<String> = Vec::new();
        let mut renames = Vec::new();
        for param in &method.generic_params {
            let declared = sanitize(param);
            let emitted = self.template_name(&declared, &template_names);
            if emitted != declared {
                renames.push((declared, emitted.clone()));
            }
            template_names.push(emitted);
        }
        let mut templates: Vec<String> = template_names
            .iter()
            .map(|param| format!("typename {param}"))
            .collect();

        let returned = self.mapper.map(&method.return_type, Position::Reference, deps);
        let return_type = if returned.opaque {
            let name = self.template_name("TRet", &template_names);
            templates.push(format!("typename {name} = {}", returned.text));
            template_names.push(name.clone());
            name
        } else {
            rename_identifiers(&returned.text, &renames)
        };

        let param_types = self.spell_params(
            method,
            "TP",
            &renames,
            &mut templates,
            &mut template_names,
            deps,
        );
        let name = sanitize(&method.name);
        if !signatures.register(&name, &template_names, &param_types) {
            return;
        }

        let names = parameter_names(method);
        let is_static = method.is_static();

        deps.include(runtime::CLASS_INCLUDE);
        deps.include(runtime::METHOD_BASE_INCLUDE);
        deps.include(runtime::METHOD_INCLUDE);
        if !is_static {
            deps.include(runtime::IL2CPP_HEADERS_INCLUDE);
        }

        if !templates.is_empty() {
            writer.write_line(&format!("template <{}>", templates.join(", ")));
        }
        if is_static {
            writer.write("static ");
        }
        writer.write(&format!(
            "{return_type} {name}({})",
            declare_params(&param_types, &names)
        ));
        writer.open_bracket();
        self.write_class_local(writer);

        let lookup = if method.params.is_empty() {
            "0".to_string()
        } else {
            let raw: Vec<String> = method
                .params
                .iter()
                .map(|param| string_literal(&param.name))
                .collect();
            format!("{{{}}}", raw.join(", "))
        };
        writer.write_line(&format!(
            "static {}<{}> {} = {}.GetMethod({}, {});",
            runtime::METHOD,
            return_type,
            runtime::METHOD_LOCAL,
            runtime::CLASS_LOCAL,
            string_literal(&method.name),
            lookup
        ));
        if !is_static {
            writer.write_line(&bind_instance(runtime::METHOD_LOCAL));
        }

        let arguments: Vec<String> = method
            .params
            .iter()
            .zip(&names)
            .map(|(param, name)| {
                if param.is_by_ref() {
                    format!("&{name}")
                } else {
                    name.clone()
                }
            })
            .collect();
        let call = format!("{}.Call({});", runtime::METHOD_LOCAL, arguments.join(", "));
        if method.returns_void() {
            writer.write_line(&call);
        } else {
            writer.write_line(&format!("return {call}"));
        }
        writer.close_bracket("");
    }
}

fn parameter_names(method: &MethodDescriptor) -> Vec<String> {
    let raw: Vec<&str> = method.params.iter().map(|param| param.name.as_str()).collect();
    unique_parameter_names(&raw)
}

fn declare_params(types: &[String], names: &[String]) -> String {
    types
        .iter()
        .zip(names)
        .map(|(spelled, name)| format!("{spelled} {name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::{CollisionPolicy, GeneratorConfig},
        metadata::{OperatorName, TypeDescriptor, TypeReference, TypeRegistry},
        test::*,
    };

    fn render(types: Vec<TypeDescriptor>, identity: &str) -> (String, DependencySet) {
        let registry: TypeRegistry = create_registry(types);
        let symbols = registry.symbols(CollisionPolicy::Preserve);
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&registry, &symbols, &config);
        let entry = registry.resolve(identity).unwrap();

        let emitter = MemberEmitter::new(&mapper, entry);
        let mut writer = CodeWriter::new();
        let mut deps = DependencySet::new();
        let mut signatures = SignatureRegistry::new(identity);
        emitter.emit_all(&mut writer, &mut deps, &mut signatures);
        (writer.into_string(), deps)
    }

    #[test]
    fn test_static_field_accessors() {
        let mut foo = create_type("Game", "Foo", TypeKind::Class);
        foo.fields.push(create_static_field("Bar", int32()));

        let (text, deps) = render(vec![foo], "Game.Foo");
        assert_eq!(
            text,
            "static int dyn_Bar() {\n\
             \tstatic ::BNM::Class _class_internal_ = ::BNM::Class(\"Game\", \"Foo\");\n\
             \tstatic ::BNM::Field<int> _field_internal_ = _class_internal_.GetField(\"Bar\");\n\
             \treturn _field_internal_.Get();\n\
             }\n\
             static void _set_Bar(int value) {\n\
             \tstatic ::BNM::Class _class_internal_ = ::BNM::Class(\"Game\", \"Foo\");\n\
             \tstatic ::BNM::Field<int> _field_internal_ = _class_internal_.GetField(\"Bar\");\n\
             \t_field_internal_.Set(value);\n\
             }\n"
        );
        assert!(!text.contains("SetInstance"));
        assert!(deps.has_include("BNM/Field.hpp"));
        assert!(deps.has_include("cstdint"));
    }

    #[test]
    fn test_instance_method_thunk() {
        let mut foo = create_type("Game", "Foo", TypeKind::Class);
        foo.methods
            .push(create_method("Compute", int32(), vec![create_param("x", int32())]));

        let (text, deps) = render(vec![foo], "Game.Foo");
        assert_eq!(
            text,
            "int Compute(int x) {\n\
             \tstatic ::BNM::Class _class_internal_ = ::BNM::Class(\"Game\", \"Foo\");\n\
             \tstatic ::BNM::Method<int> _method_call_ = _class_internal_.GetMethod(\"Compute\", {\"x\"});\n\
             \t_method_call_.SetInstance(reinterpret_cast<::BNM::IL2CPP::Il2CppObject*>(this));\n\
             \treturn _method_call_.Call(x);\n\
             }\n"
        );
        assert!(!text.contains("template"));
        assert!(deps.has_include("BNM/Method.hpp"));
        assert!(deps.has_include("BNM/MethodBase.hpp"));
        assert!(deps.has_include("BNM/Il2CppHeaders.hpp"));
    }

    #[test]
    fn test_void_static_method_without_params() {
        let mut foo = create_type("Game", "Foo", TypeKind::Class);
        foo.methods.push(create_static_method("Reset", void(), Vec::new()));

        let (text, _) = render(vec![foo], "Game.Foo");
        assert!(text.starts_with("static void Reset() {\n"));
        assert!(text.contains("GetMethod(\"Reset\", 0);"));
        assert!(text.contains("\t_method_call_.Call();\n"));
        assert!(!text.contains("return"));
    }

    #[test]
    fn test_opaque_overloads_collapse() {
        let mut inventory = create_type("Game", "Inventory", TypeKind::Class);
        inventory.methods.push(create_method(
            "Get",
            int32(),
            vec![create_param("a", TypeReference::named("Game.VecA"))],
        ));
        inventory.methods.push(create_method(
            "Get",
            int32(),
            vec![create_param("b", TypeReference::named("Game.VecB"))],
        ));

        let (text, _) = render(
            vec![
                inventory,
                create_type("Game", "VecA", TypeKind::Struct),
                create_type("Game", "VecB", TypeKind::Struct),
            ],
            "Game.Inventory",
        );
        assert_eq!(text.matches(" Get(").count(), 1);
        assert!(text.contains("template <typename TP0 = void*>\nint Get(TP0 a)"));
    }

    #[test]
    fn test_operators_and_type_initializers_skipped() {
        let mut money = create_type("Game", "Money", TypeKind::Class);
        money.methods.push(create_static_method(
            "op_Addition",
            TypeReference::named("Game.Money"),
            vec![
                create_param("a", TypeReference::named("Game.Money")),
                create_param("b", TypeReference::named("Game.Money")),
            ],
        ));
        money.methods.push(create_static_method(
            "op_Implicit",
            int32(),
            vec![create_param("m", TypeReference::named("Game.Money"))],
        ));
        money.methods.push(create_cctor());

        let (text, _) = render(vec![money], "Game.Money");
        assert!(text.is_empty());
    }

    #[test]
    fn test_constructor_wrapper() {
        let mut pool = create_type("Game", "Pool`1", TypeKind::Class);
        pool.generic_params.push("T".to_string());
        pool.methods.push(create_ctor(vec![
            create_param("size", int32()),
            create_param("origin", TypeReference::named("Game.Vec")),
        ]));

        let (text, deps) = render(
            vec![pool, create_type("Game", "Vec", TypeKind::Struct)],
            "Game.Pool`1",
        );
        assert_eq!(
            text,
            "template <typename T1 = void*>\n\
             static Pool_1<T>* New_ctor(int size, T1 origin) {\n\
             \tstatic ::BNM::Class _class_internal_ = ::BNM::Class(\"Game\", \"Pool`1\");\n\
             \treturn (Pool_1<T>*)_class_internal_.CreateNewObjectParameters(size, origin);\n\
             }\n"
        );
        assert!(deps.has_include("BNM/Class.hpp"));
    }

    #[test]
    fn test_template_names_avoid_generic_params() {
        let mut holder = create_type("Game", "Holder`1", TypeKind::Class);
        holder.generic_params.push("T".to_string());
        holder
            .fields
            .push(create_field("value", TypeReference::named("Game.Vec")));

        let (text, _) = render(
            vec![holder, create_type("Game", "Vec", TypeKind::Struct)],
            "Game.Holder`1",
        );
        assert!(text.contains("template <typename T_ = void*>\nT_ dyn_value()"));
        assert!(text.contains("void _set_value(T_ value)"));
    }

    #[test]
    fn test_struct_keeps_static_members_only() {
        let mut vec = create_type("Game", "Vec", TypeKind::Struct);
        vec.fields.push(create_field("x", TypeReference::named("System.Single")));
        vec.fields
            .push(create_static_field("zero", TypeReference::named("Game.Vec")));
        vec.methods.push(create_ctor(vec![create_param("x", int32())]));
        vec.methods.push(create_method("Length", int32(), Vec::new()));
        vec.methods.push(create_static_method("Dot", int32(), Vec::new()));

        let (text, _) = render(vec![vec], "Game.Vec");
        assert!(!text.contains("dyn_x"));
        assert!(text.contains("static T dyn_zero()"));
        assert!(!text.contains("New_ctor"));
        assert!(!text.contains("Length"));
        assert!(text.contains("static int Dot()"));
        assert!(!text.contains("SetInstance"));
    }

    #[test]
    fn test_enumerators() {
        let mut state = create_type("Game", "State", TypeKind::Enum);
        state.fields.push(create_enum_value_field("System.Byte"));
        state.fields.push(create_enum_member("A", "Game.State", 0));
        state.fields.push(create_enum_member("B", "Game.State", 1));

        let (text, _) = render(vec![state], "Game.State");
        assert_eq!(text, "A = 0,\nB = 1\n");
    }

    #[test]
    fn test_upcasts_and_by_ref_arguments() {
        let mut player = create_type("Game", "Player", TypeKind::Class);
        player
            .interfaces
            .push(TypeReference::named("Game.IDamageable"));
        player
            .interfaces
            .push(TypeReference::named("System.IDisposable"));
        player.methods.push(create_method(
            "TryHit",
            TypeReference::named("System.Boolean"),
            vec![create_param("damage", int32().by_ref())],
        ));

        let mut nested = create_type("", "Hidden", TypeKind::Interface);
        nested.methods.push(create_method("Ping", void(), Vec::new()));
        player.nested_types.push(Arc::new(nested));

        let (text, deps) = render(
            vec![player, create_type("Game", "IDamageable", TypeKind::Interface)],
            "Game.Player",
        );
        assert!(text.contains(
            "::Game::IDamageable* As_IDamageable() {\n\treturn reinterpret_cast<::Game::IDamageable*>(this);\n}\n"
        ));
        assert!(!text.contains("As_IDisposable"));
        assert!(text.contains("bool TryHit(int& damage)"));
        assert!(text.contains("return _method_call_.Call(&damage);"));
        assert!(deps.has_forward("Game.IDamageable"));
    }

    #[test]
    fn test_generic_and_opaque_overloads_collapse() {
        let mut list = create_type("Game", "Bag", TypeKind::Class);
        let mut generic = create_method(
            "Add",
            void(),
            vec![create_param("item", TypeReference::generic_parameter("T"))],
        );
        generic.generic_params.push("T".to_string());
        list.methods.push(generic);
        list.methods.push(create_method(
            "Add",
            void(),
            vec![create_param("v", TypeReference::named("Game.Vec"))],
        ));

        let (text, _) = render(
            vec![list, create_type("Game", "Vec", TypeKind::Struct)],
            "Game.Bag",
        );
        assert_eq!(text.matches(" Add(").count(), 1);
        assert!(text.contains("template <typename T>\nvoid Add(T item)"));
    }

    #[test]
    fn test_method_generics_do_not_shadow_class_generics() {
        let mut boxed = create_type("Game", "Box`1", TypeKind::Class);
        boxed.generic_params.push("T".to_string());
        let mut method = create_method(
            "M",
            TypeReference::generic_parameter("T"),
            vec![create_param("x", TypeReference::generic_parameter("T"))],
        );
        method.generic_params.push("T".to_string());
        boxed.methods.push(method);

        let (text, _) = render(vec![boxed], "Game.Box`1");
        assert!(text.contains("template <typename T_>\nT_ M(T_ x)"));
        assert!(text.contains("::BNM::Method<T_>"));
        assert!(!text.contains("typename T>"));
    }

    #[test]
    fn test_every_operator_name_is_skipped() {
        const OPERATORS: &[&str] = &[
            "op_Implicit",
            "op_Explicit",
            "op_Assign",
            "op_AdditionAssignment",
            "op_SubtractionAssignment",
            "op_MultiplicationAssignment",
            "op_DivisionAssignment",
            "op_ModulusAssignment",
            "op_BitwiseAndAssignment",
            "op_BitwiseOrAssignment",
            "op_ExclusiveOrAssignment",
            "op_LeftShiftAssignment",
            "op_RightShiftAssignment",
            "op_Increment",
            "op_Decrement",
            "op_UnaryPlus",
            "op_UnaryNegation",
            "op_Addition",
            "op_Subtraction",
            "op_Multiply",
            "op_Division",
            "op_Modulus",
            "op_OnesComplement",
            "op_BitwiseAnd",
            "op_BitwiseOr",
            "op_ExclusiveOr",
            "op_LeftShift",
            "op_RightShift",
            "op_LogicalNot",
            "op_LogicalAnd",
            "op_LogicalOr",
            "op_Equality",
            "op_Inequality",
            "op_LessThan",
            "op_GreaterThan",
            "op_LessThanOrEqual",
            "op_GreaterThanOrEqual",
            "op_Comma",
            "op_True",
            "op_False",
        ];
        assert_eq!(OPERATORS.len(), 40);

        for operator in OPERATORS {
            assert!(OperatorName::matches(operator), "{operator}");

            let mut money = create_type("Game", "Money", TypeKind::Class);
            money.methods.push(create_static_method(
                operator,
                int32(),
                vec![create_param("m", int32())],
            ));
            let (text, _) = render(vec![money], "Game.Money");
            assert!(text.is_empty(), "{operator} emitted:\n{text}");
        }

        let mut money = create_type("Game", "Money", TypeKind::Class);
        money
            .methods
            .push(create_static_method("op_Custom", int32(), Vec::new()));
        let (text, _) = render(vec![money], "Game.Money");
        assert!(text.contains("static int op_Custom()"));
    }
}
