//! Type, field and method descriptors.
//!
//! Descriptors are the owned, read-only view of one module's type definitions. A
//! [`TypeDescriptor`] owns its nested types, fields and methods; cross-type links are
//! expressed through [`TypeReference`]s and resolved through the registry.

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::metadata::{
    attributes::{FieldAttributes, MethodAttributes},
    reference::TypeReference,
};

/// Name of the instance field that carries an enum's underlying value
pub const ENUM_VALUE_FIELD: &str = "value__";

/// Identity of the implicit enum underlying type
pub const DEFAULT_ENUM_UNDERLYING: &str = "System.Int32";

/// Identity of `void`
pub const VOID: &str = "System.Void";

/// The category of a type definition
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TypeKind {
    /// Reference type
    Class,
    /// Value type other than an enum
    Struct,
    /// Enumeration, a value type with named constants
    Enum,
    /// Interface
    Interface,
}

/// Metadata names of user-defined operators and conversions (ECMA-335 §I.10.3).
///
/// Methods carrying one of these names have no ordinary callable spelling and are never
/// emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum OperatorName {
    /// Implicit conversion
    #[strum(serialize = "op_Implicit")]
    Implicit,
    /// Explicit conversion
    #[strum(serialize = "op_Explicit")]
    Explicit,
    /// `=`
    #[strum(serialize = "op_Assign")]
    Assign,
    /// `+=`
    #[strum(serialize = "op_AdditionAssignment")]
    AdditionAssignment,
    /// `-=`
    #[strum(serialize = "op_SubtractionAssignment")]
    SubtractionAssignment,
    /// `*=`
    #[strum(serialize = "op_MultiplicationAssignment")]
    MultiplicationAssignment,
    /// `/=`
    #[strum(serialize = "op_DivisionAssignment")]
    DivisionAssignment,
    /// `%=`
    #[strum(serialize = "op_ModulusAssignment")]
    ModulusAssignment,
    /// `&=`
    #[strum(serialize = "op_BitwiseAndAssignment")]
    BitwiseAndAssignment,
    /// `|=`
    #[strum(serialize = "op_BitwiseOrAssignment")]
    BitwiseOrAssignment,
    /// `^=`
    #[strum(serialize = "op_ExclusiveOrAssignment")]
    ExclusiveOrAssignment,
    /// `<<=`
    #[strum(serialize = "op_LeftShiftAssignment")]
    LeftShiftAssignment,
    /// `>>=`
    #[strum(serialize = "op_RightShiftAssignment")]
    RightShiftAssignment,
    /// `++`
    #[strum(serialize = "op_Increment")]
    Increment,
    /// `--`
    #[strum(serialize = "op_Decrement")]
    Decrement,
    /// Unary `+`
    #[strum(serialize = "op_UnaryPlus")]
    UnaryPlus,
    /// Unary `-`
    #[strum(serialize = "op_UnaryNegation")]
    UnaryNegation,
    /// `+`
    #[strum(serialize = "op_Addition")]
    Addition,
    /// `-`
    #[strum(serialize = "op_Subtraction")]
    Subtraction,
    /// `*`
    #[strum(serialize = "op_Multiply")]
    Multiply,
    /// `/`
    #[strum(serialize = "op_Division")]
    Division,
    /// `%`
    #[strum(serialize = "op_Modulus")]
    Modulus,
    /// `~`
    #[strum(serialize = "op_OnesComplement")]
    OnesComplement,
    /// `&`
    #[strum(serialize = "op_BitwiseAnd")]
    BitwiseAnd,
    /// `|`
    #[strum(serialize = "op_BitwiseOr")]
    BitwiseOr,
    /// `^`
    #[strum(serialize = "op_ExclusiveOr")]
    ExclusiveOr,
    /// `<<`
    #[strum(serialize = "op_LeftShift")]
    LeftShift,
    /// `>>`
    #[strum(serialize = "op_RightShift")]
    RightShift,
    /// `!`
    #[strum(serialize = "op_LogicalNot")]
    LogicalNot,
    /// `&&`
    #[strum(serialize = "op_LogicalAnd")]
    LogicalAnd,
    /// `||`
    #[strum(serialize = "op_LogicalOr")]
    LogicalOr,
    /// `==`
    #[strum(serialize = "op_Equality")]
    Equality,
    /// `!=`
    #[strum(serialize = "op_Inequality")]
    Inequality,
    /// `<`
    #[strum(serialize = "op_LessThan")]
    LessThan,
    /// `>`
    #[strum(serialize = "op_GreaterThan")]
    GreaterThan,
    /// `<=`
    #[strum(serialize = "op_LessThanOrEqual")]
    LessThanOrEqual,
    /// `>=`
    #[strum(serialize = "op_GreaterThanOrEqual")]
    GreaterThanOrEqual,
    /// `,`
    #[strum(serialize = "op_Comma")]
    Comma,
    /// `true` operator
    #[strum(serialize = "op_True")]
    True,
    /// `false` operator
    #[strum(serialize = "op_False")]
    False,
}

impl OperatorName {
    /// Returns true if `name` is one of the operator method names
    #[must_use]
    pub fn matches(name: &str) -> bool {
        OperatorName::from_str(name).is_ok()
    }
}

/// A compile-time constant attached to a literal field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    /// Boolean constant
    Bool(bool),
    /// Signed integer constant (all integer widths up to 64 bit)
    Integer(i64),
    /// Unsigned constant that does not fit into `i64`
    Unsigned(u64),
    /// Floating point constant
    Float(f64),
    /// String constant
    String(String),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Bool(value) => write!(f, "{value}"),
            ConstantValue::Integer(value) => write!(f, "{value}"),
            ConstantValue::Unsigned(value) => write!(f, "{value}"),
            ConstantValue::Float(value) => write!(f, "{value}"),
            ConstantValue::String(value) => write!(f, "{value:?}"),
        }
    }
}

/// A field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as declared
    pub name: String,
    /// Declared type of the field
    #[serde(rename = "type")]
    pub field_type: TypeReference,
    /// Field attributes
    #[serde(default)]
    pub flags: FieldAttributes,
    /// Constant value for literal fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<ConstantValue>,
}

impl FieldDescriptor {
    /// Returns true if the field is defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(FieldAttributes::STATIC)
    }

    /// Returns true if the field is a static field with a constant value
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.is_static() && self.constant.is_some()
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Parameter name, may be empty for stripped metadata
    #[serde(default)]
    pub name: String,
    /// Declared parameter type; `ref`/`out` parameters carry a by-reference type
    #[serde(rename = "type")]
    pub param_type: TypeReference,
}

impl ParamDescriptor {
    /// Returns true if the parameter is passed by reference
    #[must_use]
    pub fn is_by_ref(&self) -> bool {
        self.param_type.is_by_ref()
    }
}

fn void_reference() -> TypeReference {
    TypeReference::named(VOID)
}

/// A method definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name as declared (`.ctor`, `get_Item`, `op_Addition`, ...)
    pub name: String,
    /// Return type, `System.Void` when omitted
    #[serde(rename = "returns", default = "void_reference")]
    pub return_type: TypeReference,
    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
    /// Generic parameter names of a generic method definition
    #[serde(default)]
    pub generic_params: Vec<String>,
    /// Method attributes
    #[serde(default)]
    pub flags: MethodAttributes,
}

impl MethodDescriptor {
    /// Returns true if the method is defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodAttributes::STATIC)
    }

    /// Returns true for instance and type initializers
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.flags.contains(MethodAttributes::RT_SPECIAL_NAME)
            && (self.name == ".ctor" || self.name == ".cctor")
    }

    /// Returns true for the type initializer
    #[must_use]
    pub fn is_static_constructor(&self) -> bool {
        self.is_constructor() && (self.is_static() || self.name == ".cctor")
    }

    /// Returns true for user-defined operators and conversions
    #[must_use]
    pub fn is_operator(&self) -> bool {
        OperatorName::matches(&self.name)
    }

    /// Returns true if the return type is `void`
    #[must_use]
    pub fn returns_void(&self) -> bool {
        matches!(&self.return_type, TypeReference::Named { name } if name == VOID)
    }
}

/// A type definition together with everything it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Dotted namespace, empty for the global namespace and for nested types
    #[serde(default)]
    pub namespace: String,
    /// Simple name including the generic arity marker (`List`1`)
    pub name: String,
    /// Type category
    pub kind: TypeKind,
    /// Generic parameter names of a generic type definition
    #[serde(default)]
    pub generic_params: Vec<String>,
    /// Base type (`extends`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeReference>,
    /// Directly implemented interfaces
    #[serde(default)]
    pub interfaces: Vec<TypeReference>,
    /// Types declared inside this type
    #[serde(default)]
    pub nested_types: Vec<Arc<TypeDescriptor>>,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Methods in declaration order
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    /// Underlying numeric type of an enum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<TypeReference>,
}

impl TypeDescriptor {
    /// Create an empty descriptor of the given kind
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        TypeDescriptor {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            generic_params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            nested_types: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            underlying: None,
        }
    }

    /// Identity of this type when declared at the top level (`Namespace.Name`)
    #[must_use]
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Namespace segments, empty for the global namespace
    pub fn namespace_segments(&self) -> impl Iterator<Item = &str> {
        self.namespace.split('.').filter(|segment| !segment.is_empty())
    }

    /// Returns true for structs and enums
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }

    /// Returns true for enums
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    /// Returns true for generic type definitions
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// Returns true for the `<Module>` pseudo type and compiler emitted helper types
    #[must_use]
    pub fn is_compiler_generated(&self) -> bool {
        self.name == "<Module>" || self.name.starts_with("<PrivateImplementationDetails>")
    }

    /// The underlying numeric type of an enum.
    ///
    /// Uses the explicit `underlying` reference when present, else the type of the
    /// `value__` instance field, else `System.Int32`.
    #[must_use]
    pub fn enum_underlying(&self) -> TypeReference {
        if let Some(underlying) = &self.underlying {
            return underlying.clone();
        }

        self.fields
            .iter()
            .find(|field| field.name == ENUM_VALUE_FIELD && !field.is_static())
            .map(|field| field.field_type.clone())
            .unwrap_or_else(|| TypeReference::named(DEFAULT_ENUM_UNDERLYING))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_names() {
        assert!(OperatorName::matches("op_Implicit"));
        assert!(OperatorName::matches("op_GreaterThanOrEqual"));
        assert!(OperatorName::matches("op_False"));
        assert!(!OperatorName::matches("op_Something"));
        assert!(!OperatorName::matches("Add"));
    }

    #[test]
    fn test_method_predicates() {
        let ctor = MethodDescriptor {
            name: ".ctor".to_string(),
            return_type: TypeReference::named(VOID),
            params: Vec::new(),
            generic_params: Vec::new(),
            flags: MethodAttributes::SPECIAL_NAME | MethodAttributes::RT_SPECIAL_NAME,
        };
        assert!(ctor.is_constructor());
        assert!(!ctor.is_static_constructor());
        assert!(ctor.returns_void());

        let cctor = MethodDescriptor {
            name: ".cctor".to_string(),
            flags: ctor.flags | MethodAttributes::STATIC,
            ..ctor.clone()
        };
        assert!(cctor.is_static_constructor());

        let plain = MethodDescriptor {
            name: ".ctor".to_string(),
            flags: MethodAttributes::empty(),
            ..ctor
        };
        assert!(!plain.is_constructor());
    }

    #[test]
    fn test_enum_underlying_fallbacks() {
        let mut descriptor = TypeDescriptor::new("Game", "State", TypeKind::Enum);
        assert_eq!(
            descriptor.enum_underlying(),
            TypeReference::named(DEFAULT_ENUM_UNDERLYING)
        );

        descriptor.fields.push(FieldDescriptor {
            name: ENUM_VALUE_FIELD.to_string(),
            field_type: TypeReference::named("System.Byte"),
            flags: FieldAttributes::SPECIAL_NAME | FieldAttributes::RT_SPECIAL_NAME,
            constant: None,
        });
        assert_eq!(
            descriptor.enum_underlying(),
            TypeReference::named("System.Byte")
        );

        descriptor.underlying = Some(TypeReference::named("System.Int64"));
        assert_eq!(
            descriptor.enum_underlying(),
            TypeReference::named("System.Int64")
        );
    }

    #[test]
    fn test_descriptor_json_defaults() {
        let json = r#"{
            "name": "Player",
            "namespace": "Game.Actors",
            "kind": "class",
            "methods": [{ "name": "Jump" }]
        }"#;
        let descriptor: TypeDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.fullname(), "Game.Actors.Player");
        assert_eq!(
            descriptor.namespace_segments().collect::<Vec<_>>(),
            vec!["Game", "Actors"]
        );
        assert!(descriptor.methods[0].returns_void());
        assert!(descriptor.methods[0].flags.is_empty());
    }
}
