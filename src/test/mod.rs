use std::sync::Arc;

use crate::metadata::{
    ConstantValue, FieldAttributes, FieldDescriptor, MethodAttributes, MethodDescriptor,
    ModuleDump, ParamDescriptor, TypeDescriptor, TypeKind, TypeReference, TypeRegistry,
};

// Helper function to create an empty type definition
pub fn create_type(namespace: &str, name: &str, kind: TypeKind) -> TypeDescriptor {
    let mut descriptor = TypeDescriptor::new(namespace, name, kind);
    if kind == TypeKind::Class {
        descriptor.base = Some(TypeReference::named("System.Object"));
    }
    descriptor
}

// Helper function to create a module dump
pub fn create_module(name: &str, types: Vec<TypeDescriptor>) -> ModuleDump {
    ModuleDump {
        name: name.to_string(),
        types: types.into_iter().map(Arc::new).collect(),
    }
}

// Helper function to create a registry from a single module
pub fn create_registry(types: Vec<TypeDescriptor>) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_module(&create_module("Assembly-CSharp", types));
    registry
}

// Helper function to create an instance field
pub fn create_field(name: &str, field_type: TypeReference) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        field_type,
        flags: FieldAttributes::empty(),
        constant: None,
    }
}

// Helper function to create a static field
pub fn create_static_field(name: &str, field_type: TypeReference) -> FieldDescriptor {
    FieldDescriptor {
        flags: FieldAttributes::STATIC,
        ..create_field(name, field_type)
    }
}

// Helper function to create an enum member
pub fn create_enum_member(name: &str, owner: &str, value: i64) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        field_type: TypeReference::named(owner),
        flags: FieldAttributes::STATIC | FieldAttributes::LITERAL | FieldAttributes::HAS_DEFAULT,
        constant: Some(ConstantValue::Integer(value)),
    }
}

// Helper function to create the `value__` field of an enum
pub fn create_enum_value_field(underlying: &str) -> FieldDescriptor {
    FieldDescriptor {
        name: "value__".to_string(),
        field_type: TypeReference::named(underlying),
        flags: FieldAttributes::SPECIAL_NAME | FieldAttributes::RT_SPECIAL_NAME,
        constant: None,
    }
}

// Helper function to create a parameter
pub fn create_param(name: &str, param_type: TypeReference) -> ParamDescriptor {
    ParamDescriptor {
        name: name.to_string(),
        param_type,
    }
}

// Helper function to create an instance method
pub fn create_method(
    name: &str,
    return_type: TypeReference,
    params: Vec<ParamDescriptor>,
) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        return_type,
        params,
        generic_params: Vec::new(),
        flags: MethodAttributes::HIDE_BY_SIG,
    }
}

// Helper function to create a static method
pub fn create_static_method(
    name: &str,
    return_type: TypeReference,
    params: Vec<ParamDescriptor>,
) -> MethodDescriptor {
    MethodDescriptor {
        flags: MethodAttributes::HIDE_BY_SIG | MethodAttributes::STATIC,
        ..create_method(name, return_type, params)
    }
}

// Helper function to create an instance constructor
pub fn create_ctor(params: Vec<ParamDescriptor>) -> MethodDescriptor {
    MethodDescriptor {
        flags: MethodAttributes::HIDE_BY_SIG
            | MethodAttributes::SPECIAL_NAME
            | MethodAttributes::RT_SPECIAL_NAME,
        ..create_method(".ctor", TypeReference::named("System.Void"), params)
    }
}

// Helper function to create a type initializer
pub fn create_cctor() -> MethodDescriptor {
    MethodDescriptor {
        flags: MethodAttributes::STATIC
            | MethodAttributes::SPECIAL_NAME
            | MethodAttributes::RT_SPECIAL_NAME,
        ..create_method(".cctor", TypeReference::named("System.Void"), Vec::new())
    }
}

pub fn int32() -> TypeReference {
    TypeReference::named("System.Int32")
}

pub fn void() -> TypeReference {
    TypeReference::named("System.Void")
}
