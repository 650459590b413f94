//! Member attribute flags as exported by the metadata dumper.
//!
//! The values are the raw ECMA-335 bit positions (§II.23.1.5 and §II.23.1.10), so a dumper
//! can copy them straight out of the `Field` and `MethodDef` tables. In module dumps the
//! flags are written in their textual form, e.g. `"STATIC | LITERAL"`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Field attribute flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FieldAttributes: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field can only be initialized, not written to after init
        const INIT_ONLY = 0x0020;
        /// Value is compile time constant
        const LITERAL = 0x0040;
        /// Reserved (to indicate this field should not be serialized when type is remoted)
        const NOT_SERIALIZED = 0x0080;
        /// Field is special
        const SPECIAL_NAME = 0x0200;
        /// CLI provides 'special' behavior, depending upon the name of the field
        const RT_SPECIAL_NAME = 0x0400;
        /// Field has default
        const HAS_DEFAULT = 0x8000;
    }
}

impl Default for FieldAttributes {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Method attribute flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MethodAttributes: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, depending upon the name of the method
        const RT_SPECIAL_NAME = 0x1000;
    }
}

impl Default for MethodAttributes {
    fn default() -> Self {
        Self::empty()
    }
}
