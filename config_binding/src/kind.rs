//! The closed set of configuration entry kinds and their static facts.

use std::fmt;

use serde::Serialize;

use crate::shape::TypeShape;

/// Kind of a configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// 64-bit signed integer.
    Long,
    /// 32-bit signed integer.
    Integer,
    /// 16-bit signed integer.
    Short,
    /// 8-bit signed integer.
    Byte,
    /// 64-bit float.
    Double,
    /// 32-bit float.
    Float,
    /// Boolean flag.
    Boolean,
    /// UTF-8 string.
    String,
    /// Fieldless enum declared with [`config_enum!`](crate::config_enum).
    Enum,
    /// Nested object marked with [`ConfigObject`](crate::ConfigObject).
    Object,
}

impl EntryKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Long,
        Self::Integer,
        Self::Short,
        Self::Byte,
        Self::Double,
        Self::Float,
        Self::Boolean,
        Self::String,
        Self::Enum,
        Self::Object,
    ];

    /// Whether properties of this kind must be declared read-only.
    ///
    /// Such properties are fixed at construction and only mutated through the
    /// entry API; every other kind must be declared read-write.
    #[must_use]
    pub const fn must_be_final(self) -> bool {
        matches!(self, Self::Object)
    }

    /// Whether this kind may be the element type of an array property.
    #[must_use]
    pub const fn allowed_in_arrays(self) -> bool {
        !matches!(self, Self::Object)
    }

    /// Whether the kind carries a number subject to range constraints.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Long | Self::Integer | Self::Short | Self::Byte | Self::Double | Self::Float
        )
    }

    /// Type-compatibility predicate used during validation.
    ///
    /// `shape` is the element type after array unwrapping. Opaque shapes are
    /// accepted only by the kinds they list as representable.
    #[must_use]
    pub fn accepts(self, shape: &TypeShape) -> bool {
        match (self, shape) {
            (_, TypeShape::Opaque { represents, .. }) => represents.contains(&self),
            (Self::Long, TypeShape::Long)
            | (Self::Integer, TypeShape::Integer)
            | (Self::Short, TypeShape::Short)
            | (Self::Byte, TypeShape::Byte)
            | (Self::Double, TypeShape::Double)
            | (Self::Float, TypeShape::Float)
            | (Self::Boolean, TypeShape::Boolean)
            | (Self::String, TypeShape::String)
            | (Self::Enum, TypeShape::Enum { .. })
            | (Self::Object, TypeShape::Object { .. }) => true,
            _ => false,
        }
    }

    /// Upper-case name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Integer => "INTEGER",
            Self::Short => "SHORT",
            Self::Byte => "BYTE",
            Self::Double => "DOUBLE",
            Self::Float => "FLOAT",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Enum => "ENUM",
            Self::Object => "OBJECT",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
