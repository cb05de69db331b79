//! Primitive type kinds for the built-in numeric, character and boolean types.

use std::fmt;

use crate::TypeHash;

/// Primitive type kinds.
///
/// `PrimitiveKind` is the "primitive code" of a type. Types that are not
/// primitive have no kind (`Option<PrimitiveKind>::None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float,
    Double,
    Decimal,
    Char,
    NativeInt,
    Bool,
    Void,
}

impl PrimitiveKind {
    /// Every primitive kind, in declaration order.
    pub const ALL: [PrimitiveKind; 15] = [
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Uint8,
        PrimitiveKind::Uint16,
        PrimitiveKind::Uint32,
        PrimitiveKind::Uint64,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Decimal,
        PrimitiveKind::Char,
        PrimitiveKind::NativeInt,
        PrimitiveKind::Bool,
        PrimitiveKind::Void,
    ];

    /// The kinds that take part in the numeric conversion lattice.
    pub const NUMERIC: [PrimitiveKind; 13] = [
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Uint8,
        PrimitiveKind::Uint16,
        PrimitiveKind::Uint32,
        PrimitiveKind::Uint64,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Decimal,
        PrimitiveKind::Char,
        PrimitiveKind::NativeInt,
    ];

    /// Get the TypeHash for this primitive type.
    pub const fn type_hash(self) -> TypeHash {
        use crate::primitives;
        match self {
            PrimitiveKind::Int8 => primitives::INT8,
            PrimitiveKind::Int16 => primitives::INT16,
            PrimitiveKind::Int32 => primitives::INT32,
            PrimitiveKind::Int64 => primitives::INT64,
            PrimitiveKind::Uint8 => primitives::UINT8,
            PrimitiveKind::Uint16 => primitives::UINT16,
            PrimitiveKind::Uint32 => primitives::UINT32,
            PrimitiveKind::Uint64 => primitives::UINT64,
            PrimitiveKind::Float => primitives::FLOAT,
            PrimitiveKind::Double => primitives::DOUBLE,
            PrimitiveKind::Decimal => primitives::DECIMAL,
            PrimitiveKind::Char => primitives::CHAR,
            PrimitiveKind::NativeInt => primitives::NINT,
            PrimitiveKind::Bool => primitives::BOOL,
            PrimitiveKind::Void => primitives::VOID,
        }
    }

    /// Look up the kind for a primitive type hash.
    pub fn from_hash(hash: TypeHash) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_hash() == hash)
    }

    /// Get the name of this primitive type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Uint32 => "uint",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Char => "char",
            PrimitiveKind::NativeInt => "nint",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Void => "void",
        }
    }

    /// Row/column of this kind in the numeric lattice, if it is numeric.
    pub const fn lattice_index(self) -> Option<usize> {
        match self {
            PrimitiveKind::Int8 => Some(0),
            PrimitiveKind::Int16 => Some(1),
            PrimitiveKind::Int32 => Some(2),
            PrimitiveKind::Int64 => Some(3),
            PrimitiveKind::Uint8 => Some(4),
            PrimitiveKind::Uint16 => Some(5),
            PrimitiveKind::Uint32 => Some(6),
            PrimitiveKind::Uint64 => Some(7),
            PrimitiveKind::Float => Some(8),
            PrimitiveKind::Double => Some(9),
            PrimitiveKind::Decimal => Some(10),
            PrimitiveKind::Char => Some(11),
            PrimitiveKind::NativeInt => Some(12),
            PrimitiveKind::Bool | PrimitiveKind::Void => None,
        }
    }

    pub const fn is_numeric(self) -> bool {
        self.lattice_index().is_some()
    }

    /// Integral kinds, including `char` and `nint`.
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int8
                | PrimitiveKind::Int16
                | PrimitiveKind::Int32
                | PrimitiveKind::Int64
                | PrimitiveKind::Uint8
                | PrimitiveKind::Uint16
                | PrimitiveKind::Uint32
                | PrimitiveKind::Uint64
                | PrimitiveKind::Char
                | PrimitiveKind::NativeInt
        )
    }

    pub const fn is_floating(self) -> bool {
        matches!(self, PrimitiveKind::Float | PrimitiveKind::Double)
    }

    /// Inclusive value range of an integral kind.
    ///
    /// `nint` is treated as 64 bits wide.
    pub const fn integral_range(self) -> Option<(i128, i128)> {
        match self {
            PrimitiveKind::Int8 => Some((i8::MIN as i128, i8::MAX as i128)),
            PrimitiveKind::Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            PrimitiveKind::Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            PrimitiveKind::Int64 | PrimitiveKind::NativeInt => {
                Some((i64::MIN as i128, i64::MAX as i128))
            }
            PrimitiveKind::Uint8 => Some((0, u8::MAX as i128)),
            PrimitiveKind::Uint16 | PrimitiveKind::Char => Some((0, u16::MAX as i128)),
            PrimitiveKind::Uint32 => Some((0, u32::MAX as i128)),
            PrimitiveKind::Uint64 => Some((0, u64::MAX as i128)),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hash_round_trips_every_kind() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_hash(kind.type_hash()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_hash(TypeHash::from_name("Player")), None);
    }

    #[test]
    fn lattice_covers_numeric_kinds_only() {
        for (i, kind) in PrimitiveKind::NUMERIC.into_iter().enumerate() {
            assert_eq!(kind.lattice_index(), Some(i));
        }
        assert!(!PrimitiveKind::Bool.is_numeric());
        assert!(!PrimitiveKind::Void.is_numeric());
    }

    #[test]
    fn char_is_integral_with_unsigned_range() {
        assert!(PrimitiveKind::Char.is_integral());
        assert_eq!(PrimitiveKind::Char.integral_range(), Some((0, 65535)));
        assert_eq!(PrimitiveKind::Double.integral_range(), None);
    }
}
