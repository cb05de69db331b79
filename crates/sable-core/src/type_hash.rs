//! Name-derived identity for types and functions.
//!
//! A [`TypeHash`] is a 64-bit XXHash64 digest of a name or signature. Because
//! it depends only on names, a provider can refer to a type before it is
//! registered, and a constructed type (`List<int>`, `int[,]`, `int*`) has a
//! hash before anything materialises it.
//!
//! Each entity kind is seeded with its own domain constant so that a type and
//! a function with the same spelling never collide.
//!
//! # Examples
//!
//! ```
//! use sable_core::TypeHash;
//!
//! let int_hash = TypeHash::from_name("int");
//! assert_eq!(int_hash, TypeHash::from_name("int"));
//!
//! let list = TypeHash::from_name("List");
//! let list_int = TypeHash::from_generic_instance(list, &[int_hash]);
//! assert_ne!(list, list_int);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain seeds mixed into every hash.
pub mod hash_constants {
    /// Separator constant for path components.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for global function hashes
    pub const FUNCTION: u64 = 0x5ea77ffbcdf5f302;

    /// Domain marker for instance and static method hashes
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for user-declared conversion operators
    pub const OPERATOR: u64 = 0x3e9f5d2a8c7b1403;

    /// Domain marker for array types
    pub const ARRAY: u64 = 0x6b2f1e9d4c8a7305;

    /// Domain marker for pointer types
    pub const POINTER: u64 = 0x1d7e3a5c9b2f8046;

    /// Per-position seeds; argument order changes the hash.
    pub const PARAM_MARKERS: [u64; 16] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
        0x7c3e9f2a5b8d1403,
        0x5d8c7b4a3e9f2106,
        0x3f1e9d8c7b5a4203,
        0x1a2b3c4d5e6f7089,
        0x9f8e7d6c5b4a3210,
        0x2468ace013579bdf,
        0xfdb97531eca86420,
        0x123456789abcdef0,
    ];
}

/// A deterministic 64-bit hash identifying a type or function.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Placeholder for "no type".
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Hash of a qualified type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Hash of a free function's name and ordered parameter types.
    #[inline]
    pub fn from_function(name: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::FUNCTION ^ xxh64(name.as_bytes(), 0);
        TypeHash(mix_sequence(seed, param_hashes))
    }

    /// Create a method hash from owner type, method name and parameter type hashes.
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::METHOD ^ owner.0 ^ xxh64(name.as_bytes(), 0);
        TypeHash(mix_sequence(seed, param_hashes))
    }

    /// Create a conversion operator hash.
    ///
    /// Operators are keyed by owner, parameter and result so that an owner can
    /// declare several conversions from the same source.
    #[inline]
    pub fn from_operator(owner: TypeHash, explicit: bool, from: TypeHash, to: TypeHash) -> Self {
        let kind = if explicit { 0x2 } else { 0x1 };
        let seed = hash_constants::OPERATOR ^ owner.0 ^ kind;
        TypeHash(mix_sequence(seed, &[from, to]))
    }

    /// Create a generic instance hash from the definition hash and type argument hashes.
    ///
    /// Type argument order matters - `Map<int, string>` produces a different hash
    /// than `Map<string, int>`.
    #[inline]
    pub fn from_generic_instance(definition: TypeHash, args: &[TypeHash]) -> Self {
        TypeHash(mix_sequence(definition.0, args))
    }

    /// Create an array type hash from element type and rank.
    #[inline]
    pub fn from_array(element: TypeHash, rank: u32) -> Self {
        let seed = hash_constants::ARRAY ^ u64::from(rank);
        TypeHash(mix_sequence(seed, &[element]))
    }

    /// Create a pointer type hash from the pointee type.
    #[inline]
    pub fn from_pointer(pointee: TypeHash) -> Self {
        TypeHash(mix_sequence(hash_constants::POINTER, &[pointee]))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

fn mix_sequence(seed: u64, items: &[TypeHash]) -> u64 {
    let mut hash = seed;
    for (i, item) in items.iter().enumerate() {
        let marker = hash_constants::PARAM_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
        // wrapping_mul keeps the fold order-sensitive
        hash = hash
            .wrapping_mul(hash_constants::SEP)
            .wrapping_add(marker ^ item.0);
    }
    hash
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Well-known constant hashes for primitive types.
///
/// These are pre-computed from `TypeHash::from_name()` so they can be used in
/// `match` patterns.
pub mod primitives {
    use super::TypeHash;

    /// Hash for `void`
    pub const VOID: TypeHash = TypeHash(0xe4b3797ddcf989ea);

    /// Hash for `bool`
    pub const BOOL: TypeHash = TypeHash(0x1e0c8fa4cced99c1);

    /// Hash for `int8`
    pub const INT8: TypeHash = TypeHash(0x2b44191092e74388);

    /// Hash for `int16`
    pub const INT16: TypeHash = TypeHash(0x95aebfc985e9b115);

    /// Hash for `int` (32-bit signed integer)
    pub const INT32: TypeHash = TypeHash(0x4f5e5320cd1c92bf);

    /// Hash for `int64`
    pub const INT64: TypeHash = TypeHash(0x7d6c550df59a1924);

    /// Hash for `uint8`
    pub const UINT8: TypeHash = TypeHash(0x0e8b2d31cdfa9716);

    /// Hash for `uint16`
    pub const UINT16: TypeHash = TypeHash(0x269d68dfde65ae7f);

    /// Hash for `uint` (32-bit unsigned integer)
    pub const UINT32: TypeHash = TypeHash(0x543fb8f520aa3e26);

    /// Hash for `uint64`
    pub const UINT64: TypeHash = TypeHash(0x32ba58d17fda82dd);

    /// Hash for `float`
    pub const FLOAT: TypeHash = TypeHash(0x02d5a2fddaf5bb69);

    /// Hash for `double`
    pub const DOUBLE: TypeHash = TypeHash(0xeb125587f6c2a79b);

    /// Hash for `decimal`
    pub const DECIMAL: TypeHash = TypeHash(0xb4bcec2c3071712b);

    /// Hash for `char`
    pub const CHAR: TypeHash = TypeHash(0x1262f4f62a255c69);

    /// Hash for `nint` (pointer-sized signed integer)
    pub const NINT: TypeHash = TypeHash(0x17dec862456f0ed1);

    /// Hash for the type of the `null` literal
    pub const NULL: TypeHash = TypeHash(0x1165f1b6597b5a46);
}

/// Well-known platform types supplied by the platform-types provider.
pub mod well_known {
    use super::TypeHash;

    /// `object`, the universal root.
    pub const OBJECT: TypeHash = TypeHash(0x7453af4894759ab5);

    /// `ValueType`, the root of all value types.
    pub const VALUE_TYPE: TypeHash = TypeHash(0x5f6b552acd090876);

    /// `Enum`, the root of all enum types.
    pub const ENUM: TypeHash = TypeHash(0xa8f66df95ce7a3ed);

    /// `Array`, the root of all array types.
    pub const ARRAY: TypeHash = TypeHash(0xad4653788f7a1b72);

    /// `Delegate`, the root of all callable types.
    pub const DELEGATE: TypeHash = TypeHash(0xe9fb6293fce21080);

    /// `string`
    pub const STRING: TypeHash = TypeHash(0x7a8d5fb1ba695978);

    /// `Nullable<T>` generic definition.
    pub const NULLABLE: TypeHash = TypeHash(0xd3c46209758d6fa6);

    /// The `T` parameter of `Nullable<T>`.
    pub const NULLABLE_T: TypeHash = TypeHash(0xe7840abd133df2e3);
}
