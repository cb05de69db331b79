//! Classification flags for types.

use bitflags::bitflags;

bitflags! {
    /// Classification of a type as seen through the `TypeQuery` capability.
    ///
    /// `VALUE_TYPE` and `REFERENCE_TYPE` are mutually exclusive for concrete
    /// types. A type parameter carries whichever its constraints imply, and
    /// neither when the constraints leave it open.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u16 {
        const PRIMITIVE = 1 << 0;
        const VALUE_TYPE = 1 << 1;
        const REFERENCE_TYPE = 1 << 2;
        const INTERFACE = 1 << 3;
        const SEALED = 1 << 4;
        const GENERIC = 1 << 5;
        const ENUM = 1 << 6;
        const DELEGATE = 1 << 7;
        const TYPE_PARAMETER = 1 << 8;
        const ARRAY = 1 << 9;
        const POINTER = 1 << 10;
        const NULLABLE = 1 << 11;
        const ABSTRACT = 1 << 12;
    }
}

impl TypeFlags {
    /// Whether the flags describe a type with a definite value/reference class.
    pub fn is_classified(self) -> bool {
        self.intersects(TypeFlags::VALUE_TYPE | TypeFlags::REFERENCE_TYPE)
    }
}
