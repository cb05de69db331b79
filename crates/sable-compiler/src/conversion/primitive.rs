//! Numeric and enum conversions.
//!
//! The numeric lattice is a fixed table, not a width rule: implicit edges only
//! widen without losing the value's magnitude, every other pair of numeric
//! kinds is explicit. `bool` converts to nothing but itself.

use sable_core::{ConversionKind, PrimitiveKind, TypeHash};

use super::Conversion;
use crate::context::CompilationContext;

/// Entry of the numeric conversion lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericConversion {
    Identity,
    Implicit,
    Explicit,
}

use NumericConversion::{Explicit as E, Identity as S, Implicit as I};

/// Rows are sources, columns targets, both in
/// [`PrimitiveKind::lattice_index`] order:
/// `int8 int16 int int64 uint8 uint16 uint uint64 float double decimal char nint`.
#[rustfmt::skip]
const LATTICE: [[NumericConversion; 13]; 13] = [
    //         i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 dec chr nint
    /* i8   */ [S, I,  I,  I,  E, E,  E,  E,  I,  I,  I,  E,  I],
    /* i16  */ [E, S,  I,  I,  E, E,  E,  E,  I,  I,  I,  E,  I],
    /* i32  */ [E, E,  S,  I,  E, E,  E,  E,  I,  I,  I,  E,  I],
    /* i64  */ [E, E,  E,  S,  E, E,  E,  E,  I,  I,  I,  E,  E],
    /* u8   */ [E, I,  I,  I,  S, I,  I,  I,  I,  I,  I,  E,  I],
    /* u16  */ [E, E,  I,  I,  E, S,  I,  I,  I,  I,  I,  E,  I],
    /* u32  */ [E, E,  E,  I,  E, E,  S,  I,  I,  I,  I,  E,  E],
    /* u64  */ [E, E,  E,  E,  E, E,  E,  S,  I,  I,  I,  E,  E],
    /* f32  */ [E, E,  E,  E,  E, E,  E,  E,  S,  I,  E,  E,  E],
    /* f64  */ [E, E,  E,  E,  E, E,  E,  E,  E,  S,  E,  E,  E],
    /* dec  */ [E, E,  E,  E,  E, E,  E,  E,  E,  E,  S,  E,  E],
    /* char */ [E, E,  I,  I,  E, I,  I,  I,  I,  I,  I,  S,  I],
    /* nint */ [E, E,  E,  I,  E, E,  E,  E,  I,  I,  I,  E,  S],
];

/// Look up the lattice entry for two numeric kinds.
///
/// `None` if either kind is not numeric.
pub fn numeric_conversion(from: PrimitiveKind, to: PrimitiveKind) -> Option<NumericConversion> {
    Some(LATTICE[from.lattice_index()?][to.lattice_index()?])
}

/// Same-rank signed/unsigned preference used by overload betterness:
/// a signed parameter beats any unsigned parameter at least as wide.
pub(crate) fn is_better_signed(a: PrimitiveKind, b: PrimitiveKind) -> bool {
    use PrimitiveKind::*;
    matches!(
        (a, b),
        (Int8, Uint8 | Uint16 | Uint32 | Uint64)
            | (Int16, Uint16 | Uint32 | Uint64)
            | (Int32, Uint32 | Uint64)
            | (Int64, Uint64)
    )
}

/// Numeric lattice and enum conversions between types.
pub(super) fn classify(
    ctx: &CompilationContext<'_>,
    from: TypeHash,
    to: TypeHash,
) -> Option<Conversion> {
    let types = ctx.types();
    let from_kind = types.primitive_kind(from);
    let to_kind = types.primitive_kind(to);

    if let (Some(f), Some(t)) = (from_kind, to_kind) {
        let kind = match numeric_conversion(f, t)? {
            NumericConversion::Identity => ConversionKind::Identity,
            NumericConversion::Implicit => ConversionKind::ImplicitNumeric,
            NumericConversion::Explicit => ConversionKind::ExplicitNumeric,
        };
        return Some(Conversion::standard(kind, to));
    }

    // Enum to enum, and enum to or from any numeric kind, is a cast.
    let numeric_or_enum = |ty: TypeHash, kind: Option<PrimitiveKind>| {
        kind.is_some_and(PrimitiveKind::is_numeric) || types.is_enum(ty)
    };
    if (types.is_enum(from) || types.is_enum(to))
        && numeric_or_enum(from, from_kind)
        && numeric_or_enum(to, to_kind)
    {
        return Some(Conversion::standard(ConversionKind::ExplicitEnumeration, to));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::{ConversionMode, type_exists};
    use crate::test_support::World;

    #[test]
    fn lattice_diagonal_is_identity() {
        for kind in PrimitiveKind::NUMERIC {
            assert_eq!(numeric_conversion(kind, kind), Some(NumericConversion::Identity));
        }
        assert_eq!(numeric_conversion(PrimitiveKind::Bool, PrimitiveKind::Int32), None);
    }

    #[test]
    fn representative_edges() {
        use PrimitiveKind::*;
        assert_eq!(numeric_conversion(Int16, Int32), Some(I));
        assert_eq!(numeric_conversion(Int16, Double), Some(I));
        assert_eq!(numeric_conversion(Int32, Int16), Some(E));
        assert_eq!(numeric_conversion(Int32, Uint32), Some(E));
        assert_eq!(numeric_conversion(Uint8, Int16), Some(I));
        assert_eq!(numeric_conversion(Char, Uint16), Some(I));
        assert_eq!(numeric_conversion(Uint16, Char), Some(E));
        assert_eq!(numeric_conversion(Float, Decimal), Some(E));
        assert_eq!(numeric_conversion(Uint64, Decimal), Some(I));
        assert_eq!(numeric_conversion(Int64, NativeInt), Some(E));
        assert_eq!(numeric_conversion(NativeInt, Int64), Some(I));
    }

    #[test]
    fn implicit_edges_never_leave_the_source_range() {
        for from in PrimitiveKind::NUMERIC {
            for to in PrimitiveKind::NUMERIC {
                if numeric_conversion(from, to) != Some(I) {
                    continue;
                }
                if let (Some((fmin, fmax)), Some((tmin, tmax))) =
                    (from.integral_range(), to.integral_range())
                {
                    assert!(tmin <= fmin && fmax <= tmax, "{from} -> {to}");
                }
            }
        }
    }

    #[test]
    fn lattice_matches_conversion_existence() {
        let world = World::new();
        let ctx = world.ctx();
        for from in PrimitiveKind::NUMERIC {
            for to in PrimitiveKind::NUMERIC {
                let (f, t) = (from.type_hash(), to.type_hash());
                match numeric_conversion(from, to) {
                    Some(I) | Some(S) => {
                        let implicit = type_exists(&ctx, f, t, ConversionMode::Implicit);
                        assert!(implicit, "{from} -> {to}");
                    }
                    Some(E) => {
                        let implicit = type_exists(&ctx, f, t, ConversionMode::Implicit);
                        let explicit = type_exists(&ctx, f, t, ConversionMode::Explicit);
                        assert!(!implicit && explicit, "{from} -> {to}");
                    }
                    None => unreachable!(),
                }
            }
        }
    }

    #[test]
    fn signed_preference_table() {
        use PrimitiveKind::*;
        assert!(is_better_signed(Int8, Uint64));
        assert!(is_better_signed(Int32, Uint32));
        assert!(!is_better_signed(Int32, Uint16));
        assert!(!is_better_signed(Uint32, Int32));
        assert!(!is_better_signed(Int64, Uint32));
    }

    #[test]
    fn enum_conversions_are_casts() {
        let world = World::new();
        let ctx = world.ctx();
        let types = ctx.types();
        assert_eq!(types.underlying_type(world.color), Some(sable_core::primitives::INT32));
        for (from, to) in [
            (world.color, sable_core::primitives::INT32),
            (sable_core::primitives::DOUBLE, world.color),
            (world.color, world.small_enum),
        ] {
            let conversion = classify(&ctx, from, to).unwrap();
            assert_eq!(
                conversion.step,
                crate::conversion::ConversionStep::Standard(ConversionKind::ExplicitEnumeration)
            );
            assert!(!conversion.is_implicit);
        }
        assert!(classify(&ctx, world.color, sable_core::primitives::BOOL).is_none());
    }
}
