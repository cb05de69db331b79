//! The "more specific type" relation.
//!
//! A concrete type is more specific than a type parameter. Arrays, pointers
//! and instances of the same generic definition compare component-wise: all
//! components must agree and at least one must be strictly more specific.
//! Overload tie-breaking and user-defined operator selection both use it.

use sable_core::TypeHash;

use crate::context::CompilationContext;

/// Outcome of comparing two types (or two type lists) by specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Specificity {
    Same,
    /// The first is more specific.
    More,
    /// The first is less specific.
    Less,
    Incomparable,
}

impl Specificity {
    /// Combine two component comparisons.
    pub fn and(self, other: Specificity) -> Specificity {
        use Specificity::*;
        match (self, other) {
            (Same, x) | (x, Same) => x,
            (More, More) => More,
            (Less, Less) => Less,
            _ => Incomparable,
        }
    }

    pub fn reverse(self) -> Specificity {
        match self {
            Specificity::More => Specificity::Less,
            Specificity::Less => Specificity::More,
            other => other,
        }
    }
}

/// Compare `a` against `b`.
pub fn compare_specificity(ctx: &CompilationContext<'_>, a: TypeHash, b: TypeHash) -> Specificity {
    if a == b {
        return Specificity::Same;
    }
    let types = ctx.types();
    match (types.is_type_param(a), types.is_type_param(b)) {
        (true, true) => return Specificity::Same,
        (false, true) => return Specificity::More,
        (true, false) => return Specificity::Less,
        (false, false) => {}
    }

    if let (Some((ea, ra)), Some((eb, rb))) = (types.array_element(a), types.array_element(b)) {
        return if ra == rb {
            compare_specificity(ctx, ea, eb)
        } else {
            Specificity::Incomparable
        };
    }
    if let (Some(pa), Some(pb)) = (types.pointee(a), types.pointee(b)) {
        return compare_specificity(ctx, pa, pb);
    }
    match (types.generic_definition(a), types.generic_definition(b)) {
        (Some(da), Some(db)) if da == db => {
            compare_lists(ctx, &types.generic_args(a), &types.generic_args(b))
        }
        _ => Specificity::Incomparable,
    }
}

/// Compare two equally long type lists position by position.
pub(crate) fn compare_lists(
    ctx: &CompilationContext<'_>,
    a: &[TypeHash],
    b: &[TypeHash],
) -> Specificity {
    if a.len() != b.len() {
        return Specificity::Incomparable;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| compare_specificity(ctx, *x, *y))
        .try_fold(Specificity::Same, |acc, next| match acc.and(next) {
            Specificity::Incomparable => None,
            combined => Some(combined),
        })
        .unwrap_or(Specificity::Incomparable)
}
