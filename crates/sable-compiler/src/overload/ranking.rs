//! Betterness between applicable candidates and the selection fold.

use std::cmp::Ordering;

use sable_core::TypeHash;
use tracing::trace;

use super::{ApplicableForm, Argument};
use super::applicability::Applicable;
use super::specificity::{Specificity, compare_lists};
use crate::context::CompilationContext;
use crate::conversion::primitive::is_better_signed;
use crate::conversion::{Conversion, ConversionMode, ConversionRank, type_exists};

/// Outcome of the selection fold.
pub(super) enum Selection {
    Best(Applicable),
    /// Best first, then the tie-set.
    Ambiguous(Vec<TypeHash>),
    Empty,
}

/// Fold the applicable candidates into a running best and a tie-set.
pub(super) fn select(
    ctx: &CompilationContext<'_>,
    args: &[Argument],
    applicable: Vec<Applicable>,
) -> Selection {
    let mut candidates = applicable.into_iter();
    let Some(mut best) = candidates.next() else {
        return Selection::Empty;
    };
    let mut tied: Vec<Applicable> = Vec::new();

    for candidate in candidates {
        match compare(ctx, args, &candidate, &best) {
            Ordering::Greater => {
                tied.retain(|t| compare(ctx, args, &candidate, t) != Ordering::Greater);
                best = candidate;
            }
            Ordering::Less => {}
            Ordering::Equal => tied.push(candidate),
        }
    }

    if tied.is_empty() {
        Selection::Best(best)
    } else {
        let mut hashes = vec![best.func_hash()];
        hashes.extend(tied.iter().map(Applicable::func_hash));
        Selection::Ambiguous(hashes)
    }
}

/// `Greater` if `a` is better than `b`, `Equal` if neither is.
fn compare(
    ctx: &CompilationContext<'_>,
    args: &[Argument],
    a: &Applicable,
    b: &Applicable,
) -> Ordering {
    let (mut a_better, mut b_better) = (false, false);
    for (i, arg) in args.iter().enumerate() {
        let position = compare_position(
            ctx,
            arg,
            (a.param_types[i], a.conversions[i].as_ref()),
            (b.param_types[i], b.conversions[i].as_ref()),
        );
        trace!(
            a = %a.func_hash(),
            b = %b.func_hash(),
            position = i,
            ?position,
            "compared argument conversions"
        );
        match position {
            Ordering::Greater => a_better = true,
            Ordering::Less => b_better = true,
            Ordering::Equal => {}
        }
    }
    match (a_better, b_better) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // Each wins somewhere: no tie-break applies.
        (true, true) => Ordering::Equal,
        (false, false) => tie_break(ctx, a, b),
    }
}

/// Compare the conversions of one argument to two parameter types.
fn compare_position(
    ctx: &CompilationContext<'_>,
    arg: &Argument,
    (pa, ca): (TypeHash, Option<&Conversion>),
    (pb, cb): (TypeHash, Option<&Conversion>),
) -> Ordering {
    if pa == pb {
        return Ordering::Equal;
    }

    // An untyped literal has no preferred type of its own.
    let polymorphic = arg.expr.is_polymorphic_constant();
    if !polymorphic {
        if arg.expr.ty == pa {
            return Ordering::Greater;
        }
        if arg.expr.ty == pb {
            return Ordering::Less;
        }
    }

    let types = ctx.types();
    if let (Some(ka), Some(kb)) = (types.primitive_kind(pa), types.primitive_kind(pb)) {
        if is_better_signed(ka, kb) {
            return Ordering::Greater;
        }
        if is_better_signed(kb, ka) {
            return Ordering::Less;
        }
    }

    let rank = |c: Option<&Conversion>| {
        let rank = c.map_or(ConversionRank::Identity, Conversion::rank);
        if polymorphic && rank == ConversionRank::Identity {
            ConversionRank::Widening
        } else {
            rank
        }
    };
    match rank(cb).cmp(&rank(ca)) {
        Ordering::Equal => {}
        better => return better,
    }

    // Prefer the parameter type that converts implicitly to the other.
    let a_to_b = type_exists(ctx, pa, pb, ConversionMode::Implicit);
    let b_to_a = type_exists(ctx, pb, pa, ConversionMode::Implicit);
    match (a_to_b, b_to_a) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// The cascade used when no argument position tells the candidates apart.
fn tie_break(ctx: &CompilationContext<'_>, a: &Applicable, b: &Applicable) -> Ordering {
    // Non-generic beats generic.
    match (a.func.is_generic(), b.func.is_generic()) {
        (false, true) => return Ordering::Greater,
        (true, false) => return Ordering::Less,
        _ => {}
    }

    // Normal form beats expanded form.
    if a.form != b.form {
        return if a.form == ApplicableForm::Normal {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    match compare_lists(ctx, &a.declared_types, &b.declared_types) {
        Specificity::More => return Ordering::Greater,
        Specificity::Less => return Ordering::Less,
        Specificity::Same | Specificity::Incomparable => {}
    }

    derived_owner(ctx, a, b)
}

/// Between signatures that match exactly, the one declared in the more
/// derived type wins.
fn derived_owner(ctx: &CompilationContext<'_>, a: &Applicable, b: &Applicable) -> Ordering {
    let same_signature = a.func.params.len() == b.func.params.len()
        && a
            .func
            .params
            .iter()
            .zip(&b.func.params)
            .all(|(x, y)| x.ty == y.ty && x.mode == y.mode);
    let (Some(owner_a), Some(owner_b)) = (a.func.owner, b.func.owner) else {
        return Ordering::Equal;
    };
    if !same_signature {
        return Ordering::Equal;
    }
    let types = ctx.types();
    if types.is_subclass_of(owner_a, owner_b) {
        Ordering::Greater
    } else if types.is_subclass_of(owner_b, owner_a) {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}
