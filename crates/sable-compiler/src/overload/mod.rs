//! Overload resolution for function calls.
//!
//! This module selects the single best candidate for a call site from a set
//! of candidate signatures and the call's arguments.
//!
//! ## Algorithm
//!
//! 1. Eligibility, per candidate: argument count (trailing defaults, a
//!    parameter array or an extra-argument tail), argument modes, generic
//!    inference, and an implicit conversion for every argument. The expanded
//!    parameter-array form is only tried when the normal form fails.
//! 2. Betterness, per pair of eligible candidates: argument-wise comparison
//!    of conversions, then the tie-break cascade.
//! 3. A single fold over the eligible candidates in enumeration order keeps a
//!    running best and a tie-set.
//!
//! The outcome is [`OverloadResult::Resolved`], [`OverloadResult::NoMatch`]
//! or [`OverloadResult::Ambiguous`]; resolution never fails any other way,
//! so callers can resolve speculatively.

mod applicability;
mod ranking;
pub mod specificity;

use rustc_hash::FxHashSet;
use sable_core::{Expr, OverloadError, ParamMode, TypeHash};
use tracing::debug;

use crate::context::CompilationContext;
use applicability::Applicable;
use ranking::Selection;

/// A call-site argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub expr: Expr,
    /// How the argument is passed (`ref x`, `out x`, ...).
    pub mode: ParamMode,
}

impl Argument {
    /// An ordinary by-value argument.
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            mode: ParamMode::Ordinary,
        }
    }

    pub fn with_mode(expr: Expr, mode: ParamMode) -> Self {
        Self { expr, mode }
    }
}

impl From<Expr> for Argument {
    fn from(expr: Expr) -> Self {
        Self::new(expr)
    }
}

/// How strictly candidates are tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Full eligibility, ranking and tie-breaking.
    #[default]
    Strict,
    /// Only argument count and modes are checked, and resolution succeeds
    /// only if exactly one candidate passes. For best-effort matching.
    ArgumentCountOnly,
}

/// Which form of a candidate was applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicableForm {
    /// Arguments map one-to-one onto parameters.
    Normal,
    /// Trailing arguments are collected into the parameter array.
    Expanded,
}

/// Result of successful overload resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OverloadMatch {
    /// The selected function hash.
    pub func_hash: TypeHash,
    pub form: ApplicableForm,
    /// Inferred generic arguments, in declaration order. Empty for
    /// non-generic functions.
    pub inferred: Vec<TypeHash>,
    /// Parameter type each argument was matched against, after generic
    /// substitution and parameter-array expansion.
    pub param_types: Vec<TypeHash>,
    /// Return type after generic substitution.
    pub return_type: TypeHash,
    /// The arguments converted to `param_types`. In
    /// [`ResolveMode::ArgumentCountOnly`] arguments without a conversion are
    /// left as they were.
    pub converted_args: Vec<Expr>,
}

/// Outcome of overload resolution. The three outcomes stay distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum OverloadResult {
    Resolved(OverloadMatch),
    /// No candidate is applicable.
    NoMatch,
    /// Several applicable candidates and none better than all others; the
    /// running best first, then the tie-set.
    Ambiguous(Vec<TypeHash>),
}

impl OverloadResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, OverloadResult::Resolved(_))
    }

    /// The selected function, if resolved.
    pub fn func_hash(&self) -> Option<TypeHash> {
        match self {
            OverloadResult::Resolved(found) => Some(found.func_hash),
            _ => None,
        }
    }

    /// Convert to a `Result` for callers that propagate with `?`.
    pub fn into_result(self) -> Result<OverloadMatch, OverloadError> {
        match self {
            OverloadResult::Resolved(found) => Ok(found),
            OverloadResult::NoMatch => Err(OverloadError::NoMatch),
            OverloadResult::Ambiguous(candidates) => Err(OverloadError::Ambiguous { candidates }),
        }
    }
}

/// Resolve an overloaded call.
///
/// # Arguments
///
/// * `ctx` - Compilation context for type lookups
/// * `candidates` - Function hashes to consider, in enumeration order
/// * `args` - The call's arguments
///
/// The same candidates, arguments and order always give the same result.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn resolve_overload(
    ctx: &CompilationContext<'_>,
    candidates: &[TypeHash],
    args: &[Argument],
) -> OverloadResult {
    resolve_overload_with(ctx, candidates, args, ResolveMode::Strict)
}

/// Resolve an overloaded call with an explicit [`ResolveMode`].
pub fn resolve_overload_with(
    ctx: &CompilationContext<'_>,
    candidates: &[TypeHash],
    args: &[Argument],
    mode: ResolveMode,
) -> OverloadResult {
    let mut seen = FxHashSet::default();
    let applicable: Vec<Applicable> = candidates
        .iter()
        .filter(|hash| seen.insert(**hash))
        .filter_map(|hash| applicability::check(ctx, *hash, args, mode))
        .collect();

    let result = match mode {
        ResolveMode::ArgumentCountOnly => {
            let mut applicable = applicable;
            match (applicable.pop(), applicable.is_empty()) {
                (Some(only), true) => OverloadResult::Resolved(only.into_match(args)),
                _ => OverloadResult::NoMatch,
            }
        }
        ResolveMode::Strict => match ranking::select(ctx, args, applicable) {
            Selection::Best(best) => OverloadResult::Resolved(best.into_match(args)),
            Selection::Ambiguous(tied) => OverloadResult::Ambiguous(tied),
            Selection::Empty => OverloadResult::NoMatch,
        },
    };

    match &result {
        OverloadResult::Resolved(found) => {
            debug!(func = %found.func_hash, form = ?found.form, ?mode, "overload resolved");
        }
        OverloadResult::NoMatch => {
            debug!(candidates = candidates.len(), ?mode, "no applicable overload")
        }
        OverloadResult::Ambiguous(tied) => debug!(?tied, "ambiguous overload"),
    }
    result
}
