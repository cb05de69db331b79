//! Parameter passing modes and generic variance.

use std::fmt::{self, Display, Formatter};

/// How an argument is passed to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamMode {
    /// Passed by value.
    #[default]
    Ordinary,
    /// Read-only reference; accepts ordinary arguments too.
    In,
    /// Write-only reference.
    Out,
    /// Read-write reference.
    Ref,
}

impl ParamMode {
    /// Whether a parameter of this mode accepts an argument passed with `arg`.
    pub fn accepts(self, arg: ParamMode) -> bool {
        match self {
            ParamMode::In => matches!(arg, ParamMode::Ordinary | ParamMode::In),
            _ => self == arg,
        }
    }

    /// By-reference slots require the argument type to match exactly.
    pub fn requires_identity(self) -> bool {
        matches!(self, ParamMode::Out | ParamMode::Ref)
    }
}

impl Display for ParamMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParamMode::Ordinary => Ok(()),
            ParamMode::In => write!(f, "in"),
            ParamMode::Out => write!(f, "out"),
            ParamMode::Ref => write!(f, "ref"),
        }
    }
}

/// Declared variance of a generic parameter of an interface or callable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variance {
    #[default]
    Invariant,
    /// `out T`
    Covariant,
    /// `in T`
    Contravariant,
}
