//! Function signatures.
//!
//! `FunctionDef` is the signature capability consumed by overload resolution:
//! ordered parameters, generic arity, containing type, and calling shape.
//! User-declared conversion operators are functions too.

use crate::{ParamMode, TypeHash};

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeHash,
    pub mode: ParamMode,
    /// Final parameter that may absorb trailing arguments into an array.
    pub is_param_array: bool,
    pub has_default: bool,
}

impl Param {
    /// An ordinary by-value parameter.
    pub fn new(name: impl Into<String>, ty: TypeHash) -> Self {
        Self {
            name: name.into(),
            ty,
            mode: ParamMode::Ordinary,
            is_param_array: false,
            has_default: false,
        }
    }

    pub fn with_mode(mut self, mode: ParamMode) -> Self {
        self.mode = mode;
        self
    }

    /// Mark as a parameter array. `ty` must be a rank-1 array type.
    pub fn param_array(mut self) -> Self {
        self.is_param_array = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// What kind of function a definition describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FunctionKind {
    #[default]
    Method,
    Constructor,
    /// `implicit operator`
    ImplicitConversion,
    /// `explicit operator`
    ExplicitConversion,
}

/// A function signature.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub func_hash: TypeHash,
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TypeHash,
    /// Method-level generic parameters (type parameter hashes).
    pub generic_params: Vec<TypeHash>,
    /// Containing type, `None` for free functions.
    pub owner: Option<TypeHash>,
    pub is_static: bool,
    /// Accepts an untyped variable-length argument tail after its parameters.
    pub accepts_extra_args: bool,
    pub kind: FunctionKind,
}

impl FunctionDef {
    /// Create a free function. The hash is derived from name and parameter types.
    pub fn new(name: impl Into<String>, params: Vec<Param>, return_type: TypeHash) -> Self {
        let name = name.into();
        let param_hashes: Vec<_> = params.iter().map(|p| p.ty).collect();
        Self {
            func_hash: TypeHash::from_function(&name, &param_hashes),
            name,
            params,
            return_type,
            generic_params: Vec::new(),
            owner: None,
            is_static: true,
            accepts_extra_args: false,
            kind: FunctionKind::Method,
        }
    }

    /// Create an instance method on `owner`.
    pub fn method(
        owner: TypeHash,
        name: impl Into<String>,
        params: Vec<Param>,
        return_type: TypeHash,
    ) -> Self {
        let name = name.into();
        let param_hashes: Vec<_> = params.iter().map(|p| p.ty).collect();
        Self {
            func_hash: TypeHash::from_method(owner, &name, &param_hashes),
            name,
            params,
            return_type,
            generic_params: Vec::new(),
            owner: Some(owner),
            is_static: false,
            accepts_extra_args: false,
            kind: FunctionKind::Method,
        }
    }

    /// Create a user-declared conversion operator on `owner` from `from` to `to`.
    pub fn conversion_operator(
        owner: TypeHash,
        explicit: bool,
        from: TypeHash,
        to: TypeHash,
    ) -> Self {
        let kind = if explicit {
            FunctionKind::ExplicitConversion
        } else {
            FunctionKind::ImplicitConversion
        };
        let name = if explicit { "op_Explicit" } else { "op_Implicit" };
        Self {
            func_hash: TypeHash::from_operator(owner, explicit, from, to),
            name: name.to_string(),
            params: vec![Param::new("value", from)],
            return_type: to,
            generic_params: Vec::new(),
            owner: Some(owner),
            is_static: true,
            accepts_extra_args: false,
            kind,
        }
    }

    /// Add a method-level generic parameter.
    pub fn with_generic_param(mut self, param: TypeHash) -> Self {
        self.generic_params.push(param);
        self
    }

    /// Accept a variable-length argument tail.
    pub fn with_extra_args(mut self) -> Self {
        self.accepts_extra_args = true;
        self
    }

    /// Make a method static.
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    // === Queries ===

    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    pub fn is_conversion_operator(&self) -> bool {
        matches!(
            self.kind,
            FunctionKind::ImplicitConversion | FunctionKind::ExplicitConversion
        )
    }

    pub fn is_implicit_operator(&self) -> bool {
        self.kind == FunctionKind::ImplicitConversion
    }

    /// The parameter array, if the last parameter is one.
    pub fn param_array(&self) -> Option<&Param> {
        self.params.last().filter(|p| p.is_param_array)
    }

    /// Number of parameters that must be supplied.
    pub fn required_params(&self) -> usize {
        self.params
            .iter()
            .take_while(|p| !p.has_default && !p.is_param_array)
            .count()
    }
}
