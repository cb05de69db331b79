//! Small classification types shared by entries, queries and the compiler.

mod param_mode;
mod primitive_kind;
mod type_flags;

pub use param_mode::{ParamMode, Variance};
pub use primitive_kind::PrimitiveKind;
pub use type_flags::TypeFlags;
