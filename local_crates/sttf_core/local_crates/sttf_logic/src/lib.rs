mod core;
mod errors;
mod expr;
mod model;

pub use crate::core::Literal;
pub use crate::core::VarId;

pub use errors::LogicError;

pub use expr::Expr;

pub use model::ClauseStatus;
pub use model::Model;
