//! TypeScript IR for code generation.
//!
//! - `types`: type expressions (`TsType`, `TsPrimitive`)
//! - `ast`: declarations produced by translation (`ClassAst`, `EnumAst`)
//! - `emit`: AST -> TypeScript source text via the `Emit` trait

mod ast;
mod emit;
mod types;

pub use ast::{
    ClassAst, Constructor, EnumAst, EnumMember, PlainClass, ServiceClass, TargetAst, TargetImport,
    TargetMethod, TargetParameter, TargetProperty,
};
pub use emit::{Emit, escape_js_string};
pub use types::{TsPrimitive, TsType};
