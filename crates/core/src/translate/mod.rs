//! Translation from the source model graph to the TypeScript AST.
//!
//! - `type_mapper`: source type descriptors -> TypeScript types
//! - `imports`: referenced types -> merged import entries
//! - `model`: classes, enums and services -> `TargetAst`

mod imports;
mod model;
mod type_mapper;

pub use imports::{ConsumerRole, DependencyResolver, ImportSet};
pub use model::{ModelTranslator, TRANSPORT_IMPORTS};
pub use type_mapper::{DateMapping, MappedType, TypeDependency, TypeMapper, TypeMapperOptions};
