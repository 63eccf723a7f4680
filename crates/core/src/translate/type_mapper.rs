//! Source type descriptors to TypeScript types.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::error::TranslateError;
use crate::source::{DependencyKind, SourceType, TypeReference};
use crate::typescript::{TsPrimitive, TsType};

/// How date/time primitives are represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMapping {
    /// The built-in `Date` type.
    #[default]
    Date,
    /// ISO strings as sent over JSON.
    String,
}

/// Type mapping settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeMapperOptions {
    /// Representation of `DateTime`, `DateTimeOffset` and `DateOnly`.
    pub date: DateMapping,
}

#[derive(Debug, Clone, Copy)]
enum PrimitiveMapping {
    Fixed(TsPrimitive),
    DateTime,
}

/// C# primitives by keyword and CLR name (the `System.` prefix is stripped
/// before lookup).
static PRIMITIVE_TYPES: LazyLock<HashMap<&'static str, PrimitiveMapping>> = LazyLock::new(|| {
    use PrimitiveMapping::{DateTime, Fixed};

    [
        ("byte", Fixed(TsPrimitive::Number)),
        ("Byte", Fixed(TsPrimitive::Number)),
        ("sbyte", Fixed(TsPrimitive::Number)),
        ("SByte", Fixed(TsPrimitive::Number)),
        ("short", Fixed(TsPrimitive::Number)),
        ("Int16", Fixed(TsPrimitive::Number)),
        ("ushort", Fixed(TsPrimitive::Number)),
        ("UInt16", Fixed(TsPrimitive::Number)),
        ("int", Fixed(TsPrimitive::Number)),
        ("Int32", Fixed(TsPrimitive::Number)),
        ("uint", Fixed(TsPrimitive::Number)),
        ("UInt32", Fixed(TsPrimitive::Number)),
        ("long", Fixed(TsPrimitive::Number)),
        ("Int64", Fixed(TsPrimitive::Number)),
        ("ulong", Fixed(TsPrimitive::Number)),
        ("UInt64", Fixed(TsPrimitive::Number)),
        ("float", Fixed(TsPrimitive::Number)),
        ("Single", Fixed(TsPrimitive::Number)),
        ("double", Fixed(TsPrimitive::Number)),
        ("Double", Fixed(TsPrimitive::Number)),
        ("decimal", Fixed(TsPrimitive::Number)),
        ("Decimal", Fixed(TsPrimitive::Number)),
        ("bool", Fixed(TsPrimitive::Boolean)),
        ("Boolean", Fixed(TsPrimitive::Boolean)),
        ("string", Fixed(TsPrimitive::String)),
        ("String", Fixed(TsPrimitive::String)),
        ("char", Fixed(TsPrimitive::String)),
        ("Char", Fixed(TsPrimitive::String)),
        ("Guid", Fixed(TsPrimitive::String)),
        ("TimeSpan", Fixed(TsPrimitive::String)),
        ("void", Fixed(TsPrimitive::Void)),
        ("Void", Fixed(TsPrimitive::Void)),
        ("DateTime", DateTime),
        ("DateTimeOffset", DateTime),
        ("DateOnly", DateTime),
    ]
    .into_iter()
    .collect()
});

/// A user-defined type a mapped type refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDependency {
    /// Referenced type name.
    pub name: String,
    /// Model or enum.
    pub kind: DependencyKind,
}

impl From<&TypeReference> for TypeDependency {
    fn from(reference: &TypeReference) -> Self {
        Self {
            name: reference.name.clone(),
            kind: reference.dependency_kind,
        }
    }
}

/// Result of mapping one source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// The TypeScript type.
    pub ty: TsType,
    /// User-defined types referenced anywhere inside it, in order.
    pub dependencies: Vec<TypeDependency>,
}

/// Maps source type descriptors to TypeScript types.
///
/// Reads only the shared primitive table, so one mapper serves any number of
/// translations concurrently.
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    options: TypeMapperOptions,
}

impl TypeMapper {
    /// Create a mapper with the given options.
    pub fn new(options: TypeMapperOptions) -> Self {
        Self { options }
    }

    /// Map a source type, collecting the user-defined types it references.
    ///
    /// Wrappers are applied in declared order, so `List<int?>` becomes
    /// `(number | null)[]` while `List<int>?` becomes `number[] | null`.
    pub fn map_type(&self, source: &SourceType) -> Result<MappedType, TranslateError> {
        let mut dependencies = Vec::new();
        let ty = self.map_into(source, &mut dependencies)?;
        Ok(MappedType { ty, dependencies })
    }

    fn map_into(
        &self,
        source: &SourceType,
        dependencies: &mut Vec<TypeDependency>,
    ) -> Result<TsType, TranslateError> {
        match source {
            SourceType::Primitive { name } => self.map_primitive(name),
            SourceType::Nullable { inner } => Ok(self.map_into(inner, dependencies)?.or_null()),
            SourceType::Collection { element } => Ok(TsType::Array(Box::new(
                self.map_into(element, dependencies)?,
            ))),
            SourceType::Dictionary { key, value } => Ok(TsType::Record {
                key: Box::new(self.map_into(key, dependencies)?),
                value: Box::new(self.map_into(value, dependencies)?),
            }),
            SourceType::Reference {
                name,
                dependency_kind,
                arguments,
            } => {
                dependencies.push(TypeDependency {
                    name: name.clone(),
                    kind: *dependency_kind,
                });
                if arguments.is_empty() {
                    return Ok(TsType::Ref(name.clone()));
                }
                let arguments = arguments
                    .iter()
                    .map(|argument| self.map_into(argument, dependencies))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TsType::Generic {
                    name: name.clone(),
                    arguments,
                })
            }
            SourceType::TypeParameter { name } => Ok(TsType::Ref(name.clone())),
            SourceType::Unknown => Err(TranslateError::UnsupportedTypeKind {
                kind: source.to_string(),
            }),
        }
    }

    fn map_primitive(&self, name: &str) -> Result<TsType, TranslateError> {
        let key = name.strip_prefix("System.").unwrap_or(name);
        match PRIMITIVE_TYPES.get(key) {
            Some(PrimitiveMapping::Fixed(primitive)) => Ok(TsType::Primitive(*primitive)),
            Some(PrimitiveMapping::DateTime) => Ok(match self.options.date {
                DateMapping::Date => TsType::Ref("Date".to_string()),
                DateMapping::String => TsType::Primitive(TsPrimitive::String),
            }),
            None => Err(TranslateError::UnsupportedTypeKind {
                kind: format!("primitive {name}"),
            }),
        }
    }
}
