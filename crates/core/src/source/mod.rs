//! Source model graph produced by the C# analyzer.
//!
//! These types mirror the analyzer's JSON output (camelCase field names, type
//! descriptors tagged by `kind`). They are read-only input to translation.

mod analyzer;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use analyzer::{JsonGraphAnalyzer, SourceAnalyzer};

/// Whether a referenced user-defined type is a data model or an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyKind {
    /// A class emitted as a model file.
    Model,
    /// An enumeration emitted as an enum file.
    Enum,
}

/// A type as declared in the source system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SourceType {
    /// Built-in type looked up by name (`int`, `System.String`, ...).
    Primitive {
        /// Keyword or CLR name of the primitive.
        name: String,
    },
    /// `T?` / `Nullable<T>`.
    Nullable {
        /// Wrapped type.
        inner: Box<SourceType>,
    },
    /// Arrays, lists and other enumerables of one element type.
    Collection {
        /// Element type.
        element: Box<SourceType>,
    },
    /// Dictionaries keyed by `key`.
    Dictionary {
        /// Key type.
        key: Box<SourceType>,
        /// Value type.
        value: Box<SourceType>,
    },
    /// User-defined class or enum, optionally with generic arguments.
    #[serde(rename_all = "camelCase")]
    Reference {
        /// Type name, used verbatim on the target side.
        name: String,
        /// Model or enum, drives import resolution.
        dependency_kind: DependencyKind,
        /// Generic arguments in declaration order.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<SourceType>,
    },
    /// A generic type parameter of the enclosing class (`T`).
    TypeParameter {
        /// Parameter name.
        name: String,
    },
    /// Any kind the analyzer emits that has no representation here.
    #[serde(other)]
    Unknown,
}

impl SourceType {
    /// Shorthand for a primitive descriptor.
    pub fn primitive(name: impl Into<String>) -> Self {
        SourceType::Primitive { name: name.into() }
    }

    /// Shorthand for a nullable wrapper.
    pub fn nullable(inner: SourceType) -> Self {
        SourceType::Nullable {
            inner: Box::new(inner),
        }
    }

    /// Shorthand for a collection.
    pub fn collection(element: SourceType) -> Self {
        SourceType::Collection {
            element: Box::new(element),
        }
    }

    /// Shorthand for a non-generic user-defined reference.
    pub fn reference(name: impl Into<String>, dependency_kind: DependencyKind) -> Self {
        SourceType::Reference {
            name: name.into(),
            dependency_kind,
            arguments: Vec::new(),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Primitive { name } | SourceType::TypeParameter { name } => {
                f.write_str(name)
            }
            SourceType::Nullable { inner } => write!(f, "{inner}?"),
            SourceType::Collection { element } => write!(f, "{element}[]"),
            SourceType::Dictionary { key, value } => write!(f, "Dictionary<{key}, {value}>"),
            SourceType::Reference {
                name, arguments, ..
            } => {
                f.write_str(name)?;
                if !arguments.is_empty() {
                    let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            SourceType::Unknown => f.write_str("<unknown>"),
        }
    }
}

/// Reference to a user-defined type listed in a model's explicit imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReference {
    /// Referenced type name.
    pub name: String,
    /// Model or enum.
    pub dependency_kind: DependencyKind,
}

/// A property of a source class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProperty {
    /// Property name in source casing.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: SourceType,
}

/// A data class (DTO).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceClass {
    /// Class name.
    pub name: String,
    /// Base class, if any.
    #[serde(default)]
    pub base_class: Option<SourceType>,
    /// The class's sole generic type parameter, if it is generic.
    #[serde(default)]
    pub type_parameter: Option<String>,
    /// Properties in declaration order.
    #[serde(default)]
    pub properties: Vec<SourceProperty>,
    /// Types the class depends on beyond its property types.
    #[serde(default)]
    pub imports: Vec<TypeReference>,
}

/// One enum member with its literal value as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEnumMember {
    /// Member name.
    pub name: String,
    /// Literal source text of the value, when declared.
    #[serde(default)]
    pub value: Option<String>,
}

/// An enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEnum {
    /// Enum name.
    pub name: String,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<SourceEnumMember>,
}

/// HTTP verb of a service method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    #[serde(alias = "get", alias = "Get")]
    Get,
    /// POST
    #[serde(alias = "post", alias = "Post")]
    Post,
    /// PUT
    #[serde(alias = "put", alias = "Put")]
    Put,
    /// PATCH
    #[serde(alias = "patch", alias = "Patch")]
    Patch,
    /// DELETE
    #[serde(alias = "delete", alias = "Delete")]
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this verb carry a body.
    pub fn has_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A parameter of a service method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceParameter {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: SourceType,
}

/// An action of a service controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMethod {
    /// Method name in source casing.
    pub name: String,
    /// HTTP verb the action answers to.
    pub http_method: HttpMethod,
    /// Declared return type.
    pub return_type: SourceType,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<SourceParameter>,
}

/// A service (API controller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceService {
    /// Service name.
    pub name: String,
    /// Route prefix all actions live under.
    pub route_prefix: String,
    /// Actions in declaration order.
    #[serde(default)]
    pub methods: Vec<SourceMethod>,
    /// Types the service depends on beyond its signatures.
    #[serde(default)]
    pub imports: Vec<TypeReference>,
}

/// One source model, tagged by variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceModel {
    /// Data class.
    Class(SourceClass),
    /// Enumeration.
    Enum(SourceEnum),
    /// HTTP service.
    Service(SourceService),
}

impl SourceModel {
    /// Source name of the model.
    pub fn name(&self) -> &str {
        match self {
            SourceModel::Class(class) => &class.name,
            SourceModel::Enum(enumeration) => &enumeration.name,
            SourceModel::Service(service) => &service.name,
        }
    }
}

/// Everything the analyzer extracted from one source input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceModelGraph {
    /// Data classes.
    #[serde(default)]
    pub classes: Vec<SourceClass>,
    /// Enumerations.
    #[serde(default)]
    pub enums: Vec<SourceEnum>,
    /// Services.
    #[serde(default)]
    pub services: Vec<SourceService>,
}

impl SourceModelGraph {
    /// Number of models in the graph.
    pub fn len(&self) -> usize {
        self.classes.len() + self.enums.len() + self.services.len()
    }

    /// Whether the graph holds no models.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into models: classes, then enums, then services.
    pub fn into_models(self) -> Vec<SourceModel> {
        let mut models = Vec::with_capacity(self.len());
        models.extend(self.classes.into_iter().map(SourceModel::Class));
        models.extend(self.enums.into_iter().map(SourceModel::Enum));
        models.extend(self.services.into_iter().map(SourceModel::Service));
        models
    }
}
