//! TypeScript declarations produced by model translation.
//!
//! A plain data class and an HTTP service share most of their shape but not
//! all of it, so `ClassAst` is a sum type: only services carry a constructor
//! and remote methods, only plain classes carry a base class and type
//! parameters.

use super::types::TsType;
use crate::source::HttpMethod;

/// `import { A, B } from "path";`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetImport {
    /// Imported names, unique, in first-seen order.
    pub names: Vec<String>,
    /// Module path.
    pub path: String,
}

/// Class property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProperty {
    /// Name in target casing.
    pub name: String,
    /// Declared type; `None` when inferred from the initializer.
    pub ty: Option<TsType>,
    /// Whether the property is `private`.
    pub is_private: bool,
    /// String literal the property is initialised with.
    pub initial_value: Option<String>,
}

/// Method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TsType,
    /// Constructor parameter property visibility (`private http: Http`).
    pub is_private: bool,
}

/// Class method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMethod {
    /// Name in target casing.
    pub name: String,
    /// Return type of the remote call's payload.
    pub return_type: TsType,
    /// Parameters in declaration order.
    pub parameters: Vec<TargetParameter>,
    /// HTTP verb when the method is a remote call.
    pub remote: Option<HttpMethod>,
}

/// Synthesized constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    /// Parameters in order.
    pub parameters: Vec<TargetParameter>,
}

/// Plain data class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainClass {
    /// Class name, unchanged from the source.
    pub name: String,
    /// Base class, unchanged from the source.
    pub base_class: Option<TsType>,
    /// Decorator expressions without the `@`.
    pub decorators: Vec<String>,
    /// Generic type parameters, verbatim.
    pub type_parameters: Vec<String>,
    /// Merged imports.
    pub imports: Vec<TargetImport>,
    /// Properties in declaration order.
    pub properties: Vec<TargetProperty>,
}

/// HTTP service class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceClass {
    /// Class name, unchanged from the source.
    pub name: String,
    /// Decorator expressions without the `@`.
    pub decorators: Vec<String>,
    /// Transport imports followed by resolved model imports, merged.
    pub imports: Vec<TargetImport>,
    /// Synthesized properties (`baseUrl`).
    pub properties: Vec<TargetProperty>,
    /// Synthesized constructor taking the transport.
    pub constructor: Constructor,
    /// Remote methods in declaration order.
    pub methods: Vec<TargetMethod>,
}

/// Translated class: plain data class or HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassAst {
    /// Data class.
    Plain(PlainClass),
    /// HTTP service.
    Service(ServiceClass),
}

impl ClassAst {
    /// Class name.
    pub fn name(&self) -> &str {
        match self {
            ClassAst::Plain(class) => &class.name,
            ClassAst::Service(service) => &service.name,
        }
    }

    /// Merged import list.
    pub fn imports(&self) -> &[TargetImport] {
        match self {
            ClassAst::Plain(class) => &class.imports,
            ClassAst::Service(service) => &service.imports,
        }
    }

    /// Properties in order.
    pub fn properties(&self) -> &[TargetProperty] {
        match self {
            ClassAst::Plain(class) => &class.properties,
            ClassAst::Service(service) => &service.properties,
        }
    }
}

/// Enum member with its opaque literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// Member name, unchanged from the source.
    pub name: String,
    /// Literal value text, when declared.
    pub value: Option<String>,
}

/// Translated enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumAst {
    /// Enum name, unchanged from the source.
    pub name: String,
    /// Members in declaration order.
    pub members: Vec<EnumMember>,
}

/// Output of translating one source model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAst {
    /// Plain class or service.
    Class(ClassAst),
    /// Enumeration.
    Enum(EnumAst),
}

impl TargetAst {
    /// Declared name.
    pub fn name(&self) -> &str {
        match self {
            TargetAst::Class(class) => class.name(),
            TargetAst::Enum(enumeration) => &enumeration.name,
        }
    }
}
