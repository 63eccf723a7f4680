//! Source models to TypeScript declarations.

use std::collections::HashMap;

use tracing::trace;

use super::imports::{ConsumerRole, DependencyResolver, ImportSet};
use super::type_mapper::{TypeDependency, TypeMapper};
use crate::error::{NamingError, TranslateError};
use crate::layout::OutputLayout;
use crate::naming::{TS_RESERVED_WORDS, is_valid_identifier, to_property_case};
use crate::source::{SourceClass, SourceEnum, SourceModel, SourceService, SourceType};
use crate::typescript::{
    ClassAst, Constructor, EnumAst, EnumMember, PlainClass, ServiceClass, TargetAst, TargetImport,
    TargetMethod, TargetParameter, TargetProperty, TsType,
};

/// Imports every generated service starts with: (names, module path).
pub const TRANSPORT_IMPORTS: &[(&[&str], &str)] = &[
    (&["Injectable"], "@angular/core"),
    (&["Headers", "Http", "Response"], "@angular/http"),
];

/// Decorator applied to every generated service.
const SERVICE_DECORATOR: &str = "Injectable";

/// The transport dependency injected into every service: (name, type).
const TRANSPORT_PARAMETER: (&str, &str) = ("http", "Http");

/// Name of the synthesized property holding the route prefix.
const BASE_URL_PROPERTY: &str = "baseUrl";

/// Translates one source model at a time into a TypeScript declaration.
///
/// Holds only read-only state; share one translator across threads.
#[derive(Debug, Clone)]
pub struct ModelTranslator {
    mapper: TypeMapper,
    layout: OutputLayout,
}

impl ModelTranslator {
    /// Translator resolving imports against `layout`.
    pub fn new(mapper: TypeMapper, layout: OutputLayout) -> Self {
        Self { mapper, layout }
    }

    /// The output layout imports are resolved against.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Translate a model, selecting the output variant by the model's tag.
    pub fn translate(&self, model: &SourceModel) -> Result<TargetAst, TranslateError> {
        match model {
            SourceModel::Class(class) => self.translate_class(class).map(TargetAst::Class),
            SourceModel::Enum(enumeration) => Self::translate_enum(enumeration).map(TargetAst::Enum),
            SourceModel::Service(service) => self.translate_service(service).map(TargetAst::Class),
        }
    }

    /// Translate a data class.
    pub fn translate_class(&self, class: &SourceClass) -> Result<ClassAst, TranslateError> {
        check_type_name(&class.name)?;
        let mut dependencies = Vec::new();

        let base_class = match &class.base_class {
            Some(base @ SourceType::Reference { .. }) => {
                let mapped = self.mapper.map_type(base)?;
                dependencies.extend(mapped.dependencies);
                Some(mapped.ty)
            }
            Some(other) => {
                return Err(TranslateError::UnsupportedTypeKind {
                    kind: format!("base class {other}"),
                });
            }
            None => None,
        };

        let mut members = MemberNames::default();
        let mut properties = Vec::with_capacity(class.properties.len());
        for property in &class.properties {
            let mapped = self.mapper.map_type(&property.ty)?;
            dependencies.extend(mapped.dependencies);
            properties.push(TargetProperty {
                name: members.convert(&property.name)?,
                ty: Some(mapped.ty),
                is_private: false,
                initial_value: None,
            });
        }
        dependencies.extend(class.imports.iter().map(TypeDependency::from));

        let type_parameters: Vec<String> = class.type_parameter.iter().cloned().collect();
        let mut imports = ImportSet::new();
        self.resolve_into(
            &mut imports,
            &class.name,
            &type_parameters,
            dependencies,
            ConsumerRole::Class,
        )?;

        trace!(class = %class.name, imports = imports.len(), "Class translated.");
        Ok(ClassAst::Plain(PlainClass {
            name: class.name.clone(),
            base_class,
            decorators: Vec::new(),
            type_parameters,
            imports: imports.into_imports(),
            properties,
        }))
    }

    /// Translate a service into a class with an injected transport, a
    /// `baseUrl` property and one remote method per action.
    pub fn translate_service(&self, service: &SourceService) -> Result<ClassAst, TranslateError> {
        check_type_name(&service.name)?;
        let mut dependencies = Vec::new();

        let (transport_name, transport_type) = TRANSPORT_PARAMETER;
        let mut members = MemberNames::default();
        members.reserve(BASE_URL_PROPERTY)?;
        members.reserve(transport_name)?;

        let mut methods = Vec::with_capacity(service.methods.len());
        for method in &service.methods {
            let name = members.convert(&method.name)?;
            let return_type = self.mapper.map_type(&method.return_type)?;
            dependencies.extend(return_type.dependencies);

            let mut parameter_names = MemberNames::default();
            let mut parameters = Vec::with_capacity(method.parameters.len());
            for parameter in &method.parameters {
                let mapped = self.mapper.map_type(&parameter.ty)?;
                dependencies.extend(mapped.dependencies);
                parameters.push(TargetParameter {
                    name: parameter_names.convert(&parameter.name)?,
                    ty: mapped.ty,
                    is_private: false,
                });
            }

            methods.push(TargetMethod {
                name,
                return_type: return_type.ty,
                parameters,
                remote: Some(method.http_method),
            });
        }
        dependencies.extend(service.imports.iter().map(TypeDependency::from));

        let mut imports = ImportSet::new();
        imports.extend(TRANSPORT_IMPORTS.iter().map(|(names, path)| TargetImport {
            names: names.iter().map(|n| (*n).to_string()).collect(),
            path: (*path).to_string(),
        }));
        self.resolve_into(
            &mut imports,
            &service.name,
            &[],
            dependencies,
            ConsumerRole::Service,
        )?;

        trace!(service = %service.name, methods = methods.len(), "Service translated.");
        Ok(ClassAst::Service(ServiceClass {
            name: service.name.clone(),
            decorators: vec![SERVICE_DECORATOR.to_string()],
            imports: imports.into_imports(),
            properties: vec![TargetProperty {
                name: BASE_URL_PROPERTY.to_string(),
                ty: None,
                is_private: true,
                initial_value: Some(service.route_prefix.clone()),
            }],
            constructor: Constructor {
                parameters: vec![TargetParameter {
                    name: transport_name.to_string(),
                    ty: TsType::Ref(transport_type.to_string()),
                    is_private: true,
                }],
            },
            methods,
        }))
    }

    /// Translate an enumeration. Member names and values are copied as-is;
    /// member names must be distinct valid identifiers.
    pub fn translate_enum(enumeration: &SourceEnum) -> Result<EnumAst, TranslateError> {
        check_type_name(&enumeration.name)?;
        let mut seen = MemberNames::default();
        let mut members = Vec::with_capacity(enumeration.members.len());
        for member in &enumeration.members {
            if !is_valid_identifier(&member.name) {
                return Err(NamingError::InvalidIdentifier(member.name.clone()).into());
            }
            seen.claim(&member.name, member.name.clone())?;
            members.push(EnumMember {
                name: member.name.clone(),
                value: member.value.clone(),
            });
        }
        Ok(EnumAst {
            name: enumeration.name.clone(),
            members,
        })
    }

    /// Resolve dependencies into `imports`, skipping self references and the
    /// consumer's own type parameters.
    fn resolve_into(
        &self,
        imports: &mut ImportSet,
        consumer_name: &str,
        type_parameters: &[String],
        dependencies: Vec<TypeDependency>,
        role: ConsumerRole,
    ) -> Result<(), TranslateError> {
        let resolver = DependencyResolver::new(&self.layout);
        for dependency in dependencies {
            if dependency.name == consumer_name || type_parameters.contains(&dependency.name) {
                continue;
            }
            imports.insert(resolver.resolve_import(&dependency.name, dependency.kind, role)?);
        }
        Ok(())
    }
}

/// Converted member names of one scope, each mapped to the source name that
/// produced it.
#[derive(Debug, Default)]
struct MemberNames {
    claimed: HashMap<String, String>,
}

impl MemberNames {
    /// Claim a synthesized name that source members must not convert to.
    fn reserve(&mut self, name: &str) -> Result<(), NamingError> {
        self.claim(name, name.to_string())
    }

    /// Convert `source` to property case and claim the result.
    fn convert(&mut self, source: &str) -> Result<String, NamingError> {
        let converted = to_property_case(source)?;
        self.claim(source, converted.clone())?;
        Ok(converted)
    }

    fn claim(&mut self, source: &str, converted: String) -> Result<(), NamingError> {
        if let Some(first) = self.claimed.get(&converted) {
            return Err(NamingError::Collision {
                first: first.clone(),
                second: source.to_string(),
                converted,
            });
        }
        self.claimed.insert(converted, source.to_string());
        Ok(())
    }
}

fn check_type_name(name: &str) -> Result<(), TranslateError> {
    if name.is_empty() {
        return Err(NamingError::EmptyIdentifier.into());
    }
    if !is_valid_identifier(name) {
        return Err(NamingError::InvalidIdentifier(name.to_string()).into());
    }
    if TS_RESERVED_WORDS.contains(name) {
        return Err(NamingError::ReservedWord(name.to_string()).into());
    }
    Ok(())
}
