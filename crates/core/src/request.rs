//! Generation requests: one translated declaration plus where it goes.
//!
//! The JSON wire format is the renderer's contract: camelCase fields,
//! `{ outputPath, dataModel }`, with class and service declarations sharing
//! the flat class shape (`constructorDef` and `methods` are `null` for plain
//! classes).

use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::error::TranslateError;
use crate::layout::{FileCategory, OutputLayout};
use crate::typescript::{
    ClassAst, Emit, EnumAst, TargetAst, TargetImport, TargetMethod, TargetParameter,
    TargetProperty,
};

/// Translated declaration carried by a request.
pub type DataModel = TargetAst;

/// One unit of work for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Where the rendered file belongs.
    pub output_path: PathBuf,
    /// Category of the generated file.
    pub category: FileCategory,
    /// The declaration to render.
    pub data_model: DataModel,
}

impl GenerationRequest {
    /// Frame a translated declaration, computing its output path from the
    /// declaration's name and category.
    pub fn build(ast: TargetAst, layout: &OutputLayout) -> Result<Self, TranslateError> {
        let category = match &ast {
            TargetAst::Class(ClassAst::Plain(_)) => FileCategory::Model,
            TargetAst::Class(ClassAst::Service(_)) => FileCategory::Service,
            TargetAst::Enum(_) => FileCategory::Enum,
        };
        let output_path = layout.file_path(ast.name(), category)?;
        Ok(Self {
            output_path,
            category,
            data_model: ast,
        })
    }

    /// Name of the declaration.
    pub fn name(&self) -> &str {
        self.data_model.name()
    }

    /// Serialize to the renderer's JSON wire format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for GenerationRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data_model = match &self.data_model {
            TargetAst::Class(class) => DataModelWire::Class(ClassModelWire::from(class)),
            TargetAst::Enum(enumeration) => DataModelWire::Enum(EnumModelWire::from(enumeration)),
        };
        RequestWire {
            output_path: self.output_path.to_string_lossy().replace('\\', "/"),
            data_model,
        }
        .serialize(serializer)
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestWire<'a> {
    output_path: String,
    data_model: DataModelWire<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum DataModelWire<'a> {
    Class(ClassModelWire<'a>),
    Enum(EnumModelWire<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassModelWire<'a> {
    name: &'a str,
    base_class: Option<String>,
    decorators: &'a [String],
    type_parameters: &'a [String],
    imports: Vec<ImportWire<'a>>,
    properties: Vec<PropertyWire<'a>>,
    constructor_def: Option<ConstructorWire<'a>>,
    methods: Option<Vec<MethodWire<'a>>>,
}

impl<'a> From<&'a ClassAst> for ClassModelWire<'a> {
    fn from(class: &'a ClassAst) -> Self {
        match class {
            ClassAst::Plain(plain) => Self {
                name: &plain.name,
                base_class: plain.base_class.as_ref().map(Emit::emit),
                decorators: &plain.decorators,
                type_parameters: &plain.type_parameters,
                imports: plain.imports.iter().map(ImportWire::from).collect(),
                properties: plain.properties.iter().map(PropertyWire::from).collect(),
                constructor_def: None,
                methods: None,
            },
            ClassAst::Service(service) => Self {
                name: &service.name,
                base_class: None,
                decorators: &service.decorators,
                type_parameters: &[],
                imports: service.imports.iter().map(ImportWire::from).collect(),
                properties: service.properties.iter().map(PropertyWire::from).collect(),
                constructor_def: Some(ConstructorWire {
                    parameters: service
                        .constructor
                        .parameters
                        .iter()
                        .map(ParameterWire::from)
                        .collect(),
                }),
                methods: Some(service.methods.iter().map(MethodWire::from).collect()),
            },
        }
    }
}

#[derive(Serialize)]
struct ImportWire<'a> {
    names: &'a [String],
    path: &'a str,
}

impl<'a> From<&'a TargetImport> for ImportWire<'a> {
    fn from(import: &'a TargetImport) -> Self {
        Self {
            names: &import.names,
            path: &import.path,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyWire<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: Option<String>,
    is_private: bool,
    initial_value: Option<&'a str>,
}

impl<'a> From<&'a TargetProperty> for PropertyWire<'a> {
    fn from(property: &'a TargetProperty) -> Self {
        Self {
            name: &property.name,
            ty: property.ty.as_ref().map(Emit::emit),
            is_private: property.is_private,
            initial_value: property.initial_value.as_deref(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParameterWire<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: String,
    is_private: bool,
}

impl<'a> From<&'a TargetParameter> for ParameterWire<'a> {
    fn from(parameter: &'a TargetParameter) -> Self {
        Self {
            name: &parameter.name,
            ty: parameter.ty.emit(),
            is_private: parameter.is_private,
        }
    }
}

#[derive(Serialize)]
struct ConstructorWire<'a> {
    parameters: Vec<ParameterWire<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MethodWire<'a> {
    name: &'a str,
    return_type: String,
    parameters: Vec<ParameterWire<'a>>,
    is_http_service: bool,
    http_method: Option<&'static str>,
}

impl<'a> From<&'a TargetMethod> for MethodWire<'a> {
    fn from(method: &'a TargetMethod) -> Self {
        Self {
            name: &method.name,
            return_type: method.return_type.emit(),
            parameters: method.parameters.iter().map(ParameterWire::from).collect(),
            is_http_service: method.remote.is_some(),
            http_method: method.remote.map(|verb| verb.as_str()),
        }
    }
}

#[derive(Serialize)]
struct EnumModelWire<'a> {
    name: &'a str,
    members: Vec<EnumMemberWire<'a>>,
}

#[derive(Serialize)]
struct EnumMemberWire<'a> {
    name: &'a str,
    value: Option<&'a str>,
}

impl<'a> From<&'a EnumAst> for EnumModelWire<'a> {
    fn from(enumeration: &'a EnumAst) -> Self {
        Self {
            name: &enumeration.name,
            members: enumeration
                .members
                .iter()
                .map(|member| EnumMemberWire {
                    name: &member.name,
                    value: member.value.as_deref(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::source::HttpMethod;
    use crate::typescript::{
        Constructor, EnumMember, PlainClass, ServiceClass, TsPrimitive, TsType,
    };

    #[test]
    fn test_build_paths_per_category() {
        let layout = OutputLayout::new("out");
        let request = GenerationRequest::build(
            TargetAst::Enum(EnumAst {
                name: "OrderStatus".into(),
                members: vec![],
            }),
            &layout,
        )
        .unwrap();
        assert_eq!(request.category, FileCategory::Enum);
        assert_eq!(
            request.output_path,
            PathBuf::from("out/enums/order-status.enum.ts")
        );
    }

    #[test]
    fn test_plain_class_wire_format() {
        let layout = OutputLayout::new("gen");
        let ast = TargetAst::Class(ClassAst::Plain(PlainClass {
            name: "UserProfile".into(),
            base_class: Some(TsType::Ref("BaseEntity".into())),
            decorators: vec![],
            type_parameters: vec![],
            imports: vec![TargetImport {
                names: vec!["Role".into()],
                path: "../enums/role.enum".into(),
            }],
            properties: vec![TargetProperty {
                name: "roles".into(),
                ty: Some(TsType::Array(Box::new(TsType::Ref("Role".into())))),
                is_private: false,
                initial_value: None,
            }],
        }));
        let request = GenerationRequest::build(ast, &layout).unwrap();
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "outputPath": "gen/models/user-profile.model.ts",
                "dataModel": {
                    "name": "UserProfile",
                    "baseClass": "BaseEntity",
                    "decorators": [],
                    "typeParameters": [],
                    "imports": [{ "names": ["Role"], "path": "../enums/role.enum" }],
                    "properties": [{
                        "name": "roles",
                        "type": "Role[]",
                        "isPrivate": false,
                        "initialValue": null
                    }],
                    "constructorDef": null,
                    "methods": null
                }
            })
        );
    }

    #[test]
    fn test_service_wire_format() {
        let layout = OutputLayout::new("gen");
        let ast = TargetAst::Class(ClassAst::Service(ServiceClass {
            name: "UserService".into(),
            decorators: vec!["Injectable".into()],
            imports: vec![],
            properties: vec![TargetProperty {
                name: "baseUrl".into(),
                ty: None,
                is_private: true,
                initial_value: Some("/api/users".into()),
            }],
            constructor: Constructor {
                parameters: vec![TargetParameter {
                    name: "http".into(),
                    ty: TsType::Ref("Http".into()),
                    is_private: true,
                }],
            },
            methods: vec![TargetMethod {
                name: "getById".into(),
                return_type: TsType::Ref("UserProfile".into()),
                parameters: vec![TargetParameter {
                    name: "id".into(),
                    ty: TsType::Primitive(TsPrimitive::Number),
                    is_private: false,
                }],
                remote: Some(HttpMethod::Get),
            }],
        }));
        let request = GenerationRequest::build(ast, &layout).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["outputPath"],
            json!("gen/services/user-service.service.ts")
        );
        let model = &value["dataModel"];
        assert_eq!(model["baseClass"], json!(null));
        assert_eq!(
            model["properties"][0],
            json!({ "name": "baseUrl", "type": null, "isPrivate": true, "initialValue": "/api/users" })
        );
        assert_eq!(
            model["constructorDef"],
            json!({ "parameters": [{ "name": "http", "type": "Http", "isPrivate": true }] })
        );
        assert_eq!(
            model["methods"][0],
            json!({
                "name": "getById",
                "returnType": "UserProfile",
                "parameters": [{ "name": "id", "type": "number", "isPrivate": false }],
                "isHttpService": true,
                "httpMethod": "GET"
            })
        );
    }

    #[test]
    fn test_enum_wire_format() {
        let layout = OutputLayout::new("gen");
        let ast = TargetAst::Enum(EnumAst {
            name: "Status".into(),
            members: vec![
                EnumMember {
                    name: "Active".into(),
                    value: Some("1".into()),
                },
                EnumMember {
                    name: "Inactive".into(),
                    value: None,
                },
            ],
        });
        let request = GenerationRequest::build(ast, &layout).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "outputPath": "gen/enums/status.enum.ts",
                "dataModel": {
                    "name": "Status",
                    "members": [
                        { "name": "Active", "value": "1" },
                        { "name": "Inactive", "value": null }
                    ]
                }
            })
        );
    }
}
