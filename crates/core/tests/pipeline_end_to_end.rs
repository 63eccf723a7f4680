//! Full runs: JSON model graph in, TypeScript files out.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde_json::json;
use typesync_core::{
    FileCategory, FsEmitter, HttpRenderer, HttpRendererConfig, JsonGraphAnalyzer, LocalRenderer,
    ModelFailure, ModelTranslator, OutputLayout, Pipeline, PipelineError, PipelineOptions,
    PipelineState, RenderError, RetryPolicy, TranslateError, TypeMapper,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_graph(dir: &Path) -> std::path::PathBuf {
    let graph = json!({
        "classes": [
            {
                "name": "UserProfile",
                "baseClass": { "kind": "reference", "name": "BaseEntity", "dependencyKind": "model" },
                "properties": [
                    { "name": "Id", "type": { "kind": "primitive", "name": "int" } },
                    { "name": "DisplayName", "type": { "kind": "primitive", "name": "System.String" } },
                    {
                        "name": "Roles",
                        "type": {
                            "kind": "collection",
                            "element": { "kind": "reference", "name": "Role", "dependencyKind": "enum" }
                        }
                    }
                ]
            },
            {
                "name": "Broken",
                "properties": [
                    { "name": "Handle", "type": { "kind": "pointer" } }
                ]
            }
        ],
        "enums": [
            {
                "name": "Role",
                "members": [
                    { "name": "Admin", "value": "1" },
                    { "name": "Reader" }
                ]
            }
        ],
        "services": [
            {
                "name": "UserService",
                "routePrefix": "/api/users",
                "methods": [
                    {
                        "name": "GetById",
                        "httpMethod": "GET",
                        "returnType": { "kind": "reference", "name": "UserProfile", "dependencyKind": "model" },
                        "parameters": [
                            { "name": "id", "type": { "kind": "primitive", "name": "int" } }
                        ]
                    }
                ]
            }
        ]
    });
    let path = dir.join("graph.json");
    fs::write(&path, serde_json::to_string_pretty(&graph).unwrap()).unwrap();
    path
}

fn translator(root: &Path) -> ModelTranslator {
    ModelTranslator::new(TypeMapper::default(), OutputLayout::new(root))
}

#[tokio::test]
async fn test_local_run_writes_every_valid_model() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let source = write_graph(input.path());

    let mut pipeline = Pipeline::new(
        JsonGraphAnalyzer,
        translator(output.path()),
        LocalRenderer,
        FsEmitter,
        PipelineOptions::default(),
    );
    let report = pipeline.run(&source).await.unwrap();

    assert_eq!(pipeline.state(), PipelineState::Done);
    assert!(!report.is_complete());
    let names: Vec<_> = report.outcomes.iter().map(|o| o.model.name.as_str()).collect();
    assert_eq!(names, ["UserProfile", "Broken", "Role", "UserService"]);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0.name, "Broken");
    assert_eq!(failures[0].0.category, FileCategory::Model);
    assert!(matches!(
        failures[0].1,
        ModelFailure::Translate(TranslateError::UnsupportedTypeKind { .. })
    ));

    let profile =
        fs::read_to_string(output.path().join("models/user-profile.model.ts")).unwrap();
    assert_eq!(
        profile,
        "import { BaseEntity } from \"./base-entity.model\";\n\
         import { Role } from \"../enums/role.enum\";\n\
         \n\
         export class UserProfile extends BaseEntity {\n  \
         id: number;\n  \
         displayName: string;\n  \
         roles: Role[];\n\
         }\n"
    );

    let role = fs::read_to_string(output.path().join("enums/role.enum.ts")).unwrap();
    assert_eq!(role, "export enum Role {\n  Admin = 1,\n  Reader,\n}\n");

    let service =
        fs::read_to_string(output.path().join("services/user-service.service.ts")).unwrap();
    assert!(service.contains("import { UserProfile } from \"../models/user-profile.model\";\n"));
    assert!(service.contains("  getById(id: number): Promise<UserProfile> {\n"));
}

#[tokio::test]
async fn test_http_run_reports_render_failures_per_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate/enum"))
        .respond_with(ResponseTemplate::new(200).set_body_string("export enum Role {}\n"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/generate/class"))
        .and(body_partial_json(json!({ "dataModel": { "name": "UserService" } })))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad service"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/generate/class"))
        .respond_with(ResponseTemplate::new(200).set_body_string("export class X {}\n"))
        .mount(&server)
        .await;

    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let source = write_graph(input.path());

    let renderer = HttpRenderer::new(&HttpRendererConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    let options = PipelineOptions {
        retry: RetryPolicy {
            max_attempts: 2,
            timeout: Duration::from_secs(5),
            retry_delay: Duration::from_millis(10),
        },
        concurrency: 2,
    };
    let mut pipeline = Pipeline::new(
        JsonGraphAnalyzer,
        translator(output.path()),
        renderer,
        FsEmitter,
        options,
    );
    let report = pipeline.run(&source).await.unwrap();

    let failed: Vec<_> = report.failures().map(|(id, _)| id.name.as_str()).collect();
    assert_eq!(failed, ["Broken", "UserService"]);
    assert!(report.failures().any(|(_, failure)| matches!(
        failure,
        ModelFailure::Render(RenderError::Status { .. })
    )));

    let written: Vec<_> = report.succeeded().map(|(_, path)| path.to_path_buf()).collect();
    assert_eq!(
        written,
        [
            output.path().join("models/user-profile.model.ts"),
            output.path().join("enums/role.enum.ts"),
        ]
    );
    assert_eq!(
        fs::read_to_string(&written[1]).unwrap(),
        "export enum Role {}\n"
    );
}

#[tokio::test]
async fn test_unsupported_input_aborts_run() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let source = input.path().join("Models.cs");
    fs::write(&source, "public class A {}").unwrap();

    let mut pipeline = Pipeline::new(
        JsonGraphAnalyzer,
        translator(output.path()),
        LocalRenderer,
        FsEmitter,
        PipelineOptions::default(),
    );
    let err = pipeline.run(&source).await.unwrap_err();

    assert!(matches!(err, PipelineError::Analysis(_)));
    assert_eq!(pipeline.state(), PipelineState::Failed);
    assert!(fs::read_dir(output.path()).unwrap().next().is_none());
}
