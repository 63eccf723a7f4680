//! In-process renderer.

use tracing::trace;

use super::Renderer;
use crate::error::RenderError;
use crate::request::GenerationRequest;
use crate::typescript::Emit;

/// Renders by printing the AST with the `Emit` trait. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRenderer;

impl Renderer for LocalRenderer {
    async fn render(&self, request: &GenerationRequest) -> Result<String, RenderError> {
        let text = request.data_model.emit();
        trace!(model = %request.name(), bytes = text.len(), "Rendered in-process.");
        Ok(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::layout::OutputLayout;
    use crate::source::{DependencyKind, HttpMethod, SourceMethod, SourceParameter, SourceService, SourceType};
    use crate::translate::{ModelTranslator, TypeMapper};
    use crate::typescript::TargetAst;

    #[tokio::test]
    async fn test_renders_service_file() {
        let translator = ModelTranslator::new(TypeMapper::default(), OutputLayout::new("out"));
        let service = SourceService {
            name: "UserService".into(),
            route_prefix: "/api/users".into(),
            methods: vec![SourceMethod {
                name: "Save".into(),
                http_method: HttpMethod::Post,
                return_type: SourceType::primitive("void"),
                parameters: vec![SourceParameter {
                    name: "profile".into(),
                    ty: SourceType::reference("UserProfile", DependencyKind::Model),
                }],
            }],
            imports: vec![],
        };
        let ast = translator.translate_service(&service).unwrap();
        let request =
            GenerationRequest::build(TargetAst::Class(ast), translator.layout()).unwrap();

        let text = LocalRenderer.render(&request).await.unwrap();
        assert!(text.starts_with(
            "import { Injectable } from \"@angular/core\";\n\
             import { Headers, Http, Response } from \"@angular/http\";\n\
             import { UserProfile } from \"../models/user-profile.model\";\n"
        ));
        assert!(text.contains("@Injectable()\n"));
        assert!(text.contains("export class UserService {\n"));
        assert!(text.contains("  private baseUrl = \"/api/users\";\n"));
        assert!(text.contains("  constructor(private http: Http) {}\n"));
        assert!(text.contains("  save(profile: UserProfile): Promise<void> {\n"));
        assert!(text.contains("private jsonHeaders(): Headers"));
    }
}
