//! Printing the TypeScript IR as source text.
//!
//! Type expressions print the same strings that travel in generation
//! requests. Declarations print complete files for the in-process renderer.

use super::ast::{
    ClassAst, Constructor, EnumAst, PlainClass, ServiceClass, TargetAst, TargetImport,
    TargetMethod, TargetParameter, TargetProperty,
};
use super::types::{TsPrimitive, TsType};

/// Prints an IR node as TypeScript.
pub trait Emit {
    /// TypeScript text of this node.
    fn emit(&self) -> String;
}

/// Escape a string for use in double-quoted TypeScript string literals.
///
/// Line terminators (including U+2028 and U+2029) and other control
/// characters are written as escapes so the literal stays on one line.
pub fn escape_js_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                escaped.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

fn quote(s: &str) -> String {
    format!("\"{}\"", escape_js_string(s))
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Null => "null".to_string(),
            TsPrimitive::Void => "void".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap unions in parentheses so `(T | null)[]` keeps its meaning
                if matches!(**inner, TsType::Union(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types.iter().map(Emit::emit).collect::<Vec<_>>().join(" | "),
            TsType::Record { key, value } => {
                format!("Record<{}, {}>", key.emit(), value.emit())
            }
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, arguments } => {
                let args = arguments.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                format!("{name}<{args}>")
            }
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl Emit for TargetImport {
    fn emit(&self) -> String {
        if self.names.is_empty() {
            format!("import {};\n", quote(&self.path))
        } else {
            format!(
                "import {{ {} }} from {};\n",
                self.names.join(", "),
                quote(&self.path)
            )
        }
    }
}

impl Emit for TargetProperty {
    fn emit(&self) -> String {
        let visibility = if self.is_private { "private " } else { "" };
        let ty = self
            .ty
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();
        let init = self
            .initial_value
            .as_ref()
            .map(|v| format!(" = {}", quote(v)))
            .unwrap_or_default();
        format!("  {visibility}{}{ty}{init};\n", self.name)
    }
}

impl Emit for TargetParameter {
    fn emit(&self) -> String {
        let visibility = if self.is_private { "private " } else { "" };
        format!("{visibility}{}: {}", self.name, self.ty.emit())
    }
}

impl Emit for Constructor {
    fn emit(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(Emit::emit)
            .collect::<Vec<_>>()
            .join(", ");
        format!("  constructor({params}) {{}}\n")
    }
}

impl Emit for TargetMethod {
    fn emit(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(Emit::emit)
            .collect::<Vec<_>>()
            .join(", ");
        let return_type = self.return_type.emit();

        let Some(verb) = self.remote else {
            return format!("  {}({params}): {return_type} {{}}\n", self.name);
        };

        let verb_name = verb.as_str().to_ascii_lowercase();
        let (body, query) = match self.parameters.split_first() {
            Some((first, rest)) if verb.has_body() => (Some(first), rest),
            _ => (None, self.parameters.as_slice()),
        };

        let mut call_args = vec!["this.baseUrl".to_string()];
        if let Some(body) = body {
            call_args.push(format!("JSON.stringify({})", body.name));
        }
        let mut options = Vec::new();
        if body.is_some() {
            options.push("headers: this.jsonHeaders()".to_string());
        }
        if !query.is_empty() {
            let fields = query
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            options.push(format!("params: {{ {fields} }}"));
        }
        if !options.is_empty() {
            call_args.push(format!("{{ {} }}", options.join(", ")));
        }

        let then = if self.return_type == TsType::Primitive(TsPrimitive::Void) {
            "() => undefined".to_string()
        } else {
            format!("(response: Response) => response.json() as {return_type}")
        };

        let mut output = format!(
            "  {}({params}): Promise<{return_type}> {{\n",
            self.name
        );
        output.push_str(&format!(
            "    return this.http\n      .{verb_name}({})\n      .toPromise()\n      .then({then});\n",
            call_args.join(", ")
        ));
        output.push_str("  }\n");
        output
    }
}

/// Module patched with `toPromise` by the generated services.
const TO_PROMISE_MODULE: &str = "rxjs/add/operator/toPromise";

fn emit_header(imports: &[TargetImport], side_effects: &[&str], decorators: &[String]) -> String {
    let mut output = String::new();
    for import in imports {
        output.push_str(&import.emit());
    }
    for module in side_effects {
        output.push_str(&format!("import {};\n", quote(module)));
    }
    if !imports.is_empty() || !side_effects.is_empty() {
        output.push('\n');
    }
    for decorator in decorators {
        output.push_str(&format!("@{decorator}()\n"));
    }
    output
}

impl Emit for PlainClass {
    fn emit(&self) -> String {
        let mut output = emit_header(&self.imports, &[], &self.decorators);

        let type_params = if self.type_parameters.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_parameters.join(", "))
        };
        let extends = self
            .base_class
            .as_ref()
            .map(|base| format!(" extends {}", base.emit()))
            .unwrap_or_default();

        output.push_str(&format!(
            "export class {}{type_params}{extends} {{\n",
            self.name
        ));
        for property in &self.properties {
            output.push_str(&property.emit());
        }
        output.push_str("}\n");
        output
    }
}

impl Emit for ServiceClass {
    fn emit(&self) -> String {
        let mut output = emit_header(&self.imports, &[TO_PROMISE_MODULE], &self.decorators);

        output.push_str(&format!("export class {} {{\n", self.name));
        for property in &self.properties {
            output.push_str(&property.emit());
        }
        output.push('\n');
        output.push_str(&self.constructor.emit());

        if self.methods.iter().any(|m| m.remote.is_some_and(|v| v.has_body())) {
            output.push_str(
                "\n  private jsonHeaders(): Headers {\n    return new Headers({ \"Content-Type\": \"application/json\" });\n  }\n",
            );
        }
        for method in &self.methods {
            output.push('\n');
            output.push_str(&method.emit());
        }
        output.push_str("}\n");
        output
    }
}

impl Emit for ClassAst {
    fn emit(&self) -> String {
        match self {
            ClassAst::Plain(class) => class.emit(),
            ClassAst::Service(service) => service.emit(),
        }
    }
}

impl Emit for EnumAst {
    fn emit(&self) -> String {
        let mut output = format!("export enum {} {{\n", self.name);
        for member in &self.members {
            match &member.value {
                Some(value) => output.push_str(&format!("  {} = {value},\n", member.name)),
                None => output.push_str(&format!("  {},\n", member.name)),
            }
        }
        output.push_str("}\n");
        output
    }
}

impl Emit for TargetAst {
    fn emit(&self) -> String {
        match self {
            TargetAst::Class(class) => class.emit(),
            TargetAst::Enum(enumeration) => enumeration.emit(),
        }
    }
}
