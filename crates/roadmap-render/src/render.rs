use std::collections::BTreeMap;

use roadmap_core::models::diagnostic::{DiagnosticCode, Diagnostics};
use serde::Serialize;

use crate::template::{Node, Template};

/// Flags and substitutions a template is rendered against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    pub flags: BTreeMap<String, bool>,
    pub substitutions: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_flag(&mut self, rule: impl Into<String>, value: bool) {
        self.flags.insert(rule.into(), value);
    }

    pub fn substitute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.substitutions.insert(name.into(), value.into());
    }

    /// `None` when no rule of that name was evaluated.
    pub fn flag(&self, rule: &str) -> Option<bool> {
        self.flags.get(rule).copied()
    }

    pub fn substitution(&self, name: &str) -> Option<&str> {
        self.substitutions.get(name).map(String::as_str)
    }
}

/// Render `template` in one left-to-right pass.
///
/// Regions whose flag is false are skipped without being visited, so
/// nothing inside them produces diagnostics. A region naming an unknown
/// rule is skipped with `UNKNOWN_RULE_ID`; a placeholder with no value
/// renders as nothing with `MISSING_PLACEHOLDER`.
///
/// Output never contains `{{`: a brace that would complete one, whether
/// inside a substituted value or where a value meets the text around it,
/// is preceded by a space.
pub fn render(template: &Template, context: &RenderContext, diagnostics: &mut Diagnostics) -> String {
    let mut out = String::new();
    render_nodes(template.nodes(), context, diagnostics, &mut out);
    out
}

fn render_nodes(nodes: &[Node], context: &RenderContext, diagnostics: &mut Diagnostics, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => push_text(out, text),
            Node::Placeholder { name, line } => match context.substitution(name) {
                Some(value) => push_text(out, value),
                None => diagnostics.push(
                    DiagnosticCode::MissingPlaceholder,
                    format!("line {line}: no value for '{name}'"),
                ),
            },
            Node::Section { rule, line, body } => match context.flag(rule) {
                Some(true) => render_nodes(body, context, diagnostics, out),
                Some(false) => {}
                None => diagnostics.push(
                    DiagnosticCode::UnknownRuleId,
                    format!("line {line}: region names unknown rule '{rule}'"),
                ),
            },
        }
    }
}

fn push_text(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '{' && out.ends_with('{') {
            out.push(' ');
        }
        out.push(c);
    }
}
