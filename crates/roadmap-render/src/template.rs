use std::collections::BTreeSet;

use crate::error::TemplateError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A parsed template element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    /// `{{name}}`
    Placeholder { name: String, line: usize },
    /// `{{#rule}}…{{/rule}}`
    Section {
        rule: String,
        line: usize,
        body: Vec<Node>,
    },
}

/// A validated template. Every region is balanced and every tag is
/// well-formed; rendering cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

#[derive(Debug, PartialEq)]
enum Token {
    Text(String),
    Var(String),
    Open(String),
    Close(String),
}

impl Token {
    fn is_marker(&self) -> bool {
        matches!(self, Token::Open(_) | Token::Close(_))
    }

    fn is_blank(&self) -> bool {
        matches!(self, Token::Text(t) if t.trim().is_empty())
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-'))
}

/// Split one line (with its newline, if any) into tokens.
fn lex_line(text: &str, line: usize) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            tokens.push(Token::Text(rest[..start].to_string()));
        }
        let after = &rest[start + OPEN.len()..];
        let end = after.find(CLOSE).ok_or(TemplateError::Unterminated { line })?;
        let raw = &after[..end];
        let tag = raw.trim();

        let (token, name): (fn(String) -> Token, &str) = if let Some(name) = tag.strip_prefix('#') {
            (Token::Open, name.trim())
        } else if let Some(name) = tag.strip_prefix('/') {
            (Token::Close, name.trim())
        } else {
            (Token::Var, tag)
        };
        if !is_identifier(name) {
            return Err(TemplateError::MalformedTag {
                line,
                tag: raw.to_string(),
            });
        }
        tokens.push(token(name.to_string()));
        rest = &after[end + CLOSE.len()..];
    }
    if !rest.is_empty() {
        tokens.push(Token::Text(rest.to_string()));
    }

    // A line holding nothing but region markers disappears entirely.
    let standalone = tokens.iter().any(Token::is_marker)
        && tokens.iter().all(|t| t.is_marker() || t.is_blank());
    if standalone {
        tokens.retain(Token::is_marker);
    }
    Ok(tokens)
}

struct Frame {
    rule: String,
    line: usize,
    body: Vec<Node>,
}

fn push_node(nodes: &mut Vec<Node>, node: Node) {
    if let (Node::Text(text), Some(Node::Text(previous))) = (&node, nodes.last_mut()) {
        previous.push_str(text);
        return;
    }
    nodes.push(node);
}

impl Template {
    /// Parse and validate a template. Errors carry 1-based line numbers.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut root: Vec<Node> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        for (index, text) in source.split_inclusive('\n').enumerate() {
            let line = index + 1;
            for token in lex_line(text, line)? {
                match token {
                    Token::Text(text) => {
                        let nodes = stack.last_mut().map_or(&mut root, |f| &mut f.body);
                        push_node(nodes, Node::Text(text));
                    }
                    Token::Var(name) => {
                        let nodes = stack.last_mut().map_or(&mut root, |f| &mut f.body);
                        push_node(nodes, Node::Placeholder { name, line });
                    }
                    Token::Open(rule) => stack.push(Frame {
                        rule,
                        line,
                        body: Vec::new(),
                    }),
                    Token::Close(name) => {
                        let frame = stack.pop().ok_or_else(|| TemplateError::UnexpectedClose {
                            line,
                            name: name.clone(),
                        })?;
                        if frame.rule != name {
                            return Err(TemplateError::MismatchedClose {
                                line,
                                expected: frame.rule,
                                found: name,
                                opened_at: frame.line,
                            });
                        }
                        let section = Node::Section {
                            rule: frame.rule,
                            line: frame.line,
                            body: frame.body,
                        };
                        let nodes = stack.last_mut().map_or(&mut root, |f| &mut f.body);
                        push_node(nodes, section);
                    }
                }
            }
        }

        if let Some(frame) = stack.pop() {
            return Err(TemplateError::Unclosed {
                line: frame.line,
                name: frame.rule,
            });
        }

        tracing::debug!(nodes = root.len(), "template parsed");
        Ok(Self { nodes: root })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every region, as `(rule, line)`, in document order.
    pub fn section_refs(&self) -> Vec<(&str, usize)> {
        let mut refs = Vec::new();
        walk(&self.nodes, &mut |node| {
            if let Node::Section { rule, line, .. } = node {
                refs.push((rule.as_str(), *line));
            }
        });
        refs
    }

    /// Every placeholder, as `(name, line)`, in document order.
    pub fn placeholder_refs(&self) -> Vec<(&str, usize)> {
        let mut refs = Vec::new();
        walk(&self.nodes, &mut |node| {
            if let Node::Placeholder { name, line } = node {
                refs.push((name.as_str(), *line));
            }
        });
        refs
    }

    pub fn rule_ids(&self) -> BTreeSet<&str> {
        self.section_refs().into_iter().map(|(rule, _)| rule).collect()
    }

    pub fn placeholders(&self) -> BTreeSet<&str> {
        self.placeholder_refs().into_iter().map(|(name, _)| name).collect()
    }
}

fn walk<'a>(nodes: &'a [Node], visit: &mut impl FnMut(&'a Node)) {
    for node in nodes {
        visit(node);
        if let Node::Section { body, .. } = node {
            walk(body, visit);
        }
    }
}
