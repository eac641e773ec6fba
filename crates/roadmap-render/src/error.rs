use thiserror::Error;

/// Structural template errors. Any of these makes the template unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("line {line}: '{{{{' is not closed by '}}}}' on the same line")]
    Unterminated { line: usize },

    #[error("line {line}: malformed tag '{{{{{tag}}}}}'")]
    MalformedTag { line: usize, tag: String },

    #[error("line {line}: closing '{name}' has no open region")]
    UnexpectedClose { line: usize, name: String },

    #[error("line {line}: closing '{found}' but '{expected}' (opened on line {opened_at}) is still open")]
    MismatchedClose {
        line: usize,
        expected: String,
        found: String,
        opened_at: usize,
    },

    #[error("line {line}: region '{name}' is never closed")]
    Unclosed { line: usize, name: String },
}
