//! Unified definition error type used by parsing, lint and canvas diagnostics.
//!
//! Field-value failures are not errors: they are reported through
//! [`crate::validate::ValidationResult`]. This type only describes problems
//! with the definitions themselves (fields, steps, workflows, canvases).

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Definition,
    Canvas,
    Chain,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Definition => write!(f, "Definition"),
            Phase::Canvas => write!(f, "Canvas"),
            Phase::Chain => write!(f, "Chain"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{phase}:{code}] {message}{}", subject_suffix(.subject))]
pub struct DefinitionError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    /// Id of the field, step, node or workflow the error is about.
    pub subject: Option<String>,
}

fn subject_suffix(subject: &Option<String>) -> String {
    match subject {
        Some(id) => format!(" ('{}')", id),
        None => String::new(),
    }
}

impl DefinitionError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        DefinitionError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            subject: None,
        }
    }

    pub fn definition(code: &str, message: impl Into<String>, subject: Option<String>) -> Self {
        DefinitionError {
            code: code.into(),
            phase: Phase::Definition,
            message: message.into(),
            subject,
        }
    }

    pub fn canvas(code: &str, message: impl Into<String>, subject: Option<String>) -> Self {
        DefinitionError {
            code: code.into(),
            phase: Phase::Canvas,
            message: message.into(),
            subject,
        }
    }

    pub fn chain(code: &str, message: impl Into<String>, subject: Option<String>) -> Self {
        DefinitionError {
            code: code.into(),
            phase: Phase::Chain,
            message: message.into(),
            subject,
        }
    }
}
