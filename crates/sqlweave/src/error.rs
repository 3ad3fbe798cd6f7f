//! Error types for sqlweave

use thiserror::Error;

/// Result type alias for template compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// Error types for template compilation.
///
/// Every variant is fatal to the compile call that produced it: there is no
/// partial SQL output and the compiler never retries internally.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Unterminated or otherwise broken placeholder syntax in the format text.
    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    /// A placeholder index has no matching hole expression.
    ///
    /// This indicates a front-end/compiler mismatch and is never expected in
    /// correct usage.
    #[error("Placeholder index {index} out of range: template has {hole_count} hole(s)")]
    OutOfRangeHole { index: usize, hole_count: usize },

    /// A hole expression matched none of the classification rules.
    ///
    /// The classifier is total over its current rule set, so this variant is
    /// unreachable today. It guards against future shape additions leaving a
    /// gap.
    #[error("Hole {index}: unclassifiable reference shape")]
    UnclassifiableShape { index: usize },

    /// The value evaluator could not produce a parameter for a value hole.
    #[error("Hole {index}: parameter evaluation failed: {message}")]
    ParameterEvaluation { index: usize, message: String },
}

impl CompileError {
    /// Create a malformed-template error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedTemplate(message.into())
    }

    /// Create a parameter-evaluation error for a specific hole.
    pub fn evaluation(index: usize, message: impl Into<String>) -> Self {
        Self::ParameterEvaluation {
            index,
            message: message.into(),
        }
    }

    /// Check if this is a malformed-template error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedTemplate(_))
    }

    /// Check if this is an out-of-range hole error.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRangeHole { .. })
    }

    /// Check if this is a parameter-evaluation error.
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Self::ParameterEvaluation { .. })
    }
}
