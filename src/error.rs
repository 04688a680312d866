use thiserror::Error;

/// Errors surfaced by condition evaluation in strict mode.
///
/// Lenient evaluation never produces these; a missing context role there
/// resolves as a non-match instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("{condition} needs a source object, but none is bound")]
    MissingSource { condition: &'static str },

    #[error("{condition} needs a target object, but none is bound")]
    MissingTarget { condition: &'static str },

    #[error("{condition} needs a root candidate, but none is bound")]
    MissingRootCandidate { condition: &'static str },

    #[error("{condition} was matched without a local candidate")]
    MissingLocalCandidate { condition: &'static str },
}

impl EvalError {
    /// Name of the condition node that raised the error.
    pub fn condition(&self) -> &'static str {
        match self {
            EvalError::MissingSource { condition }
            | EvalError::MissingTarget { condition }
            | EvalError::MissingRootCandidate { condition }
            | EvalError::MissingLocalCandidate { condition } => condition,
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;
