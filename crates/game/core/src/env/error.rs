//! Errors raised by the external lexicon capability.

/// Failure of an oracle call.
///
/// Oracle failures are never retried or replaced by a fallback inside the
/// engine; they propagate to whoever drives the transition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("lexicon backend is unavailable")]
    Unavailable,

    #[error("lexicon call `{call}` rejected: {reason}")]
    Rejected { call: String, reason: String },
}

impl OracleError {
    pub fn rejected(call: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            call: call.to_owned(),
            reason: reason.into(),
        }
    }
}
