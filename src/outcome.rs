//! Uniform success/failure envelope threaded between workflow stages.
//!
//! Every stage of the install and update workflows concludes by producing an
//! [`Outcome`]: a human-readable message, an optional detail line, and on
//! failure an optional underlying [`RoboError`]. The orchestrators inspect
//! each stage's outcome before running the next one and surface the message
//! and detail of the first failure unchanged.

use crate::error::RoboError;

/// Result envelope for a workflow stage, generic over the success payload.
///
/// `Outcome<()>` is the payload-less form. Invariants are held by
/// construction: a success always carries a payload and never a cause, a
/// failure never carries a payload.
#[derive(Debug)]
pub enum Outcome<T = ()> {
    Success {
        message: String,
        detail: Option<String>,
        payload: T,
    },
    Failure {
        message: String,
        detail: Option<String>,
        cause: Option<RoboError>,
    },
}

impl<T> Outcome<T> {
    /// Successful outcome with a payload.
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Outcome::Success {
            message: message.into(),
            detail: None,
            payload,
        }
    }

    /// Successful outcome with a payload and a detail line.
    pub fn ok_with(message: impl Into<String>, payload: T, detail: impl Into<String>) -> Self {
        Outcome::Success {
            message: message.into(),
            detail: Some(detail.into()),
            payload,
        }
    }

    /// Failed outcome carrying only a message.
    pub fn fail(message: impl Into<String>) -> Self {
        Outcome::Failure {
            message: message.into(),
            detail: None,
            cause: None,
        }
    }

    /// Failed outcome with an optional detail and an optional underlying error.
    pub fn fail_with(
        message: impl Into<String>,
        detail: Option<String>,
        cause: Option<RoboError>,
    ) -> Self {
        Outcome::Failure {
            message: message.into(),
            detail,
            cause,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success { message, .. } | Outcome::Failure { message, .. } => message,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Outcome::Success { detail, .. } | Outcome::Failure { detail, .. } => detail.as_deref(),
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Outcome::Success { payload, .. } => Some(payload),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            Outcome::Success { payload, .. } => Some(payload),
            Outcome::Failure { .. } => None,
        }
    }

    /// Re-wrap a failure under a different payload type, keeping its message,
    /// detail, and cause untouched. Calling this on a success is a logic
    /// error and degrades to an internal failure rather than panicking.
    pub fn forward_failure<U>(self) -> Outcome<U> {
        match self {
            Outcome::Failure {
                message,
                detail,
                cause,
            } => Outcome::Failure {
                message,
                detail,
                cause,
            },
            Outcome::Success { message, .. } => Outcome::Failure {
                message: format!("stage succeeded but was propagated as a failure: {message}"),
                detail: None,
                cause: Some(RoboError::Internal {
                    message: "forward_failure called on a success".to_string(),
                }),
            },
        }
    }

    /// Process exit code for this outcome: `0` on success, otherwise the
    /// cause's code (or the internal-failure code when no cause was recorded).
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success { .. } => crate::error::exit_codes::SUCCESS,
            Outcome::Failure { cause, .. } => cause
                .as_ref()
                .map_or(crate::error::exit_codes::INTERNAL, RoboError::exit_code),
        }
    }
}
