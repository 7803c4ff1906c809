//! Hub error model: an enumerated severity plus an error type.
//!
//! Older representations carry a single `recoverable` flag instead. The flag is
//! the projection `severity != Fatal`; see [`ResourceErrorInfo::is_recoverable`].

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{error, info, Span};

use crate::ParseError;

/// Workflow driver status reported while an error is still expected to clear.
pub const STATUS_RUNNING: &str = "Running";
/// Workflow driver status for errors that may clear on their own.
pub const STATUS_TRANSIENT_CONDITION: &str = "TransientCondition";
/// Workflow driver status for errors that will never clear.
pub const STATUS_ERROR: &str = "Error";

/// How severe an error is. Minor will likely succeed, Major may succeed,
/// and Fatal will never succeed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, JsonSchema)]
pub enum ResourceErrorSeverity {
    #[default]
    Minor,
    Major,
    Fatal,
}

impl ResourceErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceErrorSeverity::Minor => "Minor",
            ResourceErrorSeverity::Major => "Major",
            ResourceErrorSeverity::Fatal => "Fatal",
        }
    }

    /// Map the severity onto a workflow driver status string.
    pub fn to_status(&self) -> &'static str {
        match self {
            ResourceErrorSeverity::Minor => STATUS_RUNNING,
            ResourceErrorSeverity::Major => STATUS_TRANSIENT_CONDITION,
            ResourceErrorSeverity::Fatal => STATUS_ERROR,
        }
    }
}

/// Parse a severity as written by drivers. An empty string means Minor.
pub fn severity_from_str(s: &str) -> Result<ResourceErrorSeverity, ParseError> {
    match s {
        "" | "Minor" => Ok(ResourceErrorSeverity::Minor),
        "Major" => Ok(ResourceErrorSeverity::Major),
        "Fatal" => Ok(ResourceErrorSeverity::Fatal),
        other => Err(ParseError::UnknownSeverity(other.to_string())),
    }
}

/// Whether the fault originates inside the system or from user input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, JsonSchema)]
pub enum ResourceErrorType {
    #[default]
    Internal,
    User,
}

impl ResourceErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceErrorType::Internal => "Internal",
            ResourceErrorType::User => "User",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceErrorInfo {
    /// Optional user facing message if the error is relevant to an end user
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_message: String,

    /// Internal debug message for the error
    #[serde(default)]
    pub debug_message: String,

    #[serde(rename = "type", default)]
    pub error_type: ResourceErrorType,

    #[serde(default)]
    pub severity: ResourceErrorSeverity,
}

impl ResourceErrorInfo {
    /// A Minor, Internal error carrying `debug_message`.
    pub fn new(debug_message: impl Into<String>) -> Self {
        Self {
            user_message: String::new(),
            debug_message: debug_message.into(),
            error_type: ResourceErrorType::Internal,
            severity: ResourceErrorSeverity::Minor,
        }
    }

    /// Set the user message unless a lower layer already set one.
    pub fn with_user_message(mut self, message: impl Into<String>) -> Self {
        if self.user_message.is_empty() {
            self.user_message = message.into();
        }
        self
    }

    /// Wrap `err`. A wrapped `ResourceErrorInfo` hands down its severity, type
    /// and user message.
    pub fn with_error(mut self, err: &(dyn std::error::Error + 'static)) -> Self {
        match err.downcast_ref::<ResourceErrorInfo>() {
            Some(child) => {
                self.severity = child.severity;
                self.user_message = child.user_message.clone();
                self.error_type = child.error_type;
                self.debug_message = if child.debug_message.is_empty() {
                    child.user_message.clone()
                } else {
                    child.debug_message.clone()
                };
            }
            None => self.debug_message = err.to_string(),
        }
        self
    }

    pub fn with_fatal(mut self) -> Self {
        self.severity = ResourceErrorSeverity::Fatal;
        self
    }

    pub fn with_major(mut self) -> Self {
        self.severity = ResourceErrorSeverity::Major;
        self
    }

    pub fn with_minor(mut self) -> Self {
        self.severity = ResourceErrorSeverity::Minor;
        self
    }

    pub fn with_internal(mut self) -> Self {
        self.error_type = ResourceErrorType::Internal;
        self
    }

    pub fn with_user(mut self) -> Self {
        self.error_type = ResourceErrorType::User;
        self
    }

    /// Boolean projection used by representations without a severity.
    pub fn is_recoverable(&self) -> bool { self.severity != ResourceErrorSeverity::Fatal }
}

impl fmt::Display for ResourceErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = if self.debug_message.is_empty() { &self.user_message } else { &self.debug_message };
        write!(f, "{} error: {}", self.error_type.as_str().to_lowercase(), message)
    }
}

impl std::error::Error for ResourceErrorInfo {}

/// Replace the error held in a status `slot`. `None` clears it; anything else
/// is wrapped with [`ResourceErrorInfo::with_error`].
pub fn set_resource_error(slot: &mut Option<ResourceErrorInfo>, err: Option<&(dyn std::error::Error + 'static)>) {
    *slot = err.map(|e| ResourceErrorInfo::new("").with_error(e));
}

/// [`set_resource_error`], then record the error under `span`. Fatal errors are
/// logged at error level, everything else as recoverable.
pub fn set_resource_error_and_log(
    slot: &mut Option<ResourceErrorInfo>,
    err: Option<&(dyn std::error::Error + 'static)>,
    span: &Span,
) {
    set_resource_error(slot, err);
    let Some(err) = err else { return };
    match err.downcast_ref::<ResourceErrorInfo>() {
        Some(child) if child.severity == ResourceErrorSeverity::Fatal => {
            error!(parent: span, error = %err, "fatal error");
        }
        Some(child) => info!(parent: span, severity = child.severity.as_str(), message = %err, "recoverable error"),
        None => info!(parent: span, message = %err, "recoverable error"),
    }
}
