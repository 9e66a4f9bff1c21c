//! Bot error types with HTTP status code mapping.
//!
//! [`BotError`] is the central error type. Each variant maps to a numeric
//! code, an HTTP status, and a structured JSON error response so the
//! command surface can show the message to the invoking member.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{GuildId, UserId};
use crate::gateway::ChatError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "the color 'Teal' is not available",
///     "details": "Choose from: Red, Blue"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum covering registry, ledger, splash, and platform failures.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                   |
/// |-----------|-------------------|-------------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request               |
/// | 2000–2999 | State / Not Found | 404 Not Found / 409 Conflict  |
/// | 3000–3999 | Server            | 500 Internal Server Error     |
/// | 4000–4999 | Platform          | 403 Forbidden / 502 Bad Gateway |
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// The guild already has registered color roles.
    #[error("Holi roles already exist in guild {0}; delete them first")]
    AlreadyExists(GuildId),

    /// The guild has no registered color roles to delete.
    #[error("no Holi roles found for guild {0}")]
    NotFound(GuildId),

    /// A splash was requested in a guild with no registered color roles.
    #[error("no Holi roles set up in this guild; an administrator must create the palette first")]
    NoRolesConfigured,

    /// The requested color is not among the guild's registered colors.
    #[error("the color '{requested}' is not available")]
    UnknownColor {
        /// Color name as supplied by the caller.
        requested: String,
        /// Colors the guild has registered.
        choices: Vec<String>,
    },

    /// The platform denied the bot permission for a role operation.
    #[error("missing platform permission: {0}")]
    Forbidden(String),

    /// Any other platform failure.
    #[error("platform error: {0}")]
    ExternalError(String),

    /// Storage layer failure.
    #[error("storage error: {0}")]
    StorageError(String),

    /// A registry record points at a role the platform no longer has.
    #[error("the role for '{0}' was not found; try re-creating the palette")]
    ColorRoleMissing(String),

    /// The splash target is not a member of the guild.
    #[error("member {0} not found in this guild")]
    MemberNotFound(UserId),

    /// The invoking member lacks the administrator permission.
    #[error("member {0} must be a guild administrator to manage the palette")]
    MissingPermission(UserId),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::UnknownColor { .. } => 1002,
            Self::NotFound(_) => 2001,
            Self::MemberNotFound(_) => 2002,
            Self::ColorRoleMissing(_) => 2003,
            Self::AlreadyExists(_) => 2101,
            Self::NoRolesConfigured => 2102,
            Self::Internal(_) => 3000,
            Self::StorageError(_) => 3001,
            Self::Forbidden(_) => 4001,
            Self::ExternalError(_) => 4002,
            Self::MissingPermission(_) => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::UnknownColor { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::MemberNotFound(_) | Self::ColorRoleMissing(_) => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyExists(_) | Self::NoRolesConfigured => StatusCode::CONFLICT,
            Self::StorageError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Forbidden(_) | Self::MissingPermission(_) => StatusCode::FORBIDDEN,
            Self::ExternalError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Extra text shown under the message, if any.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::UnknownColor { choices, .. } => {
                Some(format!("Choose from: {}", choices.join(", ")))
            }
            _ => None,
        }
    }
}

impl From<ChatError> for BotError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Forbidden(msg) => Self::Forbidden(msg),
            other => Self::ExternalError(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for BotError {
    fn from(err: sqlx::Error) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
