//! Unified error codes for the Scentopia core engine
//!
//! Error codes are shared between the engine and every adapter layer
//! (kiosk frontends, back office, bottling stations). They are organized
//! by category:
//! - 0xxx: General errors
//! - 1xxx: Access code errors
//! - 2xxx: Scoring errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Access codes ====================
    /// Access code not found
    CodeNotFound = 1001,
    /// Access code has expired
    CodeExpired = 1002,
    /// Access code usage cap reached
    CodeExhausted = 1003,
    /// Access code already redeemed (legacy terminal state)
    CodeAlreadyUsed = 1004,
    /// Access code is in a non-redeemable state
    CodeWrongState = 1005,
    /// Code generation failed after collision retries
    CodeGenerationFailed = 1006,

    // ==================== 2xxx: Scoring ====================
    /// Rescale target is malformed (e.g. negative)
    InvalidRescaleTarget = 2001,
    /// Avatar catalog contains conflicting family sets
    AvatarCatalogConflict = 2002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage error (persistence collaborator failed)
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Access codes
            ErrorCode::CodeNotFound => "Access code not found",
            ErrorCode::CodeExpired => "Access code has expired",
            ErrorCode::CodeExhausted => "Access code usage cap reached",
            ErrorCode::CodeAlreadyUsed => "Access code has already been used",
            ErrorCode::CodeWrongState => "Access code is not redeemable in its current state",
            ErrorCode::CodeGenerationFailed => "Failed to generate a unique access code",

            // Scoring
            ErrorCode::InvalidRescaleTarget => "Rescale target is invalid",
            ErrorCode::AvatarCatalogConflict => "Avatar catalog contains conflicting family sets",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.code(), self.message())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::RequiredField,
            7 => ErrorCode::ValueOutOfRange,
            1001 => ErrorCode::CodeNotFound,
            1002 => ErrorCode::CodeExpired,
            1003 => ErrorCode::CodeExhausted,
            1004 => ErrorCode::CodeAlreadyUsed,
            1005 => ErrorCode::CodeWrongState,
            1006 => ErrorCode::CodeGenerationFailed,
            2001 => ErrorCode::InvalidRescaleTarget,
            2002 => ErrorCode::AvatarCatalogConflict,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::StorageError,
            9003 => ErrorCode::ConfigError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::CodeExpired.code(), 1002);
        assert_eq!(ErrorCode::InvalidRescaleTarget.code(), 2001);
        assert_eq!(ErrorCode::StorageError.code(), 9002);
    }

    #[test]
    fn test_round_trip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::CodeNotFound,
            ErrorCode::CodeExhausted,
            ErrorCode::InvalidRescaleTarget,
            ErrorCode::InternalError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert_eq!(ErrorCode::try_from(555), Err(InvalidErrorCode(555)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::CodeExpired).unwrap();
        assert_eq!(json, "1002");

        let code: ErrorCode = serde_json::from_str("1003").unwrap();
        assert_eq!(code, ErrorCode::CodeExhausted);
    }
}
