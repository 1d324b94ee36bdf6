//! Access code lifecycle
//!
//! Codes are generated at booking time, verified and redeemed at the
//! bottling stations, and swept into the expired state by a periodic
//! back-office job. The service owns the state machine; persistence sits
//! behind [`AccessCodeStore`].

mod daily;
mod generator;
mod service;
mod storage;

pub use daily::DailyAccessCode;
pub use generator::generate_code_token;
pub use service::AccessCodeService;
pub use storage::{AccessCodeStore, MemoryAccessCodeStore, StoreError};

use shared::error::{AppError, ErrorCode};
use shared::models::CodeStatus;
use thiserror::Error;

/// Access code domain errors
#[derive(Debug, Error)]
pub enum CodeError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("access code not found: {0}")]
    NotFound(String),

    #[error("access code has expired")]
    Expired,

    #[error("access code usage cap reached")]
    Exhausted,

    #[error("access code has already been used")]
    AlreadyUsed,

    #[error("access code is not redeemable while {0}")]
    WrongState(CodeStatus),

    #[error("failed to generate a unique code after {0} attempts")]
    Generation(u32),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for CodeError {
    fn from(err: StoreError) -> Self {
        CodeError::Storage(err.to_string())
    }
}

impl From<CodeError> for AppError {
    fn from(err: CodeError) -> Self {
        let code = match &err {
            CodeError::Validation(_) => ErrorCode::ValidationFailed,
            CodeError::NotFound(_) => ErrorCode::CodeNotFound,
            CodeError::Expired => ErrorCode::CodeExpired,
            CodeError::Exhausted => ErrorCode::CodeExhausted,
            CodeError::AlreadyUsed => ErrorCode::CodeAlreadyUsed,
            CodeError::WrongState(_) => ErrorCode::CodeWrongState,
            CodeError::Generation(_) => ErrorCode::CodeGenerationFailed,
            CodeError::Storage(_) => ErrorCode::StorageError,
        };
        AppError::with_message(code, err.to_string())
    }
}
