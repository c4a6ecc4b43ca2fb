//! 应用层错误定义
//!
//! 统一的存储层 / 用例错误类型

use thiserror::Error;

use crate::application::ports::{QuranApiError, ReferenceDataError, StorageError};
use crate::domain::verse::VerseKeyError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 参考数据错误
    #[error("Reference data error: {0}")]
    ReferenceDataError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<QuranApiError> for ApplicationError {
    fn from(err: QuranApiError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<ReferenceDataError> for ApplicationError {
    fn from(err: ReferenceDataError) -> Self {
        Self::ReferenceDataError(err.to_string())
    }
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<VerseKeyError> for ApplicationError {
    fn from(err: VerseKeyError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
