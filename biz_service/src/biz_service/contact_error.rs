use crate::dto::{FormErrors, form_errors};
use common::errors::AppError;
use thiserror::Error;
use validator::ValidationErrors;

/// 联系人/号码生命周期的错误
///
/// `Denied` 同时代表“记录不存在”和“不是本人的记录”，对外表现一致（静默重定向）。
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("record not found or not owned by caller")]
    Denied,
    #[error("validation failed: {0:?}")]
    Validation(FormErrors),
    #[error(transparent)]
    App(#[from] AppError),
}

impl From<ValidationErrors> for ContactError {
    fn from(e: ValidationErrors) -> Self {
        ContactError::Validation(form_errors(&e))
    }
}
