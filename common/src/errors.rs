use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use mongodb::bson;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use serde::Serialize;
use std::io;
use thiserror::Error;
/// HTTP 错误响应结构
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    message: String,
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    // ==== 常规业务错误 ====
    #[error("Bad request: {0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized(String),

    #[error("Forbidden access")]
    Forbidden,

    #[error("Conflict: resource already exists")]
    Conflict,

    // ==== 系统错误 ====
    #[error("MongoDB error: {0}")]
    Mongo(MongoError),
    #[error("BSON encode error: {0}")]
    BsonSer(#[from] bson::ser::Error),
    #[error("BSON decode error: {0}")]
    BsonDe(#[from] bson::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Internal server error")]
    Internal(String),
}
/// 唯一索引冲突的服务端错误码
const DUPLICATE_KEY: i32 = 11000;

pub fn is_duplicate_key(e: &MongoError) -> bool {
    matches!(e.kind.as_ref(), ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY)
}

/// 唯一索引冲突统一映射为 `Conflict`，其余保持为系统错误
impl From<MongoError> for AppError {
    fn from(e: MongoError) -> Self {
        if is_duplicate_key(&e) { AppError::Conflict } else { AppError::Mongo(e) }
    }
}
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let msg = match self {
            AppError::Unauthorized(msg) => msg.to_string(),
            AppError::Validation(_) | AppError::Forbidden | AppError::Conflict => self.to_string(),
            e => {
                error!("{:?}", e);
                "Service error".to_string()
            }
        };

        HttpResponse::build(status).json(ErrorResponse { code: status.as_u16(), message: msg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use mongodb::error::WriteError;

    fn write_error(code: i32) -> MongoError {
        let we: WriteError = bson::from_document(doc! { "code": code, "errmsg": "write failed" }).unwrap();
        MongoError::from(ErrorKind::Write(WriteFailure::WriteError(we)))
    }

    #[test]
    fn duplicate_key_becomes_conflict() {
        assert!(matches!(AppError::from(write_error(11000)), AppError::Conflict));
        let other = AppError::from(write_error(121));
        assert!(matches!(other, AppError::Mongo(_)));
        assert_eq!(other.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn system_errors_are_masked() {
        let resp = AppError::Internal("disk on fire".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn business_errors_keep_their_status() {
        assert_eq!(AppError::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Unauthorized("login.required".to_string()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }
}
