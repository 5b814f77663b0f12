use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use biz_service::biz_service::session_service::SessionService;
use common::errors::AppError;
use futures_util::future::{Ready, ready};
use log::warn;
use serde::Deserialize;

pub const SESSION_COOKIE: &str = "session_token";

/// 当前登录用户；取不到会话的请求直接 401
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub token: String,
}

impl CurrentUser {
    /// 交给业务层的调用者身份
    pub fn identity(&self) -> Option<&str> {
        Some(self.email.as_str())
    }
}

/// `Authorization: Bearer <token>` 优先，其次 cookie
fn session_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string());
    bearer.or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
}

fn sessions(req: &HttpRequest) -> Result<&web::Data<SessionService>, AppError> {
    req.app_data::<web::Data<SessionService>>()
        .ok_or_else(|| AppError::Internal("session service not configured".to_string()))
}

fn resolve(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let sessions = sessions(req)?;
    let token = session_token(req).ok_or_else(|| AppError::Unauthorized("login.required".to_string()))?;
    let email = sessions.current_identity(&token).ok_or_else(|| AppError::Unauthorized("login.required".to_string()))?;
    Ok(CurrentUser { email, token })
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

#[derive(Deserialize)]
struct SignatureQuery {
    sig: Option<String>,
}

/// 删除类操作的调用者：除登录外，链接还必须带有本会话签发的签名
#[derive(Debug, Clone)]
pub struct SignedUser(pub CurrentUser);

fn resolve_signed(req: &HttpRequest) -> Result<SignedUser, AppError> {
    let user = resolve(req)?;
    let sessions = sessions(req)?;
    let sig = web::Query::<SignatureQuery>::from_query(req.query_string()).ok().and_then(|q| q.into_inner().sig);
    match sig {
        Some(sig) if sessions.verify_signature(req.path(), &user.token, &sig) => Ok(SignedUser(user)),
        _ => {
            warn!("unsigned or forged link {} from {}", req.path(), user.email);
            Err(AppError::Forbidden)
        }
    }
}

impl FromRequest for SignedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(resolve_signed(req))
    }
}
