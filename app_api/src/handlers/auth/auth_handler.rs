use crate::handlers::auth::{LoginReq, LoginResp, RegisterReq, RegisterResp};
use crate::identity::{CurrentUser, SESSION_COOKIE};
use crate::result::{result, result_data};
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpResponse, post, web};
use biz_service::biz_service::session_service::SessionService;
use biz_service::biz_service::user_service::UserService;
use common::errors::AppError;
use log::{info, warn};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth_register);
    cfg.service(auth_login);
    cfg.service(auth_logout);
}

/// 用户注册
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterReq,
    responses(
        (status = 200, description = "注册成功", body = RegisterResp),
        (status = 400, description = "参数格式错误"),
        (status = 409, description = "邮箱已注册")
    )
)]
#[post("/auth/register")]
pub async fn auth_register(dto: web::Json<RegisterReq>, user_service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    dto.validate()?;
    let user = user_service.register(&dto.email, &dto.password).await?;
    Ok(HttpResponse::Ok().json(result_data(RegisterResp { user_id: user.id })))
}

/// 用户登录，token 同时以 Bearer 和 cookie 两种方式可用
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginReq,
    responses(
        (status = 200, description = "登录成功", body = LoginResp),
        (status = 401, description = "登录失败，用户名或密码错误")
    )
)]
#[post("/auth/login")]
pub async fn auth_login(
    dto: web::Json<LoginReq>,
    user_service: web::Data<UserService>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse, AppError> {
    let Some(user) = user_service.verify_login(&dto.email, &dto.password).await? else {
        warn!("login failed for {}", dto.email);
        return Err(AppError::Unauthorized("user.or.password.error".to_string()));
    };
    let session = sessions.create(&user);
    info!("user {} logged in", user.email);
    let cookie = Cookie::build(SESSION_COOKIE, session.token.clone()).path("/").http_only(true).same_site(SameSite::Strict).finish();
    Ok(HttpResponse::Ok().cookie(cookie).json(result_data(LoginResp { token: session.token })))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "已退出"),
        (status = 401, description = "未登录")
    )
)]
#[post("/auth/logout")]
pub async fn auth_logout(user: CurrentUser, sessions: web::Data<SessionService>) -> Result<HttpResponse, AppError> {
    sessions.remove(&user.token);
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    Ok(HttpResponse::Ok().cookie(cookie).json(result()))
}
