use crate::result::result;
use actix_web::{HttpResponse, get, web};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(status);
}
#[utoipa::path(
    get,
    path = "/status",
    tag = "common",
    summary = "Get the status of the service",
    responses(
        (status = 200, description = "服务存活")
    )
)]
#[get("/status")]
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(result())
}
