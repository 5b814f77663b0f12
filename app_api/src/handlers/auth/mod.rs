use actix_web::web;

pub mod auth_handler;
mod auth_handler_dto;

pub use auth_handler_dto::*;

pub fn configure(cfg: &mut web::ServiceConfig) {
    auth_handler::configure(cfg);
}
