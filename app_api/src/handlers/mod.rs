pub mod auth;
pub mod common_handler;
pub mod contact_handler;
pub mod phone_handler;
pub mod swagger;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    common_handler::configure(cfg);
    swagger::configure(cfg);
    auth::configure(cfg);
    contact_handler::configure(cfg);
    phone_handler::configure(cfg);
}
