use crate::handlers::auth::auth_handler::*;
use crate::handlers::auth::{LoginReq, LoginResp, RegisterReq, RegisterResp};
use crate::handlers::common_handler::*;
use crate::handlers::contact_handler::*;
use crate::handlers::phone_handler::*;
use actix_web::{HttpResponse, get, web};
use biz_service::dto::contact_dto::{PersonForm, PersonFormView, PersonViewModel};
use biz_service::dto::phone_dto::{PhoneForm, PhoneFormView, PhoneListView, PhoneRow};
use common::errors::AppError;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        //联系人
        index,
        add_contact_form,
        add_contact,
        edit_contact_form,
        edit_contact,
        delete_contact,

        //号码
        edit_phones,
        add_number_form,
        add_number,
        edit_number_form,
        edit_number,
        delete_number,

        //登录
        auth_register,
        auth_login,
        auth_logout,

        status,
    ),
    components(schemas(
        ContactListView,
        PersonViewModel,
        PersonForm,
        PersonFormView,
        PhoneForm,
        PhoneFormView,
        PhoneListView,
        PhoneRow,
        RegisterReq,
        RegisterResp,
        LoginReq,
        LoginResp,
    )),
    tags(
        (name = "contact", description = "联系人"),
        (name = "phone", description = "联系人号码"),
        (name = "auth", description = "注册与登录")
    )
)]
pub struct ApiDoc;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}
#[get("/openapi.json")]
async fn openapi_json() -> Result<HttpResponse, AppError> {
    let body = ApiDoc::openapi().to_json()?;
    Ok(HttpResponse::Ok().content_type("application/json").body(body))
}
