use actix_web::HttpResponse;
use actix_web::http::header;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

pub const URL_INDEX: &str = "/";

pub fn url_edit_phones(person_id: &str) -> String {
    format!("/edit_phones/{}", person_id)
}

pub fn url_delete_contact(person_id: &str) -> String {
    format!("/delete_contact/{}", person_id)
}

pub fn url_delete_number(person_id: &str, phone_id: &str) -> String {
    format!("/delete_number/{}/{}", person_id, phone_id)
}

pub fn result() -> Value {
    serde_json::json!({"success":true})
}

pub fn result_data<T: Serialize + Debug>(data: T) -> Value {
    serde_json::json!({"success":true,"data":data})
}

/// 页面视图：交给前端渲染的命名数据
pub fn page<T: Serialize + Debug>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(result_data(data))
}

/// 303 跳转，表单提交后与静默拒绝共用
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther().insert_header((header::LOCATION, location)).finish()
}
