use crate::identity::{CurrentUser, SignedUser};
use crate::result::{URL_INDEX, page, redirect, url_delete_number, url_edit_phones};
use actix_web::{HttpResponse, get, post, web};
use biz_service::biz_service::contact_error::ContactError;
use biz_service::biz_service::phone_service::{PhoneDeletion, PhoneService};
use biz_service::biz_service::session_service::SessionService;
use biz_service::dto::phone_dto::{PhoneForm, PhoneFormView, PhoneListView};
use common::errors::AppError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(edit_phones);
    cfg.service(add_number_form);
    cfg.service(add_number);
    cfg.service(edit_number_form);
    cfg.service(edit_number);
    cfg.service(delete_number);
}

/// 渲染号码表单；拒绝时跳回联系人列表
fn form_page(view: Result<PhoneFormView, ContactError>) -> Result<HttpResponse, AppError> {
    match view {
        Ok(view) => Ok(page(view)),
        Err(ContactError::App(e)) => Err(e),
        Err(_) => Ok(redirect(URL_INDEX)),
    }
}

/// 某联系人的号码列表
#[utoipa::path(
    get,
    path = "/edit_phones/{person_id}",
    tag = "phone",
    params(("person_id" = String, Path, description = "联系人 ID")),
    responses(
        (status = 200, description = "号码列表及联系人信息", body = PhoneListView),
        (status = 303, description = "不存在或无权限，跳回列表")
    )
)]
#[get("/edit_phones/{person_id}")]
pub async fn edit_phones(
    user: CurrentUser,
    person_id: web::Path<String>,
    phone_service: web::Data<PhoneService>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse, AppError> {
    match phone_service.list_phones(&person_id, user.identity()).await {
        Ok(mut view) => {
            for row in view.rows.iter_mut() {
                row.delete_url = sessions.signed_url(&url_delete_number(&view.person_id, &row.id), &user.token);
            }
            Ok(page(view))
        }
        Err(ContactError::App(e)) => Err(e),
        Err(_) => Ok(redirect(URL_INDEX)),
    }
}

#[utoipa::path(
    get,
    path = "/add_number/{person_id}",
    tag = "phone",
    params(("person_id" = String, Path, description = "联系人 ID")),
    responses(
        (status = 200, description = "空白号码表单", body = PhoneFormView),
        (status = 303, description = "不存在或无权限，跳回列表")
    )
)]
#[get("/add_number/{person_id}")]
pub async fn add_number_form(user: CurrentUser, person_id: web::Path<String>, phone_service: web::Data<PhoneService>) -> Result<HttpResponse, AppError> {
    form_page(phone_service.add_form(&person_id, user.identity()).await)
}

#[utoipa::path(
    post,
    path = "/add_number/{person_id}",
    tag = "phone",
    params(("person_id" = String, Path, description = "联系人 ID")),
    request_body(content = PhoneForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "新增成功跳回号码页；不存在或无权限跳回列表"),
        (status = 200, description = "校验失败，回显表单", body = PhoneFormView)
    )
)]
#[post("/add_number/{person_id}")]
pub async fn add_number(
    user: CurrentUser,
    person_id: web::Path<String>,
    form: web::Form<PhoneForm>,
    phone_service: web::Data<PhoneService>,
) -> Result<HttpResponse, AppError> {
    let result = phone_service.add_phone(&person_id, user.identity(), &form).await;
    match result {
        Ok(phone) => Ok(redirect(&url_edit_phones(&phone.person_id))),
        Err(ContactError::Validation(errors)) => {
            let view = phone_service.add_form(&person_id, user.identity()).await;
            form_page(view.map(|v| PhoneFormView { form: form.into_inner(), errors, ..v }))
        }
        Err(ContactError::App(e)) => Err(e),
        Err(ContactError::Denied) => Ok(redirect(URL_INDEX)),
    }
}

#[utoipa::path(
    get,
    path = "/edit_number/{person_id}/{phone_id}",
    tag = "phone",
    params(
        ("person_id" = String, Path, description = "联系人 ID"),
        ("phone_id" = String, Path, description = "号码 ID")
    ),
    responses(
        (status = 200, description = "预填的号码表单", body = PhoneFormView),
        (status = 303, description = "不存在或无权限，跳回列表")
    )
)]
#[get("/edit_number/{person_id}/{phone_id}")]
pub async fn edit_number_form(user: CurrentUser, path: web::Path<(String, String)>, phone_service: web::Data<PhoneService>) -> Result<HttpResponse, AppError> {
    let (person_id, phone_id) = path.into_inner();
    form_page(phone_service.edit_form(&person_id, &phone_id, user.identity()).await)
}

#[utoipa::path(
    post,
    path = "/edit_number/{person_id}/{phone_id}",
    tag = "phone",
    params(
        ("person_id" = String, Path, description = "联系人 ID"),
        ("phone_id" = String, Path, description = "号码 ID")
    ),
    request_body(content = PhoneForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "已保存跳回号码页；不存在或无权限跳回列表"),
        (status = 200, description = "校验失败，回显表单", body = PhoneFormView)
    )
)]
#[post("/edit_number/{person_id}/{phone_id}")]
pub async fn edit_number(
    user: CurrentUser,
    path: web::Path<(String, String)>,
    form: web::Form<PhoneForm>,
    phone_service: web::Data<PhoneService>,
) -> Result<HttpResponse, AppError> {
    let (person_id, phone_id) = path.into_inner();
    let result = phone_service.update_phone(&person_id, &phone_id, user.identity(), &form).await;
    match result {
        Ok(()) => Ok(redirect(&url_edit_phones(&person_id))),
        Err(ContactError::Validation(errors)) => {
            let view = phone_service.edit_form(&person_id, &phone_id, user.identity()).await;
            form_page(view.map(|v| PhoneFormView { form: form.into_inner(), errors, ..v }))
        }
        Err(ContactError::App(e)) => Err(e),
        Err(ContactError::Denied) => Ok(redirect(URL_INDEX)),
    }
}

#[utoipa::path(
    get,
    path = "/delete_number/{person_id}/{phone_id}",
    tag = "phone",
    params(
        ("person_id" = String, Path, description = "联系人 ID"),
        ("phone_id" = String, Path, description = "号码 ID"),
        ("sig" = String, Query, description = "号码页下发的链接签名")
    ),
    responses(
        (status = 303, description = "联系人属于当前用户时跳回其号码页，否则跳回列表"),
        (status = 403, description = "链接签名缺失或无效")
    )
)]
#[get("/delete_number/{person_id}/{phone_id}")]
pub async fn delete_number(
    SignedUser(user): SignedUser,
    path: web::Path<(String, String)>,
    phone_service: web::Data<PhoneService>,
) -> Result<HttpResponse, AppError> {
    let (person_id, phone_id) = path.into_inner();
    let location = match phone_service.delete_phone(&person_id, &phone_id, user.identity()).await? {
        PhoneDeletion::Deleted { person_id } | PhoneDeletion::Unchanged { person_id } => url_edit_phones(&person_id),
        PhoneDeletion::Denied => URL_INDEX.to_string(),
    };
    Ok(redirect(&location))
}
