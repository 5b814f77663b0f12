use crate::identity::{CurrentUser, SignedUser};
use crate::result::{URL_INDEX, page, redirect, url_delete_contact};
use actix_web::{HttpResponse, get, post, web};
use biz_service::biz_service::contact_error::ContactError;
use biz_service::biz_service::contact_service::ContactService;
use biz_service::biz_service::person_service::PersonService;
use biz_service::biz_service::session_service::SessionService;
use biz_service::dto::contact_dto::{PersonForm, PersonFormView, PersonViewModel};
use common::errors::AppError;
use serde::Serialize;
use utoipa::ToSchema;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
    cfg.service(add_contact_form);
    cfg.service(add_contact);
    cfg.service(edit_contact_form);
    cfg.service(edit_contact);
    cfg.service(delete_contact);
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactListView {
    pub rows: Vec<PersonViewModel>,
}

/// 表单提交失败：校验错误回显表单，其余拒绝一律跳回列表
fn form_result(result: Result<(), ContactError>, form: PersonForm) -> Result<HttpResponse, AppError> {
    match result {
        Ok(()) | Err(ContactError::Denied) => Ok(redirect(URL_INDEX)),
        Err(ContactError::Validation(errors)) => Ok(page(PersonFormView { form, errors })),
        Err(ContactError::App(e)) => Err(e),
    }
}

/// 联系人列表
#[utoipa::path(
    get,
    path = "/",
    tag = "contact",
    responses(
        (status = 200, description = "当前用户的联系人及号码摘要", body = ContactListView),
        (status = 401, description = "未登录")
    )
)]
#[get("/")]
pub async fn index(
    user: CurrentUser,
    contact_service: web::Data<ContactService>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse, AppError> {
    let mut rows = contact_service.build_list_view_model(user.identity()).await?;
    for row in rows.iter_mut() {
        row.delete_url = sessions.signed_url(&url_delete_contact(&row.id), &user.token);
    }
    Ok(page(ContactListView { rows }))
}

#[utoipa::path(
    get,
    path = "/add_contact",
    tag = "contact",
    responses((status = 200, description = "空白联系人表单", body = PersonFormView))
)]
#[get("/add_contact")]
pub async fn add_contact_form(_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(page(PersonFormView::default()))
}

#[utoipa::path(
    post,
    path = "/add_contact",
    tag = "contact",
    request_body(content = PersonForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "创建成功，跳回列表"),
        (status = 200, description = "校验失败，回显表单", body = PersonFormView)
    )
)]
#[post("/add_contact")]
pub async fn add_contact(user: CurrentUser, form: web::Form<PersonForm>, person_service: web::Data<PersonService>) -> Result<HttpResponse, AppError> {
    let result = person_service.create_person(user.identity(), &form).await.map(|_| ());
    form_result(result, form.into_inner())
}

#[utoipa::path(
    get,
    path = "/edit_contact/{person_id}",
    tag = "contact",
    params(("person_id" = String, Path, description = "联系人 ID")),
    responses(
        (status = 200, description = "预填的联系人表单", body = PersonFormView),
        (status = 303, description = "不存在或无权限，跳回列表")
    )
)]
#[get("/edit_contact/{person_id}")]
pub async fn edit_contact_form(user: CurrentUser, person_id: web::Path<String>, person_service: web::Data<PersonService>) -> Result<HttpResponse, AppError> {
    match person_service.edit_form(&person_id, user.identity()).await {
        Ok(form) => Ok(page(PersonFormView { form, errors: Default::default() })),
        Err(ContactError::App(e)) => Err(e),
        Err(_) => Ok(redirect(URL_INDEX)),
    }
}

#[utoipa::path(
    post,
    path = "/edit_contact/{person_id}",
    tag = "contact",
    params(("person_id" = String, Path, description = "联系人 ID")),
    request_body(content = PersonForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "已保存，或不存在/无权限，跳回列表"),
        (status = 200, description = "校验失败，回显表单", body = PersonFormView)
    )
)]
#[post("/edit_contact/{person_id}")]
pub async fn edit_contact(
    user: CurrentUser,
    person_id: web::Path<String>,
    form: web::Form<PersonForm>,
    person_service: web::Data<PersonService>,
) -> Result<HttpResponse, AppError> {
    let result = person_service.update_person(&person_id, user.identity(), &form).await;
    form_result(result, form.into_inner())
}

#[utoipa::path(
    get,
    path = "/delete_contact/{person_id}",
    tag = "contact",
    params(
        ("person_id" = String, Path, description = "联系人 ID"),
        ("sig" = String, Query, description = "列表页下发的链接签名")
    ),
    responses(
        (status = 303, description = "无论是否删除都跳回列表"),
        (status = 403, description = "链接签名缺失或无效")
    )
)]
#[get("/delete_contact/{person_id}")]
pub async fn delete_contact(SignedUser(user): SignedUser, person_id: web::Path<String>, person_service: web::Data<PersonService>) -> Result<HttpResponse, AppError> {
    person_service.delete_person(&person_id, user.identity()).await?;
    Ok(redirect(URL_INDEX))
}
