use crate::dto::FormErrors;
use crate::entitys::person_entity::PersonEntity;
use crate::entitys::phone_entity::PhoneEntity;
use common::util::validate::validate_not_blank;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新增/编辑号码表单，两者使用同一套校验
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, PartialEq)]
#[serde(default)]
pub struct PhoneForm {
    #[schema(example = "555-1111")]
    #[validate(custom(function = "validate_not_blank"))]
    pub number: String,
    #[schema(example = "home")]
    #[validate(custom(function = "validate_not_blank"))]
    pub kind: String,
}

impl PhoneForm {
    pub fn trimmed(&self) -> Self {
        Self { number: self.number.trim().to_string(), kind: self.kind.trim().to_string() }
    }
}

impl From<&PhoneEntity> for PhoneForm {
    fn from(p: &PhoneEntity) -> Self {
        Self { number: p.number.clone(), kind: p.kind.clone() }
    }
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct PhoneFormView {
    pub form: PhoneForm,
    pub errors: FormErrors,
    pub first_name: String,
    pub last_name: String,
}

impl PhoneFormView {
    pub fn new(form: PhoneForm, parent: &PersonEntity) -> Self {
        Self { form, errors: FormErrors::new(), first_name: parent.first_name.clone(), last_name: parent.last_name.clone() }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct PhoneRow {
    pub id: String,
    pub number: String,
    pub kind: String,
    /// 带会话签名的删除链接，由接口层填充
    pub delete_url: String,
}

impl From<PhoneEntity> for PhoneRow {
    fn from(p: PhoneEntity) -> Self {
        Self { id: p.id, number: p.number, kind: p.kind, delete_url: String::new() }
    }
}

/// 某联系人的号码页
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhoneListView {
    pub rows: Vec<PhoneRow>,
    pub contact_person: String,
    pub person_id: String,
    pub user_email: String,
}
