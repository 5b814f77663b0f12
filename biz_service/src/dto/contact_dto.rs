use crate::dto::FormErrors;
use crate::entitys::person_entity::PersonEntity;
use common::util::validate::validate_not_blank;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新增/编辑联系人表单
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, PartialEq)]
#[serde(default)]
pub struct PersonForm {
    #[schema(example = "Ann")]
    #[validate(custom(function = "validate_not_blank"))]
    pub first_name: String,
    #[schema(example = "Lee")]
    #[validate(custom(function = "validate_not_blank"))]
    pub last_name: String,
}

impl PersonForm {
    pub fn trimmed(&self) -> Self {
        Self { first_name: self.first_name.trim().to_string(), last_name: self.last_name.trim().to_string() }
    }
}

impl From<&PersonEntity> for PersonForm {
    fn from(p: &PersonEntity) -> Self {
        Self { first_name: p.first_name.clone(), last_name: p.last_name.clone() }
    }
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct PersonFormView {
    pub form: PersonForm,
    pub errors: FormErrors,
}

/// 联系人列表行
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct PersonViewModel {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// `"555-1111 (home), 555-2222 (work)"`，无号码时为空串
    pub phone_numbers_display: String,
    /// 带会话签名的删除链接，由接口层填充
    pub delete_url: String,
}
