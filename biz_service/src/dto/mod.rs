use std::collections::BTreeMap;
use validator::ValidationErrors;

pub mod contact_dto;
pub mod phone_dto;

/// 表单字段 -> 错误提示
pub type FormErrors = BTreeMap<String, String>;

/// 每个字段只取第一条错误；没有 message 时退回错误码
pub fn form_errors(e: &ValidationErrors) -> FormErrors {
    e.field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let msg = err.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| err.code.to_string());
                (field.to_string(), msg)
            })
        })
        .collect()
}
