use common::util::validate::validate_password;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct RegisterReq {
    #[schema(example = "ann@example.com")]
    #[validate(email(message = "email.invalid"))]
    pub email: String,
    /// 至少8位，含字母和数字
    #[schema(example = "letters123")]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResp {
    pub user_id: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginReq {
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[schema(example = "letters123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResp {
    pub token: String,
}
