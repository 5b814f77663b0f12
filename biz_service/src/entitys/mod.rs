pub mod person_entity;
pub mod phone_entity;
pub mod user_entity;
