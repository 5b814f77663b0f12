pub mod biz_service;
pub mod dto;
pub mod entitys;
