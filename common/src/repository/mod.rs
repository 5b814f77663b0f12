pub mod db;
pub mod index_trait;
pub mod memory_repository;
pub mod repository_util;
