pub mod migrations;
pub mod repository;
