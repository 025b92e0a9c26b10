// Category module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Category, CategoryRead, CategoryReadSimple};
pub use repositories::CategoryRepository;
pub use services::CategoryService;
