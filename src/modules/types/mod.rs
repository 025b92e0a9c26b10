// Product type module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ProductType, TypeRead};
pub use repositories::TypeRepository;
pub use services::TypeService;
