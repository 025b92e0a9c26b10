// Tag module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Tag, TagRead, TagReadSimple};
pub use repositories::TagRepository;
pub use services::TagService;
