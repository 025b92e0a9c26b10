// Product module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Product, ProductRead, ProductReadSimple, ProductStatus};
pub use repositories::ProductRepository;
pub use services::ProductService;
