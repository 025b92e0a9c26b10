pub mod type_service;

pub use type_service::TypeService;
