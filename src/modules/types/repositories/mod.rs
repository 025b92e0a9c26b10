pub mod type_repository;

pub use type_repository::TypeRepository;
