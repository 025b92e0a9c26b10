pub mod type_controller;

pub use type_controller::configure;
