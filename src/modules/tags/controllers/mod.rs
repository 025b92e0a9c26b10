pub mod tag_controller;

pub use tag_controller::configure;
