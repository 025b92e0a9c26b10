pub mod wishlist_controller;

pub use wishlist_controller::configure;
