// Wishlist module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Wishlist, WishlistRead};
pub use repositories::WishlistRepository;
pub use services::WishlistService;
