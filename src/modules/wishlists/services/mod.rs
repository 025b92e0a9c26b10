pub mod wishlist_service;

pub use wishlist_service::WishlistService;
