pub mod wishlist_repository;

pub use wishlist_repository::WishlistRepository;
