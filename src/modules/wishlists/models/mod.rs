mod wishlist;

pub use wishlist::{ToggleWishlist, Wishlist, WishlistRead};
