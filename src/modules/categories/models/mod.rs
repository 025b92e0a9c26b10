mod category;

pub use category::{Category, CategoryCreate, CategoryRead, CategoryReadSimple, CategoryUpdate};
