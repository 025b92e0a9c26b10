mod product_type;

pub use product_type::{ProductType, TypeCreate, TypeRead, TypeUpdate};
