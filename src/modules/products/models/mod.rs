mod product;

pub use product::{
    Product, ProductCreate, ProductKind, ProductRead, ProductReadSimple, ProductStatus,
    ProductUpdate,
};
