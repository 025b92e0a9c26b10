mod tag;

pub use tag::{Tag, TagCreate, TagRead, TagReadSimple, TagUpdate};
