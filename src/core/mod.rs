pub mod error;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod search;
pub mod slug;

pub use error::{AppError, Result};
pub use pagination::{Page, PageQuery};
pub use query::{Filter, InsertSet, Order, SqlValue, UpdateSet};
pub use repository::{BaseRepository, Entity};
pub use search::{RoleFilterMode, SearchJoin, SearchMapping};
