pub mod error;
pub mod schema;
pub mod store;
pub mod wish;

pub use error::{Result, StoreError};
pub use store::{BehaviorRow, Store};
pub use wish::{MIN_WISH_COST, Wish, WishStatus};
