pub mod categories;
pub mod cleaner;
pub mod disk_info;
pub mod error;
pub mod model;
pub mod persist;
pub mod refresh;
pub mod schedule;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
pub use store::Store;
