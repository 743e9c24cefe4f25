pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod store;

pub use config::Config;
pub use error::{Result, StoreError};
pub use model::Task;
pub use store::TaskStore;
