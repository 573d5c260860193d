pub mod engine;
pub mod fanout;
pub mod query;

pub use crate::domain::model::{QueryResult, QuerySpec, SearchReport, SessionMap, Target};
pub use crate::domain::ports::{ConfigProvider, FabricApi};
pub use crate::utils::error::Result;
