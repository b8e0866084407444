pub mod render;
pub mod workflow;

pub use crate::domain::model::{BreachList, BreachRecord, LookupRequest, LookupState};
pub use crate::domain::ports::{BreachProvider, ConfigProvider};
pub use crate::utils::error::Result;
