pub mod client;
pub mod connect;
pub mod dump;

pub use crate::domain::model::{DumpSummary, ItemRecord, ItemStub};
pub use crate::domain::ports::{ConfigProvider, PortalClient};
pub use crate::utils::error::Result;
