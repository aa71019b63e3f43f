pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{CliConfig, ExportConfig};
pub use crate::core::client::AgolSession;
pub use crate::core::connect::{Connector, Credentials};
pub use crate::core::dump::ItemDumper;
pub use crate::domain::model::{DumpSummary, ItemRecord, ItemStub};
pub use crate::utils::error::{DumpError, Result};
