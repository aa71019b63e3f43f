use crate::domain::model::{ItemRecord, ItemStub};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait PortalClient: Send + Sync {
    async fn search_items(&self, query: &str, max_items: usize) -> Result<Vec<ItemStub>>;
    async fn get_item(&self, id: &str) -> Result<ItemRecord>;
    async fn get_item_data(&self, id: &str) -> Result<Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn query(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn delay_seconds(&self) -> f64;
    fn max_items(&self) -> usize;
}
