use crate::core::{ConfigProvider, DumpSummary, ItemRecord, ItemStub, PortalClient, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

pub const OUTPUT_FILE_NAME: &str = "agol_items.jsonl";

/// Sequential export loop: one search, then one fetch-and-write per item.
/// A failing item is logged and skipped; the run continues.
pub struct ItemDumper<P: PortalClient, C: ConfigProvider> {
    portal: P,
    config: C,
}

impl<P: PortalClient, C: ConfigProvider> ItemDumper<P, C> {
    pub fn new(portal: P, config: C) -> Self {
        Self { portal, config }
    }

    pub async fn run(&self) -> Result<DumpSummary> {
        let stubs = self
            .portal
            .search_items(self.config.query(), self.config.max_items())
            .await?;

        let output_dir = Path::new(self.config.output_dir());
        fs::create_dir_all(output_dir)?;
        let output_path = output_dir.join(OUTPUT_FILE_NAME);

        tracing::info!(
            "Found {} items. Writing to: {}",
            stubs.len(),
            output_path.display()
        );

        // Truncates any previous run's output.
        let mut file = File::create(&output_path)?;
        let mut summary = DumpSummary {
            found: stubs.len(),
            output_path,
            ..Default::default()
        };
        let delay = Duration::from_secs_f64(self.config.delay_seconds());

        for (i, stub) in stubs.iter().enumerate() {
            let index = i + 1;
            match self.dump_one(&mut file, stub).await {
                Ok(record) => {
                    summary.written += 1;
                    tracing::info!("{}. {} ({})", index, record.title, record.id);
                }
                Err(e) => {
                    summary.skipped += 1;
                    tracing::warn!("{}. Skipped item {}: {}", index, stub.id, e);
                }
            }
            tokio::time::sleep(delay).await;
        }

        Ok(summary)
    }

    async fn dump_one(&self, file: &mut File, stub: &ItemStub) -> Result<ItemRecord> {
        let mut record = self.portal.get_item(&stub.id).await?;
        record.data = self.portal.get_item_data(&stub.id).await?;

        // The line is fully serialized before any byte reaches the file;
        // a failed item never leaves a partial line behind.
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(record)
    }
}
