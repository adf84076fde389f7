use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    searx_tui::run().await
}
