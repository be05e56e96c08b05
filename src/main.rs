use anyhow::Result;

mod command;
mod dispatch;
mod document;
mod payload;
mod registry;

#[tokio::main]
async fn main() -> Result<()> {
    command::run().await
}
