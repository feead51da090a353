//! End-to-end harness. Run manually against live Postgres and object storage:
//!
//! ```sh
//! cargo run -p test_integration
//! ```
//!
//! Boots the API and a worker in-process against a scratch database and
//! drives the HTTP surface with a real client.

use crate::test_context::TestContext;
use color_eyre::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod test_context;
mod tests;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    color_eyre::install()?;

    let ctx = TestContext::new().await?;

    tests::run_all(&ctx).await?;

    Ok(())
}
