use app_state::load_app_settings;
use clap::Parser;
use color_eyre::Result;
use common_services::database::get_db_pool;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use worker::worker::create_worker;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Exit instead of sleeping once the queue is drained.
    #[clap(long, default_value_t = false, short, action)]
    stop_on_sleep: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    color_eyre::install()?;

    let settings = load_app_settings()?;
    let pool = get_db_pool(&settings.secrets.database_url, &settings.database).await?;
    create_worker(pool, settings, Args::parse().stop_on_sleep).await?;

    Ok(())
}
