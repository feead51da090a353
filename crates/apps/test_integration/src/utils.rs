use app_state::AppSettings;
use color_eyre::eyre::Result;
use common_services::database::get_db_pool;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use std::net::TcpListener;
use url::Url;

/// Clones the base settings with a unique scratch database and a free port.
pub fn create_test_settings(
    database_name: &str,
    base_settings: &AppSettings,
) -> Result<AppSettings> {
    let mut settings = base_settings.clone();

    let port = get_free_port();
    settings.api.host = "127.0.0.1".to_string();
    settings.api.port = u32::from(port);
    settings.api.public_url = format!("http://127.0.0.1:{port}");

    let mut db_url = Url::parse(&settings.secrets.database_url)?;
    db_url.set_path(&format!("/{database_name}"));
    settings.secrets.database_url = db_url.to_string();

    Ok(settings)
}

/// Creates a fresh scratch database and returns a migrated pool for it plus
/// the management pool used to drop it again.
pub async fn create_test_database(
    base_settings: &AppSettings,
    database_name: &str,
) -> Result<(PgPool, PgPool)> {
    // 1. Connect to the default 'postgres' database to manage other databases.
    let mut management_db_url = Url::parse(&base_settings.secrets.database_url)?;
    management_db_url.set_path("/postgres");
    let management_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(management_db_url.as_str())
        .await?;
    force_drop_db(&management_pool, database_name).await?;

    // 2. Create the new test database.
    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;

    // 3. Connect to it; get_db_pool runs the migrations.
    let mut test_db_url = Url::parse(&base_settings.secrets.database_url)?;
    test_db_url.set_path(&format!("/{database_name}"));
    let main_pool = get_db_pool(test_db_url.as_str(), &base_settings.database).await?;

    Ok((main_pool, management_pool))
}

pub async fn force_drop_db(management_pool: &PgPool, db_name: &str) -> Result<()> {
    let _ = management_pool
        .execute(format!("DROP DATABASE \"{db_name}\" WITH (FORCE)").as_str())
        .await;
    Ok(())
}

pub fn get_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("no free port");
    listener.local_addr().expect("no local addr").port()
}

/// Builds a minimal but well-formed FCS container for upload round-trips.
#[must_use]
pub fn synthesize_fcs_bytes(keywords: &[(&str, &str)]) -> Vec<u8> {
    const HEADER_LEN: usize = 58;
    let delimiter = b'/';
    let mut text = Vec::new();
    text.push(delimiter);
    for (key, value) in keywords {
        text.extend_from_slice(key.as_bytes());
        text.push(delimiter);
        text.extend_from_slice(value.as_bytes());
        text.push(delimiter);
    }

    let text_start = HEADER_LEN as u64;
    let text_end = text_start + text.len() as u64 - 1;

    let mut file = Vec::new();
    file.extend_from_slice(b"FCS3.1");
    file.extend_from_slice(b"    ");
    for offset in [text_start, text_end, 0, 0, 0, 0] {
        file.extend_from_slice(format!("{offset:>8}").as_bytes());
    }
    assert_eq!(file.len(), HEADER_LEN);
    file.extend_from_slice(&text);
    file
}
