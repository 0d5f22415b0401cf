use mongodb::{
    options::{ClientOptions, ServerAddress},
    Client, Database,
};
use tracing::debug;

use super::config::DbConfig;

/// Connects to the document store holding user profiles.
///
/// `BIBLEWORDLE_DB_URL` overrides the configured address.
pub fn database(config: &DbConfig) -> mongodb::error::Result<Database> {
    let url = std::env::var("BIBLEWORDLE_DB_URL").unwrap_or_else(|_| config.url.clone());

    debug!(%url, database = %config.database, "connecting to mongodb");

    let options = ClientOptions::builder()
        .app_name("biblewordle".to_string())
        .hosts(vec![ServerAddress::parse(url)?])
        .build();

    Ok(Client::with_options(options)?.database(&config.database))
}
