use kvconfig::{Config, Schema};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AppConfig {
    #[serde(rename = "DATABASE_URL")]
    database_url: String,
    #[serde(rename = "PORT")]
    port: u16,
    #[serde(rename = "DEBUG")]
    debug: bool,
}

fn main() -> Result<(), kvconfig::ConfigError> {
    // Searches for .env from the current directory upwards
    let config = Config::from_env_file(None)?;

    let app: AppConfig = config.read_into(
        &Schema::new()
            .required("DATABASE_URL")
            .with_default("PORT", 3000)
            .with_default("DEBUG", false),
    )?;

    println!("Database URL: {}", app.database_url);
    println!("Listening on port {} (debug={})", app.port, app.debug);

    Ok(())
}
