//! # Set Config Utility
//!
//! Sets an `admin_config` value without going through the admin UI.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package set-config --bin set_config -- enable_remote_access true
//! ```
//!
//! The program will:
//! 1. Load `DATABASE_URL` from the environment or `.env`
//! 2. Connect to the database and apply pending migrations
//! 3. Create or update the row for `KEY`
//! 4. Print the stored row
//!
//! Running servers pick up `enable_remote_access` on the next request.

use clap::Parser;
use lib_core::model::store::AdminConfigRepository;
use lib_core::{create_pool, Config, MIGRATOR};

#[derive(Parser)]
#[command(name = "set_config")]
#[command(about = "Create or update an admin_config value")]
#[command(version)]
struct Cli {
    /// Config key, e.g. enable_remote_access
    key: String,
    /// New value, e.g. true
    value: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let key = cli.key.trim();
    if key.is_empty() {
        anyhow::bail!("key cannot be empty");
    }

    let config = Config::from_env()?;
    config.validate()?;

    if let Some(parent) = config.database_path().as_deref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    println!("Connecting to {}...", config.database_url);
    let pool = create_pool(&config.database_url).await?;
    MIGRATOR.run(&pool).await?;

    let row = AdminConfigRepository::upsert(&pool, key, &cli.value).await?;

    println!("{} = {:?} (id {}, updated {})", row.key, row.value, row.id, row.updated);

    Ok(())
}
