//! Campus portal binary.

use portal::{config::Config, create_state, init_tracing};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        data_dir = %config.data_dir.display(),
        persist = config.persist,
        "Starting campus portal"
    );

    let state = create_state(config)?;
    if state.begin_visit()? {
        tracing::info!("Cleared session left over from a previous visit");
    }

    let summary = state.summary()?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
