use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use christmas_core::{
    bootstrap::{load_config, AuthInitializer, BootstrapRunner, DatabaseInitializer, SearchPath},
    logging,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load and validate configuration
    let config = load_config()?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("christmas starting...");

    // 3. Collaborators, kept behind Arc so their state outlives the runner
    let database = Arc::new(DatabaseInitializer::new(config.database.clone()));
    let auth = Arc::new(AuthInitializer::new(config.auth.clone()));

    let mut runner = BootstrapRunner::new(
        SearchPath::from_env(),
        Arc::clone(&database),
        Arc::clone(&auth),
    );
    if config.runner.print_args {
        let args = std::env::args_os().skip(1).collect();
        runner = runner.with_args(args);
    }

    // 4. Report, then data store, then auth
    let mut stdout = std::io::stdout().lock();
    runner.run(&mut stdout).await?;

    info!(
        pool_ready = database.pool().is_some(),
        jwt_ready = auth.jwt_service().is_some(),
        "christmas bootstrap finished"
    );

    Ok(())
}
