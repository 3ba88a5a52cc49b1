use rrtstar_planner::adapters::outbound::init_session_logger;
use rrtstar_planner::application::PlanningSession;
use rrtstar_planner::Config;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        let config = Config::from_file(&config_path)?;
        info!("Configuration loaded from {}", config_path);
        config
    } else {
        warn!("{} not found, using built-in defaults", config_path);
        Config::default()
    };

    let logger = init_session_logger(config.logging.file.as_deref());
    let mut session = PlanningSession::from_config(&config, logger)?;
    let outcome = session.run()?;

    match outcome.path {
        Some(path) => {
            for (i, p) in path.waypoints().iter().enumerate() {
                println!("{:>3}: ({:.2}, {:.2})", i, p.x, p.y);
            }
        }
        None => println!("no path found within {} steps", outcome.steps),
    }

    Ok(())
}
