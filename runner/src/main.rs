mod session;
mod setup;

use clap::Parser;
use arena::config::{ArenaConfig, ConfigManager};
use arena::{log, logger};
use session::{ArenaSession, SessionEnd};

#[derive(Parser)]
#[command(name = "snake_runner", version, about = "Headless driver for the snake arena")]
struct Args {
    /// Number of snakes to place at startup
    #[arg(short = 'p', long)]
    players: Option<usize>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    /// Seed for point item placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "snake_arena.yaml")]
    config: String,

    /// Stop after this many ticks even if snakes are still alive
    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_overrides(&self, mut config: ArenaConfig) -> ArenaConfig {
        if let Some(players) = self.players {
            config.players = players;
        }
        if let Some(width) = self.width {
            config.field_width = width;
        }
        if let Some(height) = self.height {
            config.field_height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<_, ArenaConfig> = ConfigManager::from_yaml_file(&args.config);
    let config = args.apply_overrides(config_manager.get_config()?);
    arena::config::Validate::validate(&config)?;

    let placed = setup::build_arena(&config);
    let state = placed.arena.state();
    log!(
        "Arena {}x{} with {} snake(s), seed {}",
        state.width(),
        state.height(),
        placed.arena.snake_count(),
        placed.arena.seed()
    );

    let mut session = ArenaSession::new(placed, &config, args.max_ticks);
    let end = tokio::select! {
        end = session.run() => end,
        _ = tokio::signal::ctrl_c() => {
            log!("Interrupted");
            SessionEnd::Interrupted
        }
    };

    log!("Session ended after {} ticks: {}", session.ticks(), end);
    for line in session.scoreboard() {
        log!("{}", line);
    }

    Ok(())
}
