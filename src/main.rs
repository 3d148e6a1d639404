use std::path::PathBuf;

use clap::Parser;
use mamalia::Config;
use mamalia::quiz::{TimerMode, DEFAULT_TIER, TIERS};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding favorites and best scores
    #[arg(long, env = "MAMALIA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file to load the animals from instead of the built-in list
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Keep favorites and scores for this run only
    #[arg(long)]
    no_store: bool,

    /// Start with sound effects muted
    #[arg(short, long)]
    muted: bool,

    /// Preselected number of quiz questions (5, 8 or 12)
    #[arg(short, long, default_value_t = DEFAULT_TIER, value_parser = parse_tier)]
    questions: usize,

    /// Quiz countdown
    #[arg(short, long, value_enum, default_value_t = TimerMode::None)]
    timer: TimerMode,

    /// Seed for reproducible question order
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_tier(s: &str) -> Result<usize, String> {
    let tier: usize = s.parse().map_err(|e| format!("{}", e))?;
    if TIERS.contains(&tier) {
        Ok(tier)
    } else {
        Err(format!("must be one of {:?}", TIERS))
    }
}

impl Args {
    fn into_config(self) -> Config {
        let defaults = Config::default();
        let data_dir = if self.no_store {
            None
        } else {
            self.data_dir.or(defaults.data_dir)
        };

        Config {
            data_dir,
            dataset: self.dataset,
            muted: self.muted,
            tier: self.questions,
            timer_mode: self.timer,
            seed: self.seed,
        }
    }
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let config = Args::parse().into_config();
    log::debug!("starting with {:?}", config);

    if let Err(e) = mamalia::run(config).await {
        eprintln!("Error running mamalia: {}", e);
        std::process::exit(1);
    }
}
