use std::time::Duration;

use clap::Args;
use lovecard_core::timer::TICK_INTERVAL_MS;
use lovecard_core::{AnniversaryEngine, Config};

#[derive(Args)]
pub struct AnniversaryArgs {
    /// Evaluate at this instant instead of now
    #[arg(long, conflicts_with = "watch")]
    at: Option<String>,
    /// Keep printing once per second
    #[arg(long)]
    watch: bool,
    /// Output the elapsed span as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: AnniversaryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let now = super::resolve_now(args.at.as_deref())?;
    if config.anniversary.start.is_none() {
        tracing::info!("anniversary.start is not set, counting from now");
    }
    let mut engine = AnniversaryEngine::from_config(config.anniversary.start.as_deref(), now);

    let print = |engine: &AnniversaryEngine| -> Result<(), Box<dyn std::error::Error>> {
        if args.json {
            println!("{}", serde_json::to_string(&engine.elapsed())?);
        } else {
            println!("{}", engine.elapsed());
        }
        Ok(())
    };

    if !args.watch {
        return print(&engine);
    }

    super::runtime()?.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
        loop {
            interval.tick().await;
            engine.tick();
            print(&engine)?;
        }
    })
}
