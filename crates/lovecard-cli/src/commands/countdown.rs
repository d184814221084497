use std::time::Duration;

use clap::Args;
use lovecard_core::timer::{instant_or_now, TICK_INTERVAL_MS};
use lovecard_core::{Config, CountdownEngine, Event};

#[derive(Args)]
pub struct CountdownArgs {
    /// Evaluate at this instant instead of now (e.g. "2026-12-30T23:00:00")
    #[arg(long, conflicts_with = "watch")]
    at: Option<String>,
    /// Keep printing once per second until the target passes
    #[arg(long)]
    watch: bool,
    /// Output the tick as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CountdownArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let now = super::resolve_now(args.at.as_deref())?;
    let target = instant_or_now(Some(&config.countdown.target), now);
    let mut engine = CountdownEngine::new(target, config.countdown.expired_message.clone());

    if !args.watch {
        if let Some(event) = engine.tick_at(now) {
            print_event(&event, args.json)?;
        }
        return Ok(());
    }

    super::runtime()?.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
        loop {
            interval.tick().await;
            let Some(event) = engine.tick() else { break };
            print_event(&event, args.json)?;
            if engine.is_expired() {
                break;
            }
        }
        Ok(())
    })
}

fn print_event(event: &Event, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::CountdownTicked { remaining } => println!("{remaining}"),
        Event::CountdownExpired { message } => println!("{message}"),
        _ => {}
    }
    Ok(())
}
