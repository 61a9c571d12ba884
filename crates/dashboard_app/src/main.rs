//! Terminal consumer of the dashboard engine: loads the campaign list,
//! polls metrics for one campaign and prints every view update until
//! ctrl-c.
//!
//! Usage: `dashboard_app [base_url] [campaign_id]`

use std::env;

use anyhow::Context;
use dashboard_engine::{DashboardEngine, FetchSettings, PollOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dashboard_logging::initialize(log::LevelFilter::Info)?;

    let mut args = env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://localhost:3000".to_string());
    let campaign_id = args.next().unwrap_or_else(|| "1".to_string());

    let engine =
        DashboardEngine::new(&base_url, FetchSettings::default()).context("build engine")?;

    engine.campaigns().subscribe(|snapshot| {
        let view = snapshot.view();
        if view.is_loading {
            println!("campaigns: loading...");
        } else if let Some(message) = &view.last_error {
            println!("campaigns: {message}");
        } else {
            for campaign in &view.items {
                println!("campaign {}: {}", campaign.id, campaign.name);
            }
        }
    });

    engine.metrics().subscribe(|snapshot| {
        let view = snapshot.view();
        if view.is_loading {
            return;
        }
        match (&view.last_error, view.items.last()) {
            (Some(message), _) => println!("metrics #{}: {message}", view.iteration),
            (None, Some(sample)) => println!(
                "metrics #{}: impressions={} clicks={} users={}",
                view.iteration, sample.impressions, sample.clicks, sample.users
            ),
            (None, None) => {}
        }
    });

    engine.load_campaigns();
    engine.start_metrics(&campaign_id, PollOptions::default());

    tokio::signal::ctrl_c().await.context("wait for ctrl-c")?;
    engine.stop();
    Ok(())
}
