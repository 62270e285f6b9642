use crate::reports;
use std::time::Instant;
use clap::Args;
use parkmap::api::HttpParkingApi;
use parkmap::config::AppConfig;
use parkmap::error::ParkResult;
use parkmap::session::ParkingSession;

#[derive(Args, Debug, Clone)]
pub struct SpotsArgs {
    /// Only list spots that can be booked
    #[arg(long, default_value_t = false)]
    pub available: bool,
}

pub async fn run(args: SpotsArgs, config: &AppConfig) -> ParkResult<()> {
    let api = HttpParkingApi::new(&config.api)?;
    println!("\n🅿️  Fetching parking spots from {}", api.base_url());

    let mut session = ParkingSession::new(config.clone());
    session.reload_spots(&api).await;
    reports::print_notifications(session.toasts(), Instant::now());

    if args.available {
        let free: Vec<_> = session
            .spots()
            .iter()
            .filter(|s| !s.is_occupied)
            .cloned()
            .collect();
        reports::print_spot_grid(&free, config.layout.column_count);
    } else {
        reports::print_spot_grid(session.spots(), config.layout.column_count);
    }
    reports::print_spot_summary(session.spots());
    Ok(())
}
