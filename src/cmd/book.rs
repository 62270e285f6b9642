use crate::reports;
use chrono::Utc;
use clap::Args;
use std::time::Instant;
use parkmap::api::HttpParkingApi;
use parkmap::booking::{BookingOutcome, MSG_SUCCESS};
use parkmap::config::AppConfig;
use parkmap::error::{ParkError, ParkResult};
use parkmap::reservations::{paginate, DEFAULT_PAGE_SIZE};
use parkmap::selection::ClickOutcome;
use parkmap::session::ParkingSession;

#[derive(Args, Debug, Clone)]
pub struct BookArgs {
    /// Spot number as shown on the map, e.g. A1
    #[arg(short, long)]
    pub spot: String,
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub car_number: String,
    /// Minutes
    #[arg(short, long)]
    pub duration: String,
}

pub async fn run(args: BookArgs, config: &AppConfig) -> ParkResult<()> {
    let api = HttpParkingApi::new(&config.api)?;
    let mut session = ParkingSession::new(config.clone());
    session.reload_spots(&api).await;

    let spot = session
        .spots()
        .iter()
        .find(|s| s.spot_number.eq_ignore_ascii_case(&args.spot))
        .cloned()
        .ok_or_else(|| ParkError::NotFound(format!("spot '{}'", args.spot)))?;

    match session.click_spot(&spot) {
        ClickOutcome::BookingOpened(_) => {}
        ClickOutcome::OccupiedWarning(note) => {
            return Err(ParkError::Validation(note.message));
        }
        ClickOutcome::Ignored => {
            return Err(ParkError::Validation(format!(
                "spot {} cannot be booked right now",
                spot.spot_number
            )));
        }
    }

    if let Some(form) = session.booking_mut() {
        println!("\n📝 {}", form.title());
        form.name = args.name.clone();
        form.car_number = args.car_number.clone();
        form.duration = args.duration.clone();
    }

    let outcome = session.submit_booking(&api, Utc::now()).await;
    reports::print_notifications(session.toasts(), Instant::now());
    match outcome {
        Some(BookingOutcome::Confirmed) => {
            println!("✅ {}", MSG_SUCCESS);
            reports::print_spot_grid(session.spots(), config.layout.column_count);
            let page = paginate(session.reservations().rows(), 1, DEFAULT_PAGE_SIZE);
            reports::print_reservation_table(&page);
            Ok(())
        }
        Some(_) => {
            let msg = session
                .booking()
                .and_then(|f| f.message())
                .unwrap_or("Booking did not complete.");
            Err(ParkError::BookingRejected(msg.to_string()))
        }
        None => Err(ParkError::BookingRejected("no booking form open".into())),
    }
}
