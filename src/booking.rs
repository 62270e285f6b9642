use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, warn};

use crate::api::ParkingApi;
use crate::error::{ParkError, ParkResult};
use crate::model::{BookingRequest, BookingResponse, SpotRecord};

pub const MSG_INVALID_DURATION: &str = "Please enter a valid duration.";
pub const MSG_MISSING_NAME: &str = "Please enter your name.";
pub const MSG_MISSING_CAR: &str = "Please enter your car number.";
pub const MSG_SUCCESS: &str = "Booking successful!";
pub const MSG_REJECTED: &str = "Failed to book the parking spot.";
pub const MSG_ERROR: &str = "Error booking the parking spot.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    Confirmed,
    /// Validation failed, no request was sent.
    Invalid,
    /// Backend answered `success: false`.
    Rejected,
    /// Transport error or non-2xx.
    Failed,
    /// Submit control was disabled.
    Busy,
}

/// Form state for booking one spot. Field values are the raw text the user typed.
#[derive(Debug, Clone)]
pub struct BookingForm {
    spot: SpotRecord,
    pub name: String,
    pub car_number: String,
    pub duration: String,
    message: Option<String>,
    submitting: bool,
}

impl BookingForm {
    pub fn new(spot: SpotRecord) -> Self {
        Self {
            spot,
            name: String::new(),
            car_number: String::new(),
            duration: String::new(),
            message: None,
            submitting: false,
        }
    }

    pub fn spot(&self) -> &SpotRecord {
        &self.spot
    }

    pub fn title(&self) -> String {
        format!("Book Spot: {}", self.spot.spot_number)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Booking..."
        } else {
            "Book Now"
        }
    }

    /// Builds the request body without touching form state.
    pub fn prepare(&self, now: DateTime<Utc>) -> ParkResult<BookingRequest> {
        if self.name.trim().is_empty() {
            return Err(ParkError::Validation(MSG_MISSING_NAME.into()));
        }
        if self.car_number.trim().is_empty() {
            return Err(ParkError::Validation(MSG_MISSING_CAR.into()));
        }
        let duration = parse_duration(&self.duration)?;

        Ok(BookingRequest {
            name: self.name.clone(),
            car_number: self.car_number.clone(),
            spot_id: self.spot.id.clone(),
            start_time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            duration,
        })
    }

    /// Validates and raises the in-flight flag. On a validation error the
    /// inline message is set and the flag stays down.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> ParkResult<BookingRequest> {
        if self.submitting {
            return Err(ParkError::SubmissionInFlight);
        }
        match self.prepare(now) {
            Ok(req) => {
                self.submitting = true;
                Ok(req)
            }
            Err(e) => {
                if let ParkError::Validation(msg) = &e {
                    self.message = Some(msg.clone());
                }
                Err(e)
            }
        }
    }

    /// Lowers the in-flight flag and turns the backend answer into a message.
    pub fn finish_submit(&mut self, result: ParkResult<BookingResponse>) -> BookingOutcome {
        self.submitting = false;
        let (outcome, msg) = match result {
            Ok(BookingResponse { success: true }) => {
                info!("✅ Spot {} booked", self.spot.spot_number);
                (BookingOutcome::Confirmed, MSG_SUCCESS)
            }
            Ok(_) => {
                warn!("Backend refused booking for spot {}", self.spot.spot_number);
                (BookingOutcome::Rejected, MSG_REJECTED)
            }
            Err(e) => {
                warn!("Booking for spot {} failed: {}", self.spot.spot_number, e);
                (BookingOutcome::Failed, MSG_ERROR)
            }
        };
        self.message = Some(msg.to_string());
        outcome
    }

    pub async fn submit<A: ParkingApi>(&mut self, api: &A, now: DateTime<Utc>) -> BookingOutcome {
        let request = match self.begin_submit(now) {
            Ok(r) => r,
            Err(ParkError::SubmissionInFlight) => return BookingOutcome::Busy,
            Err(_) => return BookingOutcome::Invalid,
        };
        let result = api.book_spot(&request).await;
        self.finish_submit(result)
    }
}

/// Minutes as typed in the form. Only whole positive numbers pass.
pub fn parse_duration(raw: &str) -> ParkResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(ParkError::Validation(MSG_INVALID_DURATION.into())),
    }
}
