#![allow(dead_code)]

use parkmap::api::ParkingApi;
use parkmap::error::{ParkError, ParkResult};
use parkmap::model::{BookingRequest, BookingResponse, Reservation, SpotId, SpotRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn two_spots() -> Vec<SpotRecord> {
    vec![
        SpotRecord::new(1, "A1", false),
        SpotRecord::new(2, "A2", true),
    ]
}

pub fn numbered_spots(n: usize) -> Vec<SpotRecord> {
    (0..n)
        .map(|i| SpotRecord::new(i as u64 + 1, format!("S{}", i + 1), i % 3 == 0))
        .collect()
}

/// In-memory backend that records every call.
pub struct FakeApi {
    pub spots: Mutex<ParkResult<Vec<SpotRecord>>>,
    pub reservations: Mutex<ParkResult<Vec<Reservation>>>,
    pub booking_success: Option<bool>,
    pub bookings: Mutex<Vec<BookingRequest>>,
    pub spot_fetches: AtomicUsize,
    pub reservation_fetches: AtomicUsize,
}

impl FakeApi {
    pub fn new(spots: Vec<SpotRecord>) -> Self {
        Self {
            spots: Mutex::new(Ok(spots)),
            reservations: Mutex::new(Ok(Vec::new())),
            booking_success: Some(true),
            bookings: Mutex::new(Vec::new()),
            spot_fetches: AtomicUsize::new(0),
            reservation_fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing_spots() -> Self {
        let api = Self::new(Vec::new());
        *api.spots.lock().unwrap() = Err(ParkError::NotFound("backend down".into()));
        api
    }

    pub fn with_reservations(self, rows: Vec<Reservation>) -> Self {
        *self.reservations.lock().unwrap() = Ok(rows);
        self
    }

    pub fn set_spots(&self, spots: Vec<SpotRecord>) {
        *self.spots.lock().unwrap() = Ok(spots);
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }

    pub fn fetch_count(&self) -> usize {
        self.spot_fetches.load(Ordering::SeqCst)
    }

    pub fn reservation_fetch_count(&self) -> usize {
        self.reservation_fetches.load(Ordering::SeqCst)
    }
}

fn clone_result<T: Clone>(r: &ParkResult<T>) -> ParkResult<T> {
    match r {
        Ok(v) => Ok(v.clone()),
        Err(e) => Err(ParkError::NotFound(e.to_string())),
    }
}

impl ParkingApi for FakeApi {
    async fn fetch_spots(&self) -> ParkResult<Vec<SpotRecord>> {
        self.spot_fetches.fetch_add(1, Ordering::SeqCst);
        clone_result(&self.spots.lock().unwrap())
    }

    async fn book_spot(&self, request: &BookingRequest) -> ParkResult<BookingResponse> {
        self.bookings.lock().unwrap().push(request.clone());
        match self.booking_success {
            Some(success) => Ok(BookingResponse { success }),
            None => Err(ParkError::BookingRejected("connection reset".into())),
        }
    }

    async fn fetch_reservations(&self) -> ParkResult<Vec<Reservation>> {
        self.reservation_fetches.fetch_add(1, Ordering::SeqCst);
        clone_result(&self.reservations.lock().unwrap())
    }
}

pub fn reservation(name: &str, spot_id: u64, duration: u32, start: Option<&str>) -> Reservation {
    Reservation {
        name: name.to_string(),
        spot_id: SpotId::Number(spot_id),
        duration: Some(f64::from(duration)),
        start_time: start.map(|s| s.to_string()),
    }
}
