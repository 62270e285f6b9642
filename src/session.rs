use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::api::ParkingApi;
use crate::booking::{BookingForm, BookingOutcome, MSG_SUCCESS};
use crate::config::AppConfig;
use crate::error::ParkResult;
use crate::geometry::{compute_layout, ContainerSize, ImageSize, SpotLayout};
use crate::model::SpotRecord;
use crate::notify::{Notification, Toasts};
use crate::reservations::ReservationBoard;
use crate::selection::{ClickOutcome, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ImageState {
    #[default]
    Pending,
    Loaded(ImageSize),
    /// Spots are sized from the container instead.
    Failed,
}

impl ImageState {
    pub fn size(&self) -> Option<ImageSize> {
        match self {
            ImageState::Loaded(size) => Some(*size),
            ImageState::Pending | ImageState::Failed => None,
        }
    }
}

/// Identifies one spot fetch. Only the newest ticket may write results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Everything the parking map page holds between events.
///
/// Inputs arrive as explicit calls (resize observed, image loaded, fetch
/// resolved, click). The layout is derived on demand from the current inputs.
pub struct ParkingSession {
    config: AppConfig,
    spots: Vec<SpotRecord>,
    spots_loading: bool,
    container: Option<ContainerSize>,
    image: ImageState,
    selection: Selection,
    booking: Option<BookingForm>,
    reservations: ReservationBoard,
    toasts: Toasts,
    generation: u64,
    attached: bool,
}

impl ParkingSession {
    pub fn new(config: AppConfig) -> Self {
        let toasts = Toasts::new(config.notify.ttl());
        Self {
            config,
            spots: Vec::new(),
            spots_loading: false,
            container: None,
            image: ImageState::Pending,
            selection: Selection::Idle,
            booking: None,
            reservations: ReservationBoard::new(),
            toasts,
            generation: 0,
            attached: true,
        }
    }

    pub fn spots(&self) -> &[SpotRecord] {
        &self.spots
    }

    pub fn is_loading(&self) -> bool {
        self.spots_loading
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn booking(&self) -> Option<&BookingForm> {
        self.booking.as_ref()
    }

    pub fn booking_mut(&mut self) -> Option<&mut BookingForm> {
        self.booking.as_mut()
    }

    pub fn reservations(&self) -> &ReservationBoard {
        &self.reservations
    }

    pub fn reservations_mut(&mut self) -> &mut ReservationBoard {
        &mut self.reservations
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // --- Inputs ---

    pub fn observe_resize(&mut self, size: ContainerSize) {
        if !self.attached {
            return;
        }
        self.container = Some(size);
    }

    pub fn image_loaded(&mut self, size: ImageSize) {
        if !self.attached {
            return;
        }
        self.image = ImageState::Loaded(size);
    }

    pub fn image_failed(&mut self) {
        if !self.attached {
            return;
        }
        warn!("Background image failed to load, sizing spots from the container");
        self.image = ImageState::Failed;
    }

    pub fn image(&self) -> ImageState {
        self.image
    }

    /// Unmount: stop observing and refuse any late results.
    pub fn detach(&mut self) {
        self.attached = false;
        self.container = None;
        self.spots_loading = false;
    }

    /// Drops notifications whose display time has run out.
    pub fn tick(&mut self, now: Instant) {
        self.toasts.dismiss_expired(now);
    }

    // --- Layout ---

    /// `None` until a usable container size has been observed.
    pub fn layout(&self) -> Option<SpotLayout> {
        let container = self.container?;
        compute_layout(&self.spots, container, self.image.size(), &self.config.layout)
    }

    // --- Spot data ---

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.spots_loading = self.attached;
        FetchTicket(self.generation)
    }

    /// Stores a fetch result unless it is stale or the page is gone.
    /// Returns whether the result was applied.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, result: ParkResult<Vec<SpotRecord>>) -> bool {
        if !self.attached || ticket.0 != self.generation {
            debug!("Discarding spot fetch #{} (current #{})", ticket.0, self.generation);
            return false;
        }
        self.spots_loading = false;
        match result {
            Ok(spots) => {
                info!("🅿️  Loaded {} parking spots", spots.len());
                self.spots = spots;
            }
            Err(e) => {
                warn!("Error loading parking spots: {}", e);
                self.spots = Vec::new();
                self.toasts
                    .push(Notification::error("Failed to load parking spots!"));
            }
        }
        true
    }

    /// Refetches the spot list and replaces it wholesale.
    pub async fn reload_spots<A: ParkingApi>(&mut self, api: &A) -> bool {
        let ticket = self.begin_fetch();
        let result = api.fetch_spots().await;
        self.apply_fetch(ticket, result)
    }

    /// Refetches the reservation table. A failure shows a notification.
    pub async fn reload_reservations<A: ParkingApi>(&mut self, api: &A) -> bool {
        if !self.attached {
            return false;
        }
        if let Some(note) = self.reservations.load(api).await {
            self.toasts.push(note);
        }
        true
    }

    /// Full page refresh: spot map first, then the reservation table.
    /// Returns whether the spot result was applied.
    pub async fn reload<A: ParkingApi>(&mut self, api: &A) -> bool {
        let applied = self.reload_spots(api).await;
        self.reload_reservations(api).await;
        applied
    }

    // --- Interaction ---

    pub fn click_spot(&mut self, spot: &SpotRecord) -> ClickOutcome {
        let outcome = self.selection.click(spot);
        match &outcome {
            ClickOutcome::OccupiedWarning(note) => self.toasts.push(note.clone()),
            ClickOutcome::BookingOpened(spot) => {
                self.booking = Some(BookingForm::new(spot.clone()));
            }
            ClickOutcome::Ignored => {}
        }
        outcome
    }

    /// Hit-tests against the current layout. `None` when the point misses
    /// every spot or no layout exists yet.
    pub fn click_at(&mut self, x: f32, y: f32) -> Option<ClickOutcome> {
        let spot = self.layout()?.spot_at(x, y)?.spot.clone();
        Some(self.click_spot(&spot))
    }

    pub fn close_booking(&mut self) {
        self.selection.close();
        self.booking = None;
    }

    /// Submits the open form. A confirmed booking closes the modal and
    /// refetches both the spot list and the reservation table.
    pub async fn submit_booking<A: ParkingApi>(
        &mut self,
        api: &A,
        now: DateTime<Utc>,
    ) -> Option<BookingOutcome> {
        let form = self.booking.as_mut()?;
        let outcome = form.submit(api, now).await;
        if outcome == BookingOutcome::Confirmed {
            self.toasts.push(Notification::success(MSG_SUCCESS));
            self.close_booking();
            self.reload(api).await;
        }
        Some(outcome)
    }
}
