use chrono::{DateTime, FixedOffset, TimeZone};
use std::cmp::Ordering;
use std::collections::HashMap;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{error, info};

use crate::api::ParkingApi;
use crate::error::ParkResult;
use crate::model::{Reservation, SpotId, SpotRecord};
use crate::notify::Notification;

pub const UNKNOWN_SPOT: &str = "Unknown";
pub const LOADING_TEXT: &str = "Loading reservations...";
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRow {
    pub name: String,
    pub spot_id: SpotId,
    pub spot_number: String,
    pub duration: Option<f64>,
    pub start_time_raw: Option<String>,
    pub start_time: Option<DateTime<FixedOffset>>,
}

impl ReservationRow {
    pub fn duration_display(&self) -> String {
        self.duration
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Short localized date and time, `N/A` when the backend sent nothing.
    pub fn start_time_display<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match (&self.start_time, &self.start_time_raw) {
            (Some(t), _) => t
                .with_timezone(tz)
                .format("%m/%d/%Y, %-I:%M %p")
                .to_string(),
            (None, Some(raw)) => raw.clone(),
            (None, None) => "N/A".to_string(),
        }
    }
}

/// Attaches each reservation's spot number; unmatched ids become `Unknown`.
pub fn join_reservations(reservations: &[Reservation], spots: &[SpotRecord]) -> Vec<ReservationRow> {
    let by_id: HashMap<&SpotId, &str> = spots
        .iter()
        .map(|s| (&s.id, s.spot_number.as_str()))
        .collect();

    reservations
        .iter()
        .map(|r| ReservationRow {
            name: r.name.clone(),
            spot_id: r.spot_id.clone(),
            spot_number: by_id
                .get(&r.spot_id)
                .map(|n| n.to_string())
                .unwrap_or_else(|| UNKNOWN_SPOT.to_string()),
            duration: r.duration,
            start_time: r
                .start_time
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok()),
            start_time_raw: r.start_time.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ReservationColumn {
    #[strum(serialize = "name", to_string = "Name")]
    Name,
    #[strum(serialize = "spot", serialize = "spot_number", to_string = "Spot Number")]
    SpotNumber,
    #[strum(serialize = "duration", to_string = "Duration (minutes)")]
    Duration,
    #[strum(serialize = "start", serialize = "start_time", to_string = "Start Time")]
    StartTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

pub fn sort_rows(rows: &mut [ReservationRow], column: ReservationColumn, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ord = match column {
            ReservationColumn::Name => a.name.cmp(&b.name),
            ReservationColumn::SpotNumber => a.spot_number.cmp(&b.spot_number),
            ReservationColumn::Duration => {
                return none_last(a.duration, b.duration, order, |x, y| x.total_cmp(y));
            }
            ReservationColumn::StartTime => {
                return none_last(a.start_time, b.start_time, order, |x, y| x.cmp(y));
            }
        };
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

// Rows without a usable value sink to the bottom in both orders.
fn none_last<T>(
    a: Option<T>,
    b: Option<T>,
    order: SortOrder,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match order {
            SortOrder::Ascending => cmp(&x, &y),
            SortOrder::Descending => cmp(&y, &x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub number: usize,
    pub total_pages: usize,
    pub rows: &'a [ReservationRow],
}

/// 1-based pages. Out-of-range page numbers clamp to the last page.
pub fn paginate(rows: &[ReservationRow], page: usize, per_page: usize) -> Page<'_> {
    let per_page = per_page.max(1);
    let total_pages = rows.len().div_ceil(per_page).max(1);
    let number = page.clamp(1, total_pages);
    let start = (number - 1) * per_page;
    let end = (start + per_page).min(rows.len());
    Page {
        number,
        total_pages,
        rows: &rows[start.min(end)..end],
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum BoardState {
    #[default]
    Loading,
    Ready(Vec<ReservationRow>),
}

/// Reservation table data. Starts in `Loading` until both fetches settle.
#[derive(Debug, Clone, Default)]
pub struct ReservationBoard {
    state: BoardState,
}

impl ReservationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, BoardState::Loading)
    }

    pub fn rows(&self) -> &[ReservationRow] {
        match &self.state {
            BoardState::Loading => &[],
            BoardState::Ready(rows) => rows,
        }
    }

    pub fn sort(&mut self, column: ReservationColumn, order: SortOrder) {
        if let BoardState::Ready(rows) = &mut self.state {
            sort_rows(rows, column, order);
        }
    }

    /// Applies the joined result. A failure of either request leaves an empty
    /// table and hands back the notification to show.
    pub fn apply(
        &mut self,
        reservations: ParkResult<Vec<Reservation>>,
        spots: ParkResult<Vec<SpotRecord>>,
    ) -> Option<Notification> {
        match (reservations, spots) {
            (Ok(reservations), Ok(spots)) => {
                let rows = join_reservations(&reservations, &spots);
                info!("📋 Loaded {} reservations", rows.len());
                self.state = BoardState::Ready(rows);
                None
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Error loading reservations or parking spots: {}", e);
                self.state = BoardState::Ready(Vec::new());
                Some(Notification::error("Failed to load reservations!"))
            }
        }
    }

    /// Fires both GETs concurrently and joins them.
    pub async fn load<A: ParkingApi>(&mut self, api: &A) -> Option<Notification> {
        self.state = BoardState::Loading;
        let (reservations, spots) = tokio::join!(api.fetch_reservations(), api.fetch_spots());
        self.apply(reservations, spots)
    }
}
