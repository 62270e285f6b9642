use tracing::debug;

use crate::model::SpotRecord;
use crate::notify::Notification;

/// Click dispatch state. The booking modal is open exactly when we are
/// `Selecting`, and only an available spot can be selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selecting { spot: SpotRecord },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Occupied spot: nothing opens, the user gets a warning.
    OccupiedWarning(Notification),
    BookingOpened(SpotRecord),
    /// A modal is already open and owns the input.
    Ignored,
}

impl Selection {
    pub fn click(&mut self, spot: &SpotRecord) -> ClickOutcome {
        if self.is_modal_open() {
            debug!("Click on {} ignored while booking is open", spot.spot_number);
            return ClickOutcome::Ignored;
        }
        if spot.is_occupied {
            return ClickOutcome::OccupiedWarning(Notification::occupied(&spot.spot_number));
        }
        *self = Selection::Selecting { spot: spot.clone() };
        ClickOutcome::BookingOpened(spot.clone())
    }

    /// Modal dismissed or booking confirmed.
    pub fn close(&mut self) {
        *self = Selection::Idle;
    }

    pub fn selected(&self) -> Option<&SpotRecord> {
        match self {
            Selection::Idle => None,
            Selection::Selecting { spot } => Some(spot),
        }
    }

    pub fn is_modal_open(&self) -> bool {
        matches!(self, Selection::Selecting { .. })
    }
}
