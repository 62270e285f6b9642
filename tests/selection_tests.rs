mod common;

use common::{two_spots, FakeApi};
use parkmap::config::AppConfig;
use parkmap::geometry::ContainerSize;
use parkmap::model::SpotId;
use parkmap::notify::Level;
use parkmap::selection::{ClickOutcome, Selection};
use parkmap::session::ParkingSession;

#[test]
fn test_available_spot_opens_booking() {
    let spots = two_spots();
    let mut sel = Selection::default();

    let outcome = sel.click(&spots[0]);
    assert_eq!(outcome, ClickOutcome::BookingOpened(spots[0].clone()));
    assert!(sel.is_modal_open());
    assert_eq!(sel.selected().unwrap().id, SpotId::Number(1));
}

#[test]
fn test_occupied_spot_warns_and_stays_idle() {
    let spots = two_spots();
    let mut sel = Selection::default();

    match sel.click(&spots[1]) {
        ClickOutcome::OccupiedWarning(note) => {
            assert_eq!(note.level, Level::Error);
            assert!(note.message.contains("A2"));
        }
        other => panic!("Expected warning, got {:?}", other),
    }
    assert!(sel.selected().is_none());
    assert!(!sel.is_modal_open());
}

#[test]
fn test_clicks_ignored_while_modal_open() {
    let spots = two_spots();
    let mut sel = Selection::default();
    sel.click(&spots[0]);

    assert_eq!(sel.click(&spots[1]), ClickOutcome::Ignored);
    assert_eq!(sel.selected().unwrap().spot_number, "A1");

    sel.close();
    assert_eq!(sel, Selection::Idle);
}

async fn loaded_session() -> ParkingSession {
    let api = FakeApi::new(two_spots());
    let mut session = ParkingSession::new(AppConfig::default());
    session.reload(&api).await;
    session.observe_resize(ContainerSize::new(1900.0, 600.0));
    session
}

#[tokio::test]
async fn test_session_click_on_occupied_emits_one_notification() {
    let mut session = loaded_session().await;

    // A2 sits in column 1: x 300..400, y 90..190
    let outcome = session.click_at(350.0, 120.0).expect("A2 hit");
    assert!(matches!(outcome, ClickOutcome::OccupiedWarning(_)));

    let notes: Vec<_> = session.toasts().all().collect();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Spot A2 is occupied!");
    assert!(session.selection().selected().is_none());
    assert!(session.booking().is_none());
}

#[tokio::test]
async fn test_session_click_on_available_opens_form() {
    let mut session = loaded_session().await;

    session.click_at(150.0, 120.0).expect("A1 hit");
    assert_eq!(session.selection().selected().unwrap().id, SpotId::Number(1));

    let form = session.booking().expect("Form open");
    assert_eq!(form.title(), "Book Spot: A1");
    assert!(session.toasts().is_empty());

    session.close_booking();
    assert!(session.booking().is_none());
    assert!(!session.selection().is_modal_open());
}

#[tokio::test]
async fn test_click_outside_spots_does_nothing() {
    let mut session = loaded_session().await;
    assert!(session.click_at(5.0, 5.0).is_none());
    assert_eq!(session.selection(), &Selection::Idle);
}

#[test]
fn test_click_before_resize_has_no_layout() {
    let mut session = ParkingSession::new(AppConfig::default());
    assert!(session.layout().is_none());
    assert!(session.click_at(150.0, 120.0).is_none());
}
