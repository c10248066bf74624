use chrono::{NaiveDate, NaiveTime};

use gateway_cell::SnapshotStore;
use shared_models::{Appointment, AppointmentStatus, BookingMode, Urgency};

fn appt(id: i64) -> Appointment {
    Appointment {
        id,
        subject_name: format!("Subject {id}"),
        subject_email: None,
        date: NaiveDate::from_ymd_opt(2024, 1, 15),
        time: NaiveTime::from_hms_opt(9, 0, 0),
        service_type: "Medical Consultation".to_string(),
        urgency: Urgency::Normal,
        reason: "checkup".to_string(),
        status: AppointmentStatus::Pending,
        admin_note: None,
        booking_mode: BookingMode::Standard,
    }
}

#[test]
fn empty_before_first_commit() {
    let store = SnapshotStore::new();
    assert!(store.latest().is_none());
    assert!(store.records().is_empty());
}

#[test]
fn sequential_commits_apply_in_order() {
    let mut store = SnapshotStore::new();

    let first = store.begin();
    assert!(store.commit(first, vec![appt(1)]));

    let second = store.begin();
    assert!(store.commit(second, vec![appt(1), appt(2)]));

    assert_eq!(store.records().len(), 2);
    assert_eq!(store.latest().map(|s| s.seq()), Some(2));
}

#[test]
fn slow_response_cannot_overwrite_fresher_snapshot() {
    let mut store = SnapshotStore::new();

    // Two overlapping requests; the newer one completes first.
    let slow = store.begin();
    let fast = store.begin();

    assert!(store.commit(fast, vec![appt(1), appt(2)]));
    assert!(!store.commit(slow, vec![appt(1)]));

    assert_eq!(store.records().len(), 2);
    assert_eq!(store.latest().map(|s| s.seq()), Some(2));
}

#[test]
fn in_flight_request_does_not_block_newer_ones() {
    let mut store = SnapshotStore::new();

    let abandoned = store.begin();
    let current = store.begin();
    assert!(store.commit(current, vec![appt(3)]));

    // The abandoned request's response may arrive much later; it is ignored.
    assert!(!store.commit(abandoned, vec![]));
    assert_eq!(store.records().len(), 1);
}
