use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};

use shared_models::{Appointment, AppointmentStatus, BookingMode, Urgency};
use triage_cell::{QueueView, TriageService, ViewMode, WorklistFilter};

fn appt(id: i64, status: AppointmentStatus, urgency: Urgency) -> Appointment {
    Appointment {
        id,
        subject_name: format!("Subject {id}"),
        subject_email: Some(format!("subject{id}@example.com")),
        date: NaiveDate::from_ymd_opt(2024, 1, 15),
        time: NaiveTime::from_hms_opt(9, 0, 0),
        service_type: "Medical Consultation".to_string(),
        urgency,
        reason: "checkup".to_string(),
        status,
        admin_note: None,
        booking_mode: BookingMode::Standard,
    }
}

fn scheduled(mut a: Appointment, ymd: (i32, u32, u32), hm: Option<(u32, u32)>) -> Appointment {
    a.date = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2);
    a.time = hm.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0));
    a
}

fn ids(records: &[Appointment]) -> Vec<i64> {
    records.iter().map(|a| a.id).collect()
}

// ------------------------------------------------------------------------------
// Intake queue
// ------------------------------------------------------------------------------

#[test]
fn intake_puts_urgent_requests_first() {
    let records = vec![
        appt(5, AppointmentStatus::Pending, Urgency::Normal),
        appt(2, AppointmentStatus::Pending, Urgency::Urgent),
    ];

    let queue = TriageService::new().intake_queue(&records);
    assert_eq!(ids(&queue), vec![2, 5]);
}

#[test]
fn intake_is_fifo_within_an_urgency_tier() {
    let records = vec![
        appt(3, AppointmentStatus::Pending, Urgency::Urgent),
        appt(1, AppointmentStatus::Pending, Urgency::Urgent),
        appt(8, AppointmentStatus::Pending, Urgency::Normal),
        appt(4, AppointmentStatus::Pending, Urgency::Normal),
    ];

    let queue = TriageService::new().intake_queue(&records);
    assert_eq!(ids(&queue), vec![1, 3, 4, 8]);
}

#[test]
fn intake_ignores_everything_but_pending() {
    let records = vec![
        appt(1, AppointmentStatus::Approved, Urgency::Urgent),
        appt(2, AppointmentStatus::Completed, Urgency::Urgent),
        appt(3, AppointmentStatus::Pending, Urgency::Normal),
        appt(4, AppointmentStatus::Unknown, Urgency::Urgent),
    ];

    let queue = TriageService::new().intake_queue(&records);
    assert_eq!(ids(&queue), vec![3]);
}

// ------------------------------------------------------------------------------
// Serving queue
// ------------------------------------------------------------------------------

#[test]
fn serving_is_chronological_and_ignores_urgency() {
    let records = vec![
        scheduled(
            appt(1, AppointmentStatus::Approved, Urgency::Normal),
            (2024, 1, 2),
            Some((9, 0)),
        ),
        scheduled(
            appt(2, AppointmentStatus::Approved, Urgency::Urgent),
            (2024, 1, 1),
            Some((10, 0)),
        ),
    ];

    let view = TriageService::new().serving_queue(&records);
    assert_eq!(view.next.as_ref().map(|a| a.id), Some(2));
    assert_eq!(ids(&view.waiting), vec![1]);
}

#[test]
fn serving_splits_next_from_waiting() {
    let base = appt(0, AppointmentStatus::Approved, Urgency::Normal);
    let records = vec![
        scheduled(Appointment { id: 10, ..base.clone() }, (2024, 2, 1), Some((8, 30))),
        scheduled(Appointment { id: 11, ..base.clone() }, (2024, 2, 1), Some((8, 0))),
        scheduled(Appointment { id: 12, ..base.clone() }, (2024, 2, 1), Some((9, 0))),
        appt(13, AppointmentStatus::Pending, Urgency::Urgent),
    ];

    let view = TriageService::new().serving_queue(&records);
    assert_eq!(view.next.as_ref().map(|a| a.id), Some(11));
    assert_eq!(ids(&view.waiting), vec![10, 12]);
    assert!(!view.is_empty());
}

#[test]
fn serving_queue_can_be_empty() {
    let records = vec![appt(1, AppointmentStatus::Pending, Urgency::Urgent)];
    let view = TriageService::new().serving_queue(&records);
    assert_eq!(view.next, None);
    assert!(view.waiting.is_empty());
    assert!(view.is_empty());
}

#[test]
fn missing_time_sorts_as_midnight() {
    let records = vec![
        scheduled(
            appt(1, AppointmentStatus::Approved, Urgency::Normal),
            (2024, 1, 2),
            None,
        ),
        scheduled(
            appt(2, AppointmentStatus::Approved, Urgency::Normal),
            (2024, 1, 2),
            Some((0, 30)),
        ),
    ];

    let view = TriageService::new().serving_queue(&records);
    assert_eq!(view.next.as_ref().map(|a| a.id), Some(1));
}

// ------------------------------------------------------------------------------
// Administrative worklist
// ------------------------------------------------------------------------------

#[test]
fn worklist_buckets_pending_then_approved_then_terminal() {
    let records = vec![
        appt(1, AppointmentStatus::Completed, Urgency::Normal),
        appt(2, AppointmentStatus::Pending, Urgency::Normal),
        appt(3, AppointmentStatus::Approved, Urgency::Normal),
    ];

    let rows = TriageService::new().worklist(&records, &WorklistFilter::default());
    let statuses: Vec<_> = rows.iter().map(|a| a.status).collect();
    assert_eq!(
        statuses,
        vec![
            AppointmentStatus::Pending,
            AppointmentStatus::Approved,
            AppointmentStatus::Completed,
        ]
    );
}

#[test]
fn worklist_groups_all_terminal_statuses_together() {
    // Rejected and no-show share a bucket for admins, so ordering inside the
    // bucket falls through to the schedule/id tie-break.
    let records = vec![
        scheduled(
            appt(9, AppointmentStatus::NoShow, Urgency::Normal),
            (2024, 3, 1),
            Some((10, 0)),
        ),
        scheduled(
            appt(10, AppointmentStatus::Rejected, Urgency::Normal),
            (2024, 3, 1),
            Some((10, 0)),
        ),
    ];

    let rows = TriageService::new().worklist(&records, &WorklistFilter::default());
    assert_eq!(ids(&rows), vec![10, 9]);
}

#[test]
fn worklist_prefers_urgent_within_a_bucket() {
    let records = vec![
        scheduled(
            appt(1, AppointmentStatus::Pending, Urgency::Normal),
            (2024, 5, 9),
            Some((8, 0)),
        ),
        scheduled(
            appt(2, AppointmentStatus::Pending, Urgency::Urgent),
            (2024, 5, 1),
            Some((8, 0)),
        ),
        scheduled(
            appt(3, AppointmentStatus::Pending, Urgency::Normal),
            (2024, 5, 20),
            Some((8, 0)),
        ),
    ];

    let rows = TriageService::new().worklist(&records, &WorklistFilter::default());
    // Urgent first despite the older slot, then most recently scheduled.
    assert_eq!(ids(&rows), vec![2, 3, 1]);
}

#[test]
fn worklist_sends_unknown_statuses_to_the_bottom() {
    let records = vec![
        appt(1, AppointmentStatus::Unknown, Urgency::Urgent),
        appt(2, AppointmentStatus::Canceled, Urgency::Normal),
    ];

    let rows = TriageService::new().worklist(&records, &WorklistFilter::default());
    assert_eq!(ids(&rows), vec![2, 1]);
}

#[test]
fn worklist_status_filter_is_exact() {
    let records = vec![
        appt(1, AppointmentStatus::Pending, Urgency::Normal),
        appt(2, AppointmentStatus::Approved, Urgency::Normal),
    ];

    let filter = WorklistFilter {
        status: Some(AppointmentStatus::Approved),
        ..WorklistFilter::default()
    };
    let rows = TriageService::new().worklist(&records, &filter);
    assert_eq!(ids(&rows), vec![2]);
}

#[test]
fn worklist_name_search_is_case_insensitive() {
    let mut a = appt(1, AppointmentStatus::Pending, Urgency::Normal);
    a.subject_name = "Maria Santos".to_string();
    let mut b = appt(2, AppointmentStatus::Pending, Urgency::Normal);
    b.subject_name = "Jose Rizal".to_string();

    let filter = WorklistFilter {
        search: Some("SANTOS".to_string()),
        ..WorklistFilter::default()
    };
    let rows = TriageService::new().worklist(&[a, b], &filter);
    assert_eq!(ids(&rows), vec![1]);
}

#[test]
fn worklist_category_filter_combines_service_and_urgency() {
    let mut a = appt(1, AppointmentStatus::Pending, Urgency::Urgent);
    a.service_type = "Medical Clearance".to_string();
    let mut b = appt(2, AppointmentStatus::Pending, Urgency::Normal);
    b.service_type = "Medical Clearance".to_string();
    let mut c = appt(3, AppointmentStatus::Pending, Urgency::Urgent);
    c.service_type = "Consultation".to_string();

    let filter = WorklistFilter {
        service_contains: Some("clearance".to_string()),
        urgency_contains: Some("urgent".to_string()),
        ..WorklistFilter::default()
    };
    let rows = TriageService::new().worklist(&[a, b, c], &filter);
    assert_eq!(ids(&rows), vec![1]);
}

// ------------------------------------------------------------------------------
// Personal history
// ------------------------------------------------------------------------------

#[test]
fn history_bucket_order_differs_from_worklist() {
    let email = "same@example.com";
    let mut rejected = scheduled(
        appt(10, AppointmentStatus::Rejected, Urgency::Normal),
        (2024, 3, 1),
        Some((10, 0)),
    );
    rejected.subject_email = Some(email.to_string());
    let mut noshow = scheduled(
        appt(9, AppointmentStatus::NoShow, Urgency::Normal),
        (2024, 3, 1),
        Some((10, 0)),
    );
    noshow.subject_email = Some(email.to_string());

    let records = vec![rejected, noshow];
    let service = TriageService::new();

    // Subject view: no-show outranks rejected.
    let history = service.personal_history(&records, email);
    assert_eq!(ids(&history), vec![9, 10]);

    // Admin view: same terminal bucket, id tie-break only.
    let worklist = service.worklist(&records, &WorklistFilter::default());
    assert_eq!(ids(&worklist), vec![10, 9]);
}

#[test]
fn history_matches_subject_email_case_insensitively() {
    let mut mine = appt(1, AppointmentStatus::Pending, Urgency::Normal);
    mine.subject_email = Some("Me@Example.com".to_string());
    let theirs = appt(2, AppointmentStatus::Pending, Urgency::Normal);
    let mut anonymous = appt(3, AppointmentStatus::Pending, Urgency::Normal);
    anonymous.subject_email = None;

    let rows =
        TriageService::new().personal_history(&[mine, theirs, anonymous], "me@example.com");
    assert_eq!(ids(&rows), vec![1]);
}

#[test]
fn history_shows_newest_request_first_within_a_bucket() {
    let email = "subject@example.com";
    let records: Vec<Appointment> = [4, 9, 2]
        .into_iter()
        .map(|id| {
            let mut a = appt(id, AppointmentStatus::Completed, Urgency::Normal);
            a.subject_email = Some(email.to_string());
            a
        })
        .collect();

    let rows = TriageService::new().personal_history(&records, email);
    assert_eq!(ids(&rows), vec![9, 4, 2]);
}

// ------------------------------------------------------------------------------
// Engine contract
// ------------------------------------------------------------------------------

#[test]
fn build_view_dispatches_by_mode() {
    let records = vec![appt(1, AppointmentStatus::Pending, Urgency::Normal)];
    let service = TriageService::new();

    assert_matches!(
        service.build_view(&records, &ViewMode::Intake),
        QueueView::Intake(_)
    );
    assert_matches!(
        service.build_view(&records, &ViewMode::Serving),
        QueueView::Serving(_)
    );
    assert_matches!(
        service.build_view(&records, &ViewMode::Worklist(WorklistFilter::default())),
        QueueView::Worklist(_)
    );
    assert_matches!(
        service.build_view(
            &records,
            &ViewMode::History {
                subject_email: "subject1@example.com".to_string()
            }
        ),
        QueueView::History(_)
    );
}

#[test]
fn build_view_is_pure_and_deterministic() {
    let records = vec![
        appt(5, AppointmentStatus::Pending, Urgency::Normal),
        appt(2, AppointmentStatus::Pending, Urgency::Urgent),
        appt(7, AppointmentStatus::Approved, Urgency::Normal),
    ];
    let before = records.clone();
    let service = TriageService::new();

    let first = service.build_view(&records, &ViewMode::Intake);
    let second = service.build_view(&records, &ViewMode::Intake);

    assert_eq!(first, second);
    assert_eq!(records, before);
}
