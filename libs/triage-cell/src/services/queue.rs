// libs/triage-cell/src/services/queue.rs
use tracing::debug;

use shared_models::{Appointment, AppointmentStatus};

use crate::models::{QueueView, ServingView, ViewMode, WorklistFilter};

/// The triage and queue-ordering engine.
///
/// Every call re-derives its view from the full snapshot it is handed; the
/// service keeps no state between calls and never mutates its input. The
/// caller owns snapshot freshness (see the gateway cell's refresh loop).
#[derive(Debug, Default)]
pub struct TriageService;

impl TriageService {
    pub fn new() -> Self {
        Self
    }

    pub fn build_view(&self, records: &[Appointment], mode: &ViewMode) -> QueueView {
        debug!("Building {:?} view over {} records", mode, records.len());
        match mode {
            ViewMode::Intake => QueueView::Intake(self.intake_queue(records)),
            ViewMode::Serving => QueueView::Serving(self.serving_queue(records)),
            ViewMode::Worklist(filter) => QueueView::Worklist(self.worklist(records, filter)),
            ViewMode::History { subject_email } => {
                QueueView::History(self.personal_history(records, subject_email))
            }
        }
    }

    /// Nurse intake queue: pending only, urgent requests first, then FIFO by
    /// id within the same urgency tier. The appointment slot plays no part
    /// here; intake order is request order, not schedule order.
    pub fn intake_queue(&self, records: &[Appointment]) -> Vec<Appointment> {
        let mut pending: Vec<Appointment> = records
            .iter()
            .filter(|a| a.status == AppointmentStatus::Pending)
            .cloned()
            .collect();

        pending.sort_by_key(|a| (!a.is_urgent(), a.id));
        pending
    }

    /// Clinical serving queue: approved only, strict chronological order by
    /// scheduled slot. Urgency was already honored at intake time, so it
    /// gets no second vote here; this is physical walk-in order.
    pub fn serving_queue(&self, records: &[Appointment]) -> ServingView {
        let mut queue: Vec<Appointment> = records
            .iter()
            .filter(|a| a.status == AppointmentStatus::Approved)
            .cloned()
            .collect();

        queue.sort_by_key(|a| (a.scheduled_instant(), a.id));

        let mut ordered = queue.into_iter();
        let next = ordered.next();
        ServingView {
            next,
            waiting: ordered.collect(),
        }
    }

    /// Administrative worklist: actionable statuses bubble up (pending, then
    /// approved, then everything terminal together), urgent before normal
    /// within a bucket, most recently scheduled first as the tie-break.
    pub fn worklist(&self, records: &[Appointment], filter: &WorklistFilter) -> Vec<Appointment> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        let service = filter.service_contains.as_deref().map(str::to_lowercase);
        let urgency = filter.urgency_contains.as_deref().map(str::to_lowercase);

        let mut rows: Vec<Appointment> = records
            .iter()
            .filter(|a| {
                let matches_status = filter.status.map_or(true, |s| a.status == s);
                let matches_search = search
                    .as_deref()
                    .map_or(true, |needle| a.subject_name.to_lowercase().contains(needle));
                let matches_service = service
                    .as_deref()
                    .map_or(true, |needle| a.service_type.to_lowercase().contains(needle));
                let matches_urgency = urgency.as_deref().map_or(true, |needle| {
                    a.urgency.to_string().to_lowercase().contains(needle)
                });
                matches_status && matches_search && matches_service && matches_urgency
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            worklist_rank(a.status)
                .cmp(&worklist_rank(b.status))
                .then_with(|| (!a.is_urgent()).cmp(&(!b.is_urgent())))
                .then_with(|| b.scheduled_instant().cmp(&a.scheduled_instant()))
                .then_with(|| b.id.cmp(&a.id))
        });
        rows
    }

    /// A subject's own history. Terminal buckets deliberately differ from the
    /// worklist: for the subject, no-show outranks rejected outranks
    /// canceled, so dead requests sink to the bottom of their own list.
    pub fn personal_history(&self, records: &[Appointment], subject_email: &str) -> Vec<Appointment> {
        let mut rows: Vec<Appointment> = records
            .iter()
            .filter(|a| {
                a.subject_email
                    .as_deref()
                    .map_or(false, |email| email.eq_ignore_ascii_case(subject_email))
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            history_rank(a.status)
                .cmp(&history_rank(b.status))
                .then_with(|| b.id.cmp(&a.id))
        });
        rows
    }
}

fn worklist_rank(status: AppointmentStatus) -> u8 {
    match status {
        AppointmentStatus::Pending => 1,
        AppointmentStatus::Approved => 2,
        AppointmentStatus::Completed
        | AppointmentStatus::Rejected
        | AppointmentStatus::Canceled
        | AppointmentStatus::NoShow => 3,
        AppointmentStatus::Unknown => u8::MAX,
    }
}

fn history_rank(status: AppointmentStatus) -> u8 {
    match status {
        AppointmentStatus::Pending => 1,
        AppointmentStatus::Approved => 2,
        AppointmentStatus::Completed => 3,
        AppointmentStatus::NoShow => 4,
        AppointmentStatus::Rejected => 5,
        AppointmentStatus::Canceled => 6,
        AppointmentStatus::Unknown => u8::MAX,
    }
}
