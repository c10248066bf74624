// libs/shared/models/src/appointment.rs
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ==============================================================================
// CORE APPOINTMENT MODEL
// ==============================================================================

/// A fully normalized appointment record as the queue engine consumes it.
///
/// The backend owns creation and persistence; this side only reads snapshots
/// and requests status transitions by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub id: i64,
    pub subject_name: String,
    pub subject_email: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub service_type: String,
    pub urgency: Urgency,
    pub reason: String,
    pub status: AppointmentStatus,
    pub admin_note: Option<String>,
    pub booking_mode: BookingMode,
}

impl Appointment {
    /// Sortable scheduled instant. A missing time degrades to midnight of the
    /// date; a missing date sorts earliest.
    pub fn scheduled_instant(&self) -> NaiveDateTime {
        let date = self.date.unwrap_or(NaiveDate::MIN);
        let time = self.time.unwrap_or(NaiveTime::MIN);
        date.and_time(time)
    }

    pub fn is_urgent(&self) -> bool {
        self.urgency == Urgency::Urgent
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Completed,
    #[serde(rename = "noshow")]
    NoShow,
    Rejected,
    Canceled,
    #[default]
    Unknown,
}

impl AppointmentStatus {
    /// Case-insensitive parse; unrecognized values land in `Unknown` instead
    /// of failing, so a single bad record never poisons a snapshot.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => AppointmentStatus::Pending,
            "approved" => AppointmentStatus::Approved,
            "completed" => AppointmentStatus::Completed,
            "noshow" | "no_show" => AppointmentStatus::NoShow,
            "rejected" => AppointmentStatus::Rejected,
            "canceled" | "cancelled" => AppointmentStatus::Canceled,
            _ => AppointmentStatus::Unknown,
        }
    }

    /// Terminal statuses admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed
                | AppointmentStatus::NoShow
                | AppointmentStatus::Rejected
                | AppointmentStatus::Canceled
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Approved => write!(f, "approved"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::NoShow => write!(f, "noshow"),
            AppointmentStatus::Rejected => write!(f, "rejected"),
            AppointmentStatus::Canceled => write!(f, "canceled"),
            AppointmentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(AppointmentStatus::parse(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Urgency {
    Urgent,
    #[default]
    Normal,
}

impl Urgency {
    /// Absent or unrecognized urgency defaults to normal priority.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("urgent") {
            Urgency::Urgent
        } else {
            Urgency::Normal
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Urgent => write!(f, "Urgent"),
            Urgency::Normal => write!(f, "Normal"),
        }
    }
}

impl<'de> Deserialize<'de> for Urgency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Urgency::parse(&raw))
    }
}

/// How the booking entered the system. Display-only provenance flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingMode {
    #[default]
    Standard,
    AiChatbot,
}

impl<'de> Deserialize<'de> for BookingMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().eq_ignore_ascii_case("ai_chatbot") {
            Ok(BookingMode::AiChatbot)
        } else {
            Ok(BookingMode::Standard)
        }
    }
}

// ==============================================================================
// WIRE BOUNDARY
// ==============================================================================

/// Raw appointment as the REST backend serves it: string-typed date/time and
/// field names that vary by source form ("student" and "client" forms name
/// the same person).
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRecord {
    pub id: i64,

    #[serde(alias = "student_name", alias = "client_name")]
    pub subject_name: String,

    #[serde(default, alias = "student_email", alias = "client_email")]
    pub subject_email: Option<String>,

    #[serde(default, alias = "appointment_date")]
    pub date: String,

    #[serde(default, alias = "appointment_time")]
    pub time: Option<String>,

    #[serde(default)]
    pub service_type: String,

    #[serde(default)]
    pub urgency: Option<Urgency>,

    #[serde(default)]
    pub reason: String,

    #[serde(default)]
    pub status: AppointmentStatus,

    #[serde(default)]
    pub admin_note: Option<String>,

    #[serde(default)]
    pub booking_mode: Option<BookingMode>,
}

impl AppointmentRecord {
    /// Normalize into the typed model. Malformed dates or times become `None`
    /// rather than errors; downstream ordering has defined defaults for both.
    pub fn normalize(self) -> Appointment {
        Appointment {
            id: self.id,
            subject_name: self.subject_name,
            subject_email: self.subject_email.filter(|e| !e.trim().is_empty()),
            date: NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok(),
            time: self.time.as_deref().and_then(parse_wall_time),
            service_type: self.service_type,
            urgency: self.urgency.unwrap_or_default(),
            reason: self.reason,
            status: self.status,
            admin_note: self.admin_note.filter(|n| !n.trim().is_empty()),
            booking_mode: self.booking_mode.unwrap_or_default(),
        }
    }
}

/// Parse a wall-clock time in any of the shapes the backend and the booking
/// forms emit: "14:30:00", "14:30", or 12-hour "2:30 PM".
pub fn parse_wall_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let upper = trimmed.to_ascii_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        return NaiveTime::parse_from_str(&upper, "%I:%M %p")
            .or_else(|_| NaiveTime::parse_from_str(&upper, "%I:%M:%S %p"))
            .ok();
    }

    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}
