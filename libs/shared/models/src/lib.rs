pub mod appointment;

pub use appointment::{
    Appointment, AppointmentRecord, AppointmentStatus, BookingMode, Urgency,
};
