//! Reservation booking rules
//!
//! Pure, I/O-free logic shared by the server and any client that wants to
//! pre-check a booking form: the slot grid, the request validator and the
//! reservation status lifecycle.

mod slots;
mod status;
mod validator;

pub use slots::{
    LAST_CALL, OPENING, SLOT_INTERVAL_MINUTES, TIME_SLOTS, TimeSlot, minute_of_day, slot_at,
};
pub use status::{ReservationStatus, StatusTransitionError, UnknownStatus};
pub use validator::{
    BOOKING_HORIZON_DAYS, MAX_PARTY_SIZE, MIN_PARTY_SIZE, ReservationRequest, TIME_FORMAT,
    ValidReservation, ValidationError, validate,
};
