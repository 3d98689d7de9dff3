//! Reservation request validation
//!
//! [`validate`] is a pure function of the submitted request and an injected
//! `now`. It reports the first violated rule in this order:
//!
//! 1. date presence
//! 2. date range (not before today, at most [`BOOKING_HORIZON_DAYS`] ahead)
//! 3. time presence
//! 4. time format (`HH:MM`)
//! 5. time range (opening .. last call), then grid membership
//! 6. same-day rule (time strictly after `now` when booking for today)
//! 7. party size range
//!
//! The same-day rule is only evaluated once both date and time passed.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::slots::{self, LAST_CALL, OPENING};
use crate::error::{AppError, ErrorCode};

/// How many days ahead a reservation may be made
pub const BOOKING_HORIZON_DAYS: u64 = 90;

/// Smallest accepted party
pub const MIN_PARTY_SIZE: i64 = 1;

/// Largest accepted party
pub const MAX_PARTY_SIZE: i64 = 10;

/// Accepted format for the submitted time
pub const TIME_FORMAT: &str = "%H:%M";

/// A candidate reservation as submitted, before validation
///
/// `None` means the field was not supplied. `time` stays the raw slot label
/// because its format is part of what gets validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub party_size: Option<i64>,
}

impl ReservationRequest {
    pub fn new(date: NaiveDate, time: impl Into<String>, party_size: i64) -> Self {
        Self {
            date: Some(date),
            time: Some(time.into()),
            party_size: Some(party_size),
        }
    }
}

/// A reservation that passed every rule, ready to persist as confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidReservation {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
}

/// The single rule a rejected request violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("reservation date is required")]
    MissingDate,
    #[error("reservation date is in the past")]
    DateInPast,
    #[error("reservation date is more than {BOOKING_HORIZON_DAYS} days ahead")]
    DateTooFarOut,
    #[error("reservation time is required")]
    MissingTime,
    #[error("reservation time is not a valid HH:MM slot")]
    InvalidTimeFormat,
    #[error("reservation time is before opening ({OPENING})")]
    TimeBeforeOpening,
    #[error("reservation time is after last call ({LAST_CALL})")]
    TimeAfterLastCall,
    #[error("reservation time has already passed today")]
    SameDayTimeElapsed,
    #[error("party size must be between {MIN_PARTY_SIZE} and {MAX_PARTY_SIZE}")]
    PartySizeOutOfRange,
}

impl ValidationError {
    /// Name of the submitted field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingDate | Self::DateInPast | Self::DateTooFarOut => "reservation_date",
            Self::MissingTime
            | Self::InvalidTimeFormat
            | Self::TimeBeforeOpening
            | Self::TimeAfterLastCall
            | Self::SameDayTimeElapsed => "reservation_time",
            Self::PartySizeOutOfRange => "number_of_people",
        }
    }

    /// API error code for this rule
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingDate => ErrorCode::ReservationDateRequired,
            Self::DateInPast => ErrorCode::ReservationDateInPast,
            Self::DateTooFarOut => ErrorCode::ReservationDateTooFar,
            Self::MissingTime => ErrorCode::ReservationTimeRequired,
            Self::InvalidTimeFormat => ErrorCode::ReservationTimeInvalid,
            Self::TimeBeforeOpening => ErrorCode::ReservationBeforeOpening,
            Self::TimeAfterLastCall => ErrorCode::ReservationAfterLastCall,
            Self::SameDayTimeElapsed => ErrorCode::ReservationTimeElapsed,
            Self::PartySizeOutOfRange => ErrorCode::ReservationPartySizeOutOfRange,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(err.error_code()).for_field(err.field())
    }
}

/// Validate a reservation request against the booking rules at `now`
pub fn validate(
    request: &ReservationRequest,
    now: NaiveDateTime,
) -> Result<ValidReservation, ValidationError> {
    let today = now.date();
    let date = check_date(request.date, today)?;
    let time = check_time(request.time.as_deref())?;

    if date == today && time <= now.time() {
        return Err(ValidationError::SameDayTimeElapsed);
    }

    let party_size = check_party_size(request.party_size)?;

    Ok(ValidReservation {
        date,
        time,
        party_size,
    })
}

fn check_date(date: Option<NaiveDate>, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = date.ok_or(ValidationError::MissingDate)?;
    if date < today {
        return Err(ValidationError::DateInPast);
    }
    // A horizon past NaiveDate::MAX cannot be exceeded.
    let horizon = today.checked_add_days(Days::new(BOOKING_HORIZON_DAYS));
    if horizon.is_some_and(|horizon| date > horizon) {
        return Err(ValidationError::DateTooFarOut);
    }
    Ok(date)
}

fn check_time(raw: Option<&str>) -> Result<NaiveTime, ValidationError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingTime)?;

    let time = NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|_| ValidationError::InvalidTimeFormat)?;

    let minutes = slots::minute_of_day(time);
    if minutes < OPENING.minute_of_day() {
        return Err(ValidationError::TimeBeforeOpening);
    }
    if minutes > LAST_CALL.minute_of_day() {
        return Err(ValidationError::TimeAfterLastCall);
    }
    if slots::slot_at(time).is_none() {
        return Err(ValidationError::InvalidTimeFormat);
    }
    Ok(time)
}

fn check_party_size(party_size: Option<i64>) -> Result<i32, ValidationError> {
    party_size
        .filter(|n| (MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(n))
        .and_then(|n| i32::try_from(n).ok())
        .ok_or(ValidationError::PartySizeOutOfRange)
}
