//! Unified error codes for the booking service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors
//! - 4xxx: Reservation errors
//! - 5xxx: Restaurant / category errors
//! - 6xxx: Review errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Staff account required
    StaffRequired = 2002,

    // ==================== 3xxx: Account ====================
    /// User not found
    UserNotFound = 3001,
    /// Email already registered
    EmailAlreadyRegistered = 3002,
    /// Password too short
    PasswordTooShort = 3003,
    /// Current password does not match
    PasswordMismatch = 3004,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Reservation has already been cancelled
    ReservationAlreadyCancelled = 4002,
    /// Reservation date missing
    ReservationDateRequired = 4101,
    /// Reservation date is in the past
    ReservationDateInPast = 4102,
    /// Reservation date beyond the booking horizon
    ReservationDateTooFar = 4103,
    /// Reservation time missing
    ReservationTimeRequired = 4201,
    /// Reservation time is not a selectable slot
    ReservationTimeInvalid = 4202,
    /// Reservation time before opening
    ReservationBeforeOpening = 4203,
    /// Reservation time after last call
    ReservationAfterLastCall = 4204,
    /// Same-day slot already elapsed
    ReservationTimeElapsed = 4205,
    /// Party size out of range
    ReservationPartySizeOutOfRange = 4301,

    // ==================== 5xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 5001,
    /// Category not found
    CategoryNotFound = 5101,
    /// Category name already exists
    CategoryNameExists = 5102,

    // ==================== 6xxx: Review ====================
    /// Review not found
    ReviewNotFound = 6001,
    /// User already reviewed this restaurant
    ReviewAlreadyExists = 6002,
    /// Rating out of range
    ReviewRatingOutOfRange = 6003,
    /// Comment too short
    ReviewCommentTooShort = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::StaffRequired => "Staff account is required",

            // Account
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::PasswordMismatch => "Current password is incorrect",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationAlreadyCancelled => "Reservation has already been cancelled",
            ErrorCode::ReservationDateRequired => "Please select a reservation date",
            ErrorCode::ReservationDateInPast => "Please select today or a later date",
            ErrorCode::ReservationDateTooFar => "Reservations can be made up to 90 days ahead",
            ErrorCode::ReservationTimeRequired => "Please select a reservation time",
            ErrorCode::ReservationTimeInvalid => "Please select a valid time slot",
            ErrorCode::ReservationBeforeOpening => "Reservations start at 18:00",
            ErrorCode::ReservationAfterLastCall => "Last call is at 21:00",
            ErrorCode::ReservationTimeElapsed => {
                "For same-day reservations please select a time later than now"
            }
            ErrorCode::ReservationPartySizeOutOfRange => "Party size must be between 1 and 10",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryNameExists => "Category name already exists",

            // Review
            ErrorCode::ReviewNotFound => "Review not found",
            ErrorCode::ReviewAlreadyExists => "You have already reviewed this restaurant",
            ErrorCode::ReviewRatingOutOfRange => "Rating must be between 1 and 5",
            ErrorCode::ReviewCommentTooShort => "Review must be at least 10 characters",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::StaffRequired),

            // Account
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::EmailAlreadyRegistered),
            3003 => Ok(ErrorCode::PasswordTooShort),
            3004 => Ok(ErrorCode::PasswordMismatch),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::ReservationAlreadyCancelled),
            4101 => Ok(ErrorCode::ReservationDateRequired),
            4102 => Ok(ErrorCode::ReservationDateInPast),
            4103 => Ok(ErrorCode::ReservationDateTooFar),
            4201 => Ok(ErrorCode::ReservationTimeRequired),
            4202 => Ok(ErrorCode::ReservationTimeInvalid),
            4203 => Ok(ErrorCode::ReservationBeforeOpening),
            4204 => Ok(ErrorCode::ReservationAfterLastCall),
            4205 => Ok(ErrorCode::ReservationTimeElapsed),
            4301 => Ok(ErrorCode::ReservationPartySizeOutOfRange),

            // Restaurant
            5001 => Ok(ErrorCode::RestaurantNotFound),
            5101 => Ok(ErrorCode::CategoryNotFound),
            5102 => Ok(ErrorCode::CategoryNameExists),

            // Review
            6001 => Ok(ErrorCode::ReviewNotFound),
            6002 => Ok(ErrorCode::ReviewAlreadyExists),
            6003 => Ok(ErrorCode::ReviewRatingOutOfRange),
            6004 => Ok(ErrorCode::ReviewCommentTooShort),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
