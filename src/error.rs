//! Error types for the airline console.
//!
//! Every domain operation returns [`Result`]; the console layer prints the
//! message and drops back into the menu it came from.

use crate::flight::FlightNumber;
use crate::reservation::ReservationId;
use crate::user::UserId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // === Storage ===
    #[error("could not open {}: {source}", path.display())]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    StoreFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Lookup ===
    #[error("flight number {0} not found")]
    FlightNotFound(FlightNumber),

    #[error("flight number {0} already exists")]
    DuplicateFlight(FlightNumber),

    #[error("aircraft model {0} not found")]
    UnknownAircraft(String),

    #[error("no aircraft at position {0}")]
    NoSuchAircraft(usize),

    #[error("aircraft {0} is still assigned to scheduled flights")]
    AircraftInUse(String),

    #[error("crew member {0} not found")]
    CrewNotFound(u32),

    #[error("user ID {0} not found")]
    UserNotFound(UserId),

    #[error("user ID {0} is not a passenger")]
    NotAPassenger(UserId),

    #[error("reservation ID {0} not found")]
    ReservationNotFound(ReservationId),

    #[error("reservation ID {reservation} does not belong to passenger {passenger}")]
    NotReservationOwner {
        reservation: ReservationId,
        passenger: UserId,
    },

    // === Validation ===
    #[error("incorrect new maintenance schedule: last {last}, next {next}")]
    InvalidMaintenanceSchedule { last: String, next: String },

    #[error("aircraft {0} needs maintenance, can't assign it to the flight")]
    AircraftNeedsMaintenance(String),

    #[error("aircraft capacity must be positive")]
    InvalidCapacity,

    #[error("arrival time must be after departure time")]
    InvalidFlightTimes,

    #[error("crew member {0} is not available for this flight")]
    CrewUnavailable(u32),

    #[error("crew member {0} is not a pilot")]
    NotAPilot(u32),

    #[error("seat {seat} is not available on flight {flight}")]
    SeatUnavailable { flight: FlightNumber, seat: u32 },

    #[error("flight {0} is full")]
    FlightFull(FlightNumber),

    #[error("email {0} already exists, please use a different email")]
    DuplicateEmail(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid flight status: {0}")]
    InvalidStatus(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    // === Console ===
    #[error("terminal error: {0}")]
    Terminal(#[from] rustyline::error::ReadlineError),

    #[error("input closed")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors caused by operator input rather than the database.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            Self::StoreOpen { .. }
                | Self::StoreWrite { .. }
                | Self::StoreFormat { .. }
                | Self::Io(_)
                | Self::Json(_)
                | Self::Terminal(_)
                | Self::InputClosed
        )
    }
}
