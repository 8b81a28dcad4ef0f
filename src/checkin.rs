//! Airport check-in over the live reservation store.
//!
//! Every read goes through [`ReservationSystem`]; the reservations file is
//! only ever rewritten from it.

use crate::error::{Error, Result};
use crate::flight::FlightNumber;
use crate::reservation::ReservationId;
use crate::reservation_system::ReservationSystem;
use crate::schedule::Schedule;
use crate::time::format_date_time;
use crate::user_system::UserSystem;
use chrono::NaiveDateTime;
use std::fmt;

/// Marks the reservation checked in and rewrites the reservations file.
pub fn check_in(reservations: &mut ReservationSystem, id: ReservationId) -> Result<()> {
    reservations.check_in(id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardingPass {
    pub passenger: String,
    pub flight_number: FlightNumber,
    pub origin: String,
    pub destination: String,
    pub seat: u32,
    pub boarding_time: NaiveDateTime,
}

impl BoardingPass {
    pub fn issue(
        id: ReservationId,
        reservations: &ReservationSystem,
        schedule: &Schedule,
        users: &UserSystem,
    ) -> Result<Self> {
        let reservation = reservations.get(id).ok_or(Error::ReservationNotFound(id))?;
        let passenger = users
            .find(reservation.passenger_id)
            .ok_or(Error::UserNotFound(reservation.passenger_id))?;
        let flight = schedule
            .flight(reservation.flight_number)
            .ok_or(Error::FlightNotFound(reservation.flight_number))?;
        Ok(BoardingPass {
            passenger: passenger.name().to_string(),
            flight_number: flight.number,
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            seat: reservation.seat_number(),
            boarding_time: flight.departure_time(),
        })
    }
}

impl fmt::Display for BoardingPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Boarding Pass ---")?;
        writeln!(f, "Passenger: {}", self.passenger)?;
        writeln!(f, "Flight Number: {}", self.flight_number)?;
        writeln!(f, "From: {}", self.origin)?;
        writeln!(f, "To: {}", self.destination)?;
        writeln!(f, "Seat: {}", self.seat)?;
        writeln!(f, "Boarding Time: {}", format_date_time(self.boarding_time))?;
        write!(f, "---------------------")
    }
}

/// What is actually recorded for a reservation, not what was last attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckinStatus {
    pub reservation: ReservationId,
    pub checked_in: bool,
    pub seat: u32,
    pub flight_number: FlightNumber,
    /// `None` once the flight has been removed from the schedule.
    pub boarding_time: Option<NaiveDateTime>,
}

pub fn checkin_status(
    id: ReservationId,
    reservations: &ReservationSystem,
    schedule: &Schedule,
) -> Result<CheckinStatus> {
    let reservation = reservations.get(id).ok_or(Error::ReservationNotFound(id))?;
    Ok(CheckinStatus {
        reservation: id,
        checked_in: reservation.is_checked_in(),
        seat: reservation.seat_number(),
        flight_number: reservation.flight_number,
        boarding_time: schedule
            .flight(reservation.flight_number)
            .map(|f| f.departure_time()),
    })
}

impl fmt::Display for CheckinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Check-in status for reservation ID {}:", self.reservation)?;
        let status = if self.checked_in { "Checked In" } else { "Not checked in" };
        writeln!(f, "  Status: {}", status)?;
        writeln!(f, "  Seat: {}", self.seat)?;
        writeln!(f, "  Flight Number: {}", self.flight_number)?;
        let boarding = self
            .boarding_time
            .map(format_date_time)
            .unwrap_or_else(|| "N/A".to_string());
        write!(f, "  Boarding Time: {}", boarding)
    }
}
