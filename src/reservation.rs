use crate::flight::{Flight, FlightNumber};
use crate::user::UserId;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

pub type ReservationId = u32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub method: String,
    pub details: String,
    pub amount: u32,
}

/// A booking record. Operations here never touch a seat map; seat holds are
/// kept in step by `ReservationSystem`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "reservationId")]
    pub id: ReservationId,
    #[serde(rename = "passengerid")]
    pub passenger_id: UserId,
    #[serde(rename = "flightNumber")]
    pub flight_number: FlightNumber,
    #[serde(rename = "seatNumber")]
    seat_number: u32,
    #[serde(
        rename = "checkIn",
        default,
        with = "check_in_flag",
        skip_serializing_if = "is_false"
    )]
    checked_in: bool,
    pub payment: Payment,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// `"checkIn": "checked In"` once checked in, absent before.
mod check_in_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub const CHECKED_IN: &str = "checked In";

    pub fn serialize<S: Serializer>(checked_in: &bool, s: S) -> Result<S::Ok, S::Error> {
        if *checked_in {
            s.serialize_str(CHECKED_IN)
        } else {
            s.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.is_some_and(|s| !s.is_empty()))
    }
}

impl Reservation {
    pub fn new(
        id: ReservationId,
        passenger_id: UserId,
        flight_number: FlightNumber,
        seat_number: u32,
        payment: Payment,
    ) -> Self {
        Reservation {
            id,
            passenger_id,
            flight_number,
            seat_number,
            checked_in: false,
            payment,
        }
    }

    pub fn seat_number(&self) -> u32 {
        self.seat_number
    }

    pub fn is_checked_in(&self) -> bool {
        self.checked_in
    }

    pub fn mark_checked_in(&mut self) {
        self.checked_in = true;
    }

    /// Replaces the seat when `id` is this reservation's. The new seat is not
    /// checked against the flight, so two reservations can end up on one seat.
    pub fn modify(&mut self, id: ReservationId, seat_number: u32) -> bool {
        if self.id != id {
            return false;
        }
        self.seat_number = seat_number;
        true
    }

    /// Refund notice for this reservation. The seat stays held.
    pub fn cancel(&self) -> String {
        format!(
            "Reservation ID: {} is canceled\nTotal Cost: {} is refunded through Payment Method: {}",
            self.id, self.payment.amount, self.payment.method
        )
    }

    pub fn describe(&self, flight: Option<&Flight>) -> String {
        let flight = flight
            .map(|f| f.flight_details())
            .unwrap_or_else(|| format!("{} (no longer scheduled)", self.flight_number));
        format!(
            "Reservation ID: {}\nFlight: {}\nSeat: {}\nTotal Cost: {}\nPayment Method: {}",
            self.id, flight, self.seat_number, self.payment.amount, self.payment.method
        )
    }

    pub fn confirmation(&self, flight: Option<&Flight>) -> String {
        format!("Booking successful!\n{}", self.describe(flight))
    }

    pub fn row(&self) -> ReservationRow {
        ReservationRow {
            id: self.id,
            passenger: self.passenger_id,
            flight: self.flight_number,
            seat: self.seat_number,
            amount: self.payment.amount,
            method: self.payment.method.clone(),
            checked_in: if self.checked_in { "yes" } else { "no" },
        }
    }
}

#[derive(Tabled)]
pub struct ReservationRow {
    #[tabled(rename = "Reservation")]
    id: ReservationId,
    #[tabled(rename = "Passenger")]
    passenger: UserId,
    #[tabled(rename = "Flight")]
    flight: FlightNumber,
    #[tabled(rename = "Seat")]
    seat: u32,
    #[tabled(rename = "Amount")]
    amount: u32,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Checked in")]
    checked_in: &'static str,
}
