use crate::error::{Error, Result};
use crate::flight::FlightNumber;
use crate::reservation::{Payment, Reservation, ReservationId};
use crate::schedule::Schedule;
use crate::store::JsonStore;
use crate::user::UserId;
use crate::user_system::UserSystem;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct BookingRequest {
    pub passenger_id: UserId,
    pub flight_number: FlightNumber,
    pub seat_number: u32,
    pub payment: Payment,
}

/// Owner of every reservation and of the reservations file. Seat holds on
/// flights are taken and released only through this type.
pub struct ReservationSystem {
    reservations: Vec<Reservation>,
    next_id: ReservationId,
    store: JsonStore<Reservation>,
}

impl ReservationSystem {
    /// Loads the reservations and re-takes their seats on `schedule`.
    pub fn load(path: impl Into<PathBuf>, schedule: &mut Schedule) -> Result<Self> {
        let store = JsonStore::new(path);
        let reservations: Vec<Reservation> = store.load()?;

        schedule.reset_seats();
        for r in &reservations {
            match schedule.flight_mut(r.flight_number) {
                Ok(flight) => {
                    if !flight.seats_mut().book_seat(r.seat_number()) {
                        warn!(reservation = r.id, flight = r.flight_number, seat = r.seat_number(), "stored seat could not be held");
                    }
                }
                Err(_) => {
                    warn!(reservation = r.id, flight = r.flight_number, "reservation refers to a missing flight")
                }
            }
        }

        let next_id = reservations.iter().map(|r| r.id).max().map_or(1, |id| id + 1);
        Ok(ReservationSystem {
            reservations,
            next_id,
            store,
        })
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn get(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    pub fn for_passenger(&self, passenger_id: UserId) -> Vec<&Reservation> {
        self.reservations
            .iter()
            .filter(|r| r.passenger_id == passenger_id)
            .collect()
    }

    #[cfg(test)]
    pub fn next_id(&self) -> ReservationId {
        self.next_id
    }

    /// Stores an already-built reservation as is. The id counter moves past its id.
    pub fn add_reservation(&mut self, reservation: Reservation) -> Result<()> {
        self.next_id = self.next_id.max(reservation.id + 1);
        self.reservations.push(reservation);
        self.save()
    }

    /// Holds the seat, then records the reservation under a fresh id.
    pub fn book(
        &mut self,
        users: &UserSystem,
        schedule: &mut Schedule,
        request: BookingRequest,
    ) -> Result<ReservationId> {
        users.passenger(request.passenger_id)?;
        let flight = schedule.flight_mut(request.flight_number)?;
        if flight.is_flight_full() {
            return Err(Error::FlightFull(request.flight_number));
        }
        if !flight.seats_mut().book_seat(request.seat_number) {
            return Err(Error::SeatUnavailable {
                flight: request.flight_number,
                seat: request.seat_number,
            });
        }

        let id = self.next_id;
        self.add_reservation(Reservation::new(
            id,
            request.passenger_id,
            request.flight_number,
            request.seat_number,
            request.payment,
        ))?;
        info!(reservation = id, passenger = request.passenger_id, flight = request.flight_number, seat = request.seat_number, "booked");
        Ok(id)
    }

    /// A passenger cancelling one of their own reservations.
    pub fn cancel_reservation(
        &mut self,
        passenger_id: UserId,
        id: ReservationId,
        schedule: &mut Schedule,
    ) -> Result<String> {
        let owner = self.get(id).ok_or(Error::ReservationNotFound(id))?.passenger_id;
        if owner != passenger_id {
            return Err(Error::NotReservationOwner {
                reservation: id,
                passenger: passenger_id,
            });
        }
        self.remove_booking(id, schedule)
    }

    /// Cancels any reservation, releasing its seat. Returns the refund notice.
    pub fn remove_booking(&mut self, id: ReservationId, schedule: &mut Schedule) -> Result<String> {
        let idx = self
            .reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::ReservationNotFound(id))?;
        let reservation = self.reservations.remove(idx);
        if !self.seat_held(reservation.flight_number, reservation.seat_number()) {
            if let Ok(flight) = schedule.flight_mut(reservation.flight_number) {
                flight.seats_mut().unbook_seat(reservation.seat_number());
            }
        }
        self.save()?;
        info!(reservation = id, "canceled");
        Ok(reservation.cancel())
    }

    /// Moves a reservation to `seat_number`, holding the new seat before
    /// releasing the old one.
    pub fn modify_booking(
        &mut self,
        id: ReservationId,
        seat_number: u32,
        schedule: &mut Schedule,
    ) -> Result<()> {
        let (flight_number, old_seat) = self
            .get(id)
            .map(|r| (r.flight_number, r.seat_number()))
            .ok_or(Error::ReservationNotFound(id))?;
        if old_seat == seat_number {
            return Ok(());
        }
        let shared = self
            .reservations
            .iter()
            .any(|r| r.id != id && r.flight_number == flight_number && r.seat_number() == old_seat);

        let seats = schedule.flight_mut(flight_number)?.seats_mut();
        if !seats.book_seat(seat_number) {
            return Err(Error::SeatUnavailable {
                flight: flight_number,
                seat: seat_number,
            });
        }
        if !shared {
            seats.unbook_seat(old_seat);
        }
        if let Some(reservation) = self.reservations.iter_mut().find(|r| r.id == id) {
            reservation.modify(id, seat_number);
        }
        self.save()?;
        info!(reservation = id, from = old_seat, to = seat_number, "seat changed");
        Ok(())
    }

    /// Whether any stored reservation still sits in `seat` on `flight_number`.
    fn seat_held(&self, flight_number: FlightNumber, seat: u32) -> bool {
        self.reservations
            .iter()
            .any(|r| r.flight_number == flight_number && r.seat_number() == seat)
    }

    /// Flight details and seat, if `id` exists and belongs to `passenger_id`.
    pub fn check_reservation(
        &self,
        passenger_id: UserId,
        id: ReservationId,
        schedule: &Schedule,
    ) -> Option<(String, u32)> {
        self.reservations
            .iter()
            .find(|r| r.id == id && r.passenger_id == passenger_id)
            .map(|r| {
                let details = schedule
                    .flight(r.flight_number)
                    .map(|f| f.flight_details())
                    .unwrap_or_else(|| r.flight_number.to_string());
                (details, r.seat_number())
            })
    }

    pub fn check_in(&mut self, id: ReservationId) -> Result<()> {
        self.reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::ReservationNotFound(id))?
            .mark_checked_in();
        self.save()?;
        info!(reservation = id, "checked in");
        Ok(())
    }

    fn save(&self) -> Result<()> {
        self.store.save(&self.reservations)
    }
}
