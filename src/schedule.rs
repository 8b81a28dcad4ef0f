use crate::aircraft::{Aircraft, AircraftSystem};
use crate::config::Database;
use crate::crew::{Crew, CrewId, CrewRoster};
use crate::error::{Error, Result};
use crate::flight::{Flight, FlightNumber, FlightRecord, FlightStatus};
use crate::store::JsonStore;
use chrono::NaiveDateTime;
use tracing::info;


/// The flight system: every flight, the crew roster they draw on, and the
/// write-through to `Flights.json` and `Crew.json`.
pub struct Schedule {
    flights: Vec<Flight>,
    crew: CrewRoster,
    store: JsonStore<FlightRecord>,
}

impl Schedule {
    pub fn load(database: &Database, fleet: &AircraftSystem) -> Result<Self> {
        let crew = CrewRoster::load(&database.crew)?;
        let store = JsonStore::new(&database.flights);
        let flights = store
            .load()?
            .into_iter()
            .map(|record: FlightRecord| -> Result<Flight> {
                let aircraft = fleet
                    .find(&record.aircraft_model)
                    .ok_or_else(|| Error::UnknownAircraft(record.aircraft_model.to_string()))?;
                Ok(Flight::from_record(record, aircraft))
            })
            .collect::<Result<Vec<Flight>>>()?;
        Ok(Schedule {
            flights,
            crew,
            store,
        })
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn flight(&self, number: FlightNumber) -> Option<&Flight> {
        self.flights.iter().find(|f| f.number == number)
    }

    pub fn flight_mut(&mut self, number: FlightNumber) -> Result<&mut Flight> {
        self.flights
            .iter_mut()
            .find(|f| f.number == number)
            .ok_or(Error::FlightNotFound(number))
    }

    /// Marks every seat on every flight available again.
    pub fn reset_seats(&mut self) {
        self.flights.iter_mut().for_each(|f| f.seats_mut().reset_map());
    }

    pub fn crew(&self) -> &CrewRoster {
        &self.crew
    }

    pub fn add_flight(&mut self, flight: Flight) -> Result<()> {
        if self.flight(flight.number).is_some() {
            return Err(Error::DuplicateFlight(flight.number));
        }
        info!(flight = flight.number, origin = %flight.origin, destination = %flight.destination, "flight added");
        self.flights.push(flight);
        self.save()
    }

    /// Reservations on the removed flight are left in place.
    pub fn remove_flight(&mut self, number: FlightNumber) -> Result<Flight> {
        let idx = self
            .flights
            .iter()
            .position(|f| f.number == number)
            .ok_or(Error::FlightNotFound(number))?;
        let removed = self.flights.remove(idx);
        self.save()?;
        info!(flight = number, "flight removed");
        Ok(removed)
    }

    pub fn update_status(&mut self, number: FlightNumber, status: FlightStatus) -> Result<()> {
        self.flight_mut(number)?.change_status(status);
        self.save()?;
        info!(flight = number, %status, "flight status changed");
        Ok(())
    }

    /// Moves the flight onto `aircraft`; its seat map keeps the old size.
    pub fn change_aircraft(&mut self, number: FlightNumber, aircraft: &Aircraft) -> Result<()> {
        self.flight_mut(number)?.set_aircraft(aircraft)?;
        self.save()?;
        info!(flight = number, model = %aircraft.model, "aircraft changed");
        Ok(())
    }

    pub fn search(&self, origin: &str, destination: &str, date: NaiveDateTime) -> Vec<&Flight> {
        self.flights
            .iter()
            .filter(|f| f.is_flight_match(origin, destination, date))
            .collect()
    }

    /// One pilot per started block of `Crew::MAX_DAILY_HOURS`, at least one.
    pub fn required_pilots(&self, number: FlightNumber) -> Result<usize> {
        let flight = self.flight(number).ok_or(Error::FlightNotFound(number))?;
        let block = Crew::MAX_DAILY_HOURS as i64;
        let hours = flight.flight_hours().max(0);
        Ok(((hours + block - 1) / block).max(1) as usize)
    }

    pub fn available_pilots(&self) -> Vec<&Crew> {
        self.crew.available_pilots()
    }

    /// Assigns one pilot, charging their hours, and writes flights and crew through.
    pub fn assign_pilot(&mut self, number: FlightNumber, crew_id: CrewId) -> Result<()> {
        let flight = self
            .flights
            .iter_mut()
            .find(|f| f.number == number)
            .ok_or(Error::FlightNotFound(number))?;
        let pilot = self.crew.find_mut(crew_id)?;
        if !pilot.is_pilot() {
            return Err(Error::NotAPilot(crew_id));
        }
        flight.set_crew(pilot)?;
        info!(flight = number, crew = crew_id, hours = pilot.total_flight_hours(), "pilot assigned");
        self.save()?;
        self.crew.save()
    }

    fn save(&self) -> Result<()> {
        let records: Vec<FlightRecord> = self.flights.iter().map(Flight::to_record).collect();
        self.store.save(&records)
    }
}
