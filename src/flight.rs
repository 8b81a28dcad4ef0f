use crate::aircraft::{Aircraft, AircraftModel};
use crate::crew::{Crew, CrewId};
use crate::error::{Error, Result};
use crate::seat_map::SeatMap;
use crate::time::{format_date_time, whole_hours};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;
use tracing::warn;

pub type FlightNumber = u32;

/// Any status may follow any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlightStatus {
    Scheduled,
    Delayed,
    Canceled,
    OnTime,
}

impl FlightStatus {
    pub const ALL: [FlightStatus; 4] = [
        FlightStatus::Scheduled,
        FlightStatus::Delayed,
        FlightStatus::Canceled,
        FlightStatus::OnTime,
    ];
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlightStatus::Scheduled => "scheduled",
            FlightStatus::Delayed => "delayed",
            FlightStatus::Canceled => "canceled",
            FlightStatus::OnTime => "onTime",
        };
        write!(f, "{}", s)
    }
}

/// Parses the stored names or the menu numbers 1-4.
impl FromStr for FlightStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" | "scheduled" => Ok(FlightStatus::Scheduled),
            "2" | "delayed" => Ok(FlightStatus::Delayed),
            "3" | "canceled" => Ok(FlightStatus::Canceled),
            "4" | "onTime" => Ok(FlightStatus::OnTime),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// On-disk shape of a flight in `Flights.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub flight_number: FlightNumber,
    pub origin: String,
    pub destination: String,
    pub status: FlightStatus,
    #[serde(with = "crate::time::date_time")]
    pub departure_time: NaiveDateTime,
    #[serde(with = "crate::time::date_time")]
    pub arrival_time: NaiveDateTime,
    pub aircraft_model: AircraftModel,
    #[serde(rename = "crewIDs", default)]
    pub crew_ids: Vec<CrewId>,
}

#[derive(Clone, Debug)]
pub struct Flight {
    pub number: FlightNumber,
    pub origin: String,
    pub destination: String,
    status: FlightStatus,
    aircraft_model: AircraftModel,
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
    crew: Vec<CrewId>,
    seats: SeatMap,
}

#[derive(Tabled)]
pub struct FlightRow {
    #[tabled(rename = "Flight")]
    number: FlightNumber,
    #[tabled(rename = "From")]
    origin: String,
    #[tabled(rename = "To")]
    destination: String,
    #[tabled(rename = "Status")]
    status: FlightStatus,
    #[tabled(rename = "Departure")]
    departure: String,
    #[tabled(rename = "Arrival")]
    arrival: String,
    #[tabled(rename = "Aircraft")]
    aircraft: AircraftModel,
    #[tabled(rename = "Crew")]
    crew: String,
    #[tabled(rename = "Free seats")]
    free_seats: String,
}

impl Flight {
    /// Creates a flight on a maintained aircraft with a seat map sized to its capacity.
    pub fn new(
        number: FlightNumber,
        origin: &str,
        destination: &str,
        status: FlightStatus,
        aircraft: &Aircraft,
        departure_time: NaiveDateTime,
        arrival_time: NaiveDateTime,
    ) -> Result<Self> {
        if arrival_time <= departure_time {
            return Err(Error::InvalidFlightTimes);
        }
        if !aircraft.is_maintained() {
            return Err(Error::AircraftNeedsMaintenance(aircraft.model.to_string()));
        }
        Ok(Flight {
            number,
            origin: origin.to_string(),
            destination: destination.to_string(),
            status,
            aircraft_model: aircraft.model.clone(),
            departure_time,
            arrival_time,
            crew: vec![],
            seats: SeatMap::new(aircraft.capacity()),
        })
    }

    /// Rebuilds a stored flight. Crew hours are not charged again and the
    /// maintenance gate is not re-run.
    pub fn from_record(record: FlightRecord, aircraft: &Aircraft) -> Self {
        if !aircraft.is_maintained() {
            warn!(flight = record.flight_number, model = %aircraft.model, "stored flight uses an aircraft overdue for maintenance");
        }
        Flight {
            number: record.flight_number,
            origin: record.origin,
            destination: record.destination,
            status: record.status,
            aircraft_model: aircraft.model.clone(),
            departure_time: record.departure_time,
            arrival_time: record.arrival_time,
            crew: record.crew_ids,
            seats: SeatMap::new(aircraft.capacity()),
        }
    }

    pub fn to_record(&self) -> FlightRecord {
        FlightRecord {
            flight_number: self.number,
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            status: self.status,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            aircraft_model: self.aircraft_model.clone(),
            crew_ids: self.crew.clone(),
        }
    }

    pub fn status(&self) -> FlightStatus {
        self.status
    }

    pub fn aircraft_model(&self) -> &str {
        &self.aircraft_model
    }

    pub fn departure_time(&self) -> NaiveDateTime {
        self.departure_time
    }

    pub fn crew(&self) -> &[CrewId] {
        &self.crew
    }

    pub fn seats(&self) -> &SeatMap {
        &self.seats
    }

    pub fn seats_mut(&mut self) -> &mut SeatMap {
        &mut self.seats
    }

    /// Whole hours between departure and arrival; under an hour counts as 0.
    pub fn flight_hours(&self) -> i64 {
        whole_hours(self.departure_time, self.arrival_time)
    }

    /// Puts `crew` on this flight once and charges them the flight's hours.
    pub fn set_crew(&mut self, crew: &mut Crew) -> Result<()> {
        if !crew.is_crew_available() || self.crew.contains(&crew.id) {
            return Err(Error::CrewUnavailable(crew.id));
        }
        self.crew.push(crew.id);
        crew.assign_to_flight(self.flight_hours());
        Ok(())
    }

    /// Swaps the aircraft. The seat map is not resized.
    pub fn set_aircraft(&mut self, aircraft: &Aircraft) -> Result<()> {
        if !aircraft.is_maintained() {
            return Err(Error::AircraftNeedsMaintenance(aircraft.model.to_string()));
        }
        self.aircraft_model = aircraft.model.clone();
        Ok(())
    }

    pub fn is_flight_full(&self) -> bool {
        self.seats.seats_count() == 0
    }

    /// Exact origin and destination, departure on the same calendar day as `date`.
    pub fn is_flight_match(&self, origin: &str, destination: &str, date: NaiveDateTime) -> bool {
        self.origin == origin
            && self.destination == destination
            && self.departure_time.date() == date.date()
    }

    pub fn change_status(&mut self, status: FlightStatus) {
        self.status = status;
    }

    pub fn flight_details(&self) -> String {
        format!(
            "{} from {} to {}\nDeparture time: {}\nArrival time: {}",
            self.number,
            self.origin,
            self.destination,
            format_date_time(self.departure_time),
            format_date_time(self.arrival_time)
        )
    }

    pub fn row(&self) -> FlightRow {
        FlightRow {
            number: self.number,
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            status: self.status,
            departure: format_date_time(self.departure_time),
            arrival: format_date_time(self.arrival_time),
            aircraft: self.aircraft_model.clone(),
            crew: self
                .crew
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
            free_seats: format!("{}/{}", self.seats.seats_count(), self.seats.capacity()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crew::PILOT_ROLE;
    use crate::time::{parse_date, parse_date_time};

    fn at(s: &str) -> NaiveDateTime {
        parse_date_time(s).unwrap()
    }

    fn fresh_aircraft(capacity: u32) -> Aircraft {
        Aircraft::with_schedule(
            "A320",
            capacity,
            true,
            parse_date("2024-01-01").unwrap(),
            parse_date("2099-01-01").unwrap(),
        )
        .unwrap()
    }

    fn flight(dep: &str, arr: &str) -> Flight {
        Flight::new(
            101,
            "NYC",
            "LAX",
            FlightStatus::Scheduled,
            &fresh_aircraft(3),
            at(dep),
            at(arr),
        )
        .unwrap()
    }

    #[test]
    fn test_overdue_aircraft_rejected() {
        let overdue = Aircraft::with_schedule(
            "A320",
            150,
            true,
            parse_date("2020-01-01").unwrap(),
            parse_date("2020-06-01").unwrap(),
        )
        .unwrap();
        assert!(!overdue.is_maintained());
        let res = Flight::new(
            1,
            "NYC",
            "LAX",
            FlightStatus::Scheduled,
            &overdue,
            at("2030-01-01 10:00"),
            at("2030-01-01 12:00"),
        );
        assert!(matches!(res, Err(Error::AircraftNeedsMaintenance(_))));
    }

    #[test]
    fn test_arrival_must_follow_departure() {
        let res = Flight::new(
            1,
            "NYC",
            "LAX",
            FlightStatus::Scheduled,
            &fresh_aircraft(3),
            at("2030-01-01 10:00"),
            at("2030-01-01 10:00"),
        );
        assert!(matches!(res, Err(Error::InvalidFlightTimes)));
    }

    #[test]
    fn test_seat_map_sized_to_capacity() {
        let mut f = flight("2030-01-01 10:00", "2030-01-01 12:00");
        assert_eq!(f.seats().capacity(), 3);
        assert!(!f.is_flight_full());
        for seat in 1..=3 {
            assert!(f.seats_mut().book_seat(seat));
        }
        assert!(f.is_flight_full());
    }

    #[test]
    fn test_flight_match_ignores_time_of_day() {
        let f = flight("2024-06-01 14:30", "2024-06-01 20:00");
        assert!(f.is_flight_match("NYC", "LAX", at("2024-06-01 00:00")));
        assert!(!f.is_flight_match("NYC", "LAX", at("2024-06-02 14:30")));
        assert!(!f.is_flight_match("nyc", "LAX", at("2024-06-01 00:00")));
        assert!(!f.is_flight_match("LAX", "NYC", at("2024-06-01 00:00")));
    }

    #[test]
    fn test_set_crew_charges_whole_hours() {
        let mut f = flight("2030-01-01 10:00", "2030-01-01 13:40");
        let mut pilot = Crew::new(1, "Ann", PILOT_ROLE, 0.0);
        f.set_crew(&mut pilot).unwrap();
        assert_eq!(f.crew(), &[1]);
        assert_eq!(pilot.total_flight_hours(), 3.0);
    }

    #[test]
    fn test_sub_hour_flight_has_zero_duration() {
        let mut f = flight("2030-01-01 10:00", "2030-01-01 10:45");
        assert_eq!(f.flight_hours(), 0);
        let mut pilot = Crew::new(1, "Ann", PILOT_ROLE, 1.0);
        f.set_crew(&mut pilot).unwrap();
        assert_eq!(pilot.total_flight_hours(), 1.0);
    }

    #[test]
    fn test_set_crew_rejects_unavailable() {
        let mut f = flight("2030-01-01 10:00", "2030-01-01 12:00");
        let mut tired = Crew::new(2, "Bo", PILOT_ROLE, 5.0);
        assert!(matches!(f.set_crew(&mut tired), Err(Error::CrewUnavailable(2))));
        assert!(f.crew().is_empty());
        assert_eq!(tired.total_flight_hours(), 5.0);
    }

    #[test]
    fn test_any_status_transition() {
        let mut f = flight("2030-01-01 10:00", "2030-01-01 12:00");
        for from in FlightStatus::ALL {
            for to in FlightStatus::ALL {
                f.change_status(from);
                f.change_status(to);
                assert_eq!(f.status(), to);
            }
        }
    }

    #[test]
    fn test_set_aircraft_keeps_seat_map() {
        let mut f = flight("2030-01-01 10:00", "2030-01-01 12:00");
        let bigger = Aircraft::with_schedule(
            "B777",
            300,
            true,
            parse_date("2024-01-01").unwrap(),
            parse_date("2099-01-01").unwrap(),
        )
        .unwrap();
        f.set_aircraft(&bigger).unwrap();
        assert_eq!(f.aircraft_model(), "B777");
        assert_eq!(f.seats().capacity(), 3);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("3".parse::<FlightStatus>().unwrap(), FlightStatus::Canceled);
        assert_eq!("onTime".parse::<FlightStatus>().unwrap(), FlightStatus::OnTime);
        assert!(matches!("landed".parse::<FlightStatus>(), Err(Error::InvalidStatus(_))));
        assert_eq!(FlightStatus::OnTime.to_string(), "onTime");
    }

    #[test]
    fn test_record_json_shape() {
        let mut f = flight("2024-06-01 14:30", "2024-06-01 20:05");
        f.set_crew(&mut Crew::new(4, "Di", PILOT_ROLE, 0.0)).unwrap();
        let json = serde_json::to_value(f.to_record()).unwrap();
        assert_eq!(json["flightNumber"], 101);
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["departureTime"], "2024-06-01 14:30");
        assert_eq!(json["arrivalTime"], "2024-06-01 20:05");
        assert_eq!(json["aircraftModel"], "A320");
        assert_eq!(json["crewIDs"], serde_json::json!([4]));
    }

    #[test]
    fn test_record_accepts_date_only_times() {
        let record: FlightRecord = serde_json::from_str(
            r#"{"flightNumber": 5, "origin": "A", "destination": "B", "status": "delayed",
                "departureTime": "2024-06-01", "arrivalTime": "2024-06-02",
                "aircraftModel": "A320"}"#,
        )
        .unwrap();
        assert_eq!(record.departure_time, at("2024-06-01 00:00"));
        assert!(record.crew_ids.is_empty());
        let f = Flight::from_record(record, &fresh_aircraft(10));
        assert_eq!(f.flight_hours(), 24);
        assert_eq!(f.status(), FlightStatus::Delayed);
    }
}
