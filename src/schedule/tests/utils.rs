use crate::aircraft::AircraftSystem;
use crate::config::Database;
use crate::logging::init_test_logging;
use crate::reservation::Payment;
use crate::reservation_system::ReservationSystem;
use crate::schedule::Schedule;
use crate::user_system::UserSystem;
use serde_json::{Value, json};
use tempfile::TempDir;

/// A throwaway database directory with the five collection files.
pub struct Fixture {
    _dir: TempDir,
    pub database: Database,
}

impl Fixture {
    /// Two maintained aircraft, five crew (pilot 5 already over the ceiling),
    /// three flights, four users and reservation 5 holding seat 2 on flight 101.
    pub fn standard() -> Self {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let database = Database::new(dir.path());
        let fixture = Fixture { _dir: dir, database };

        fixture.write(
            &fixture.database.aircraft,
            json!([
                aircraft("A320", 4),
                aircraft("B737", 6),
            ]),
        );
        fixture.write(
            &fixture.database.crew,
            json!([
                crew(1, "Ann", "Pilot", 0.0),
                crew(2, "Bob", "Pilot", 0.0),
                crew(3, "Cat", "Pilot", 0.0),
                crew(4, "Dan", "Attendant", 0.0),
                crew(5, "Eve", "Pilot", 6.0),
            ]),
        );
        fixture.write(
            &fixture.database.flights,
            json!([
                flight(101, "NYC", "LAX", "2024-06-01 14:30", "2024-06-01 20:00", "A320"),
                flight(102, "LAX", "SFO", "2024-06-02 09:00", "2024-06-02 10:30", "A320"),
                flight(103, "NYC", "LAX", "2024-06-01 08:00", "2024-06-01 19:00", "B737"),
            ]),
        );
        fixture.write(
            &fixture.database.users,
            json!([
                user(1, "Ada", "ada@air.com", "admin", "admin"),
                user(2, "Ben", "ben@air.com", "agent", "agent"),
                user(3, "Cy", "cy@air.com", "pax", "passenger"),
                user(4, "Di", "di@air.com", "pax", "passenger"),
            ]),
        );
        fixture.write(
            &fixture.database.reservations,
            json!([{
                "reservationId": 5,
                "passengerid": 3,
                "flightNumber": 101,
                "seatNumber": 2,
                "payment": {"method": "card", "details": "4111", "amount": 320}
            }]),
        );
        fixture
    }

    pub fn without_reservations(self) -> Self {
        self.write(&self.database.reservations, json!([]));
        self
    }

    pub fn write(&self, path: &std::path::Path, value: Value) {
        std::fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    pub fn read(&self, path: &std::path::Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    pub fn schedule(&self) -> Schedule {
        let fleet = AircraftSystem::load(&self.database.aircraft).unwrap();
        Schedule::load(&self.database, &fleet).unwrap()
    }

    /// Loads every subsystem the way the console does on start-up.
    pub fn load(&self) -> (AircraftSystem, Schedule, UserSystem, ReservationSystem) {
        let fleet = AircraftSystem::load(&self.database.aircraft).unwrap();
        let mut schedule = Schedule::load(&self.database, &fleet).unwrap();
        let users = UserSystem::load(&self.database.users).unwrap();
        let reservations = ReservationSystem::load(&self.database.reservations, &mut schedule).unwrap();
        (fleet, schedule, users, reservations)
    }
}

pub fn aircraft(model: &str, capacity: u32) -> Value {
    json!({
        "model": model,
        "capacity": capacity,
        "available": true,
        "lastMaintenance": "2024-01-01",
        "nextMaintenance": "2099-01-01"
    })
}

pub fn crew(id: u32, name: &str, role: &str, hours: f64) -> Value {
    json!({"crewID": id, "name": name, "role": role, "totalFlightHours": hours})
}

pub fn flight(number: u32, origin: &str, destination: &str, dep: &str, arr: &str, model: &str) -> Value {
    json!({
        "flightNumber": number,
        "origin": origin,
        "destination": destination,
        "status": "scheduled",
        "departureTime": dep,
        "arrivalTime": arr,
        "aircraftModel": model
    })
}

pub fn user(id: u32, name: &str, email: &str, password: &str, role: &str) -> Value {
    json!({"id": id, "name": name, "email": email, "password": password, "role": role})
}

pub fn payment(amount: u32) -> Payment {
    Payment {
        method: "card".into(),
        details: "4111".into(),
        amount,
    }
}
