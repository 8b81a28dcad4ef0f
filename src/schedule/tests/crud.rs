use crate::aircraft::AircraftSystem;
use crate::error::Error;
use crate::flight::{Flight, FlightStatus};
use crate::schedule::tests::utils::{Fixture, aircraft, flight};
use crate::schedule::Schedule;
use crate::time::parse_date_time;
use serde_json::json;

#[test]
fn test_load_restores_flights() {
    let fx = Fixture::standard();
    let schedule = fx.schedule();

    assert_eq!(schedule.flights().len(), 3);
    let f = schedule.flight(103).unwrap();
    assert_eq!(f.aircraft_model(), "B737");
    assert_eq!(f.seats().capacity(), 6);
    assert_eq!(f.departure_time(), parse_date_time("2024-06-01 08:00").unwrap());
    assert!(f.crew().is_empty());
}

#[test]
fn test_load_keeps_crew_ids_without_charging() {
    let fx = Fixture::standard();
    let mut f = flight(101, "NYC", "LAX", "2024-06-01 14:30", "2024-06-01 20:00", "A320");
    f["crewIDs"] = json!([1, 2]);
    fx.write(&fx.database.flights, json!([f]));

    let schedule = fx.schedule();
    assert_eq!(schedule.flight(101).unwrap().crew(), &[1, 2]);
    assert_eq!(schedule.crew().find(1).unwrap().total_flight_hours(), 0.0);
}

#[test]
fn test_load_accepts_bare_dates() {
    let fx = Fixture::standard();
    fx.write(
        &fx.database.flights,
        json!([flight(7, "A", "B", "2024-06-01", "2024-06-02", "A320")]),
    );
    let schedule = fx.schedule();
    assert_eq!(schedule.required_pilots(7).unwrap(), 5);
}

#[test]
fn test_load_rejects_unknown_model() {
    let fx = Fixture::standard();
    fx.write(
        &fx.database.flights,
        json!([flight(7, "A", "B", "2024-06-01 08:00", "2024-06-01 09:00", "Concorde")]),
    );
    let fleet = AircraftSystem::load(&fx.database.aircraft).unwrap();
    let res = Schedule::load(&fx.database, &fleet);
    assert!(matches!(res, Err(Error::UnknownAircraft(m)) if m == "Concorde"));
}

#[test]
fn test_add_flight_persists() {
    let fx = Fixture::standard();
    let mut schedule = fx.schedule();
    let fleet = AircraftSystem::load(&fx.database.aircraft).unwrap();

    let new = Flight::new(
        200,
        "SFO",
        "SEA",
        FlightStatus::Scheduled,
        fleet.find("B737").unwrap(),
        parse_date_time("2030-01-01 10:00").unwrap(),
        parse_date_time("2030-01-01 12:00").unwrap(),
    )
    .unwrap();
    schedule.add_flight(new).unwrap();

    let stored = fx.read(&fx.database.flights);
    assert_eq!(stored.as_array().unwrap().len(), 4);
    assert_eq!(stored[3]["flightNumber"], 200);
    assert_eq!(stored[3]["departureTime"], "2030-01-01 10:00");
    assert_eq!(stored[3]["aircraftModel"], "B737");
    assert_eq!(fx.schedule().flight(200).unwrap().destination, "SEA");
}

#[test]
fn test_add_duplicate_number_rejected() {
    let fx = Fixture::standard();
    let mut schedule = fx.schedule();
    let fleet = AircraftSystem::load(&fx.database.aircraft).unwrap();
    let dup = Flight::new(
        101,
        "X",
        "Y",
        FlightStatus::Scheduled,
        fleet.find("A320").unwrap(),
        parse_date_time("2030-01-01 10:00").unwrap(),
        parse_date_time("2030-01-01 11:00").unwrap(),
    )
    .unwrap();
    assert!(matches!(schedule.add_flight(dup), Err(Error::DuplicateFlight(101))));
    assert_eq!(schedule.flights().len(), 3);
}

#[test]
fn test_remove_flight() {
    let fx = Fixture::standard();
    let mut schedule = fx.schedule();
    assert_eq!(schedule.remove_flight(102).unwrap().origin, "LAX");
    assert!(matches!(schedule.remove_flight(102), Err(Error::FlightNotFound(102))));
    assert!(fx.schedule().flight(102).is_none());
}

#[test]
fn test_update_status_persists() {
    let fx = Fixture::standard();
    let mut schedule = fx.schedule();
    schedule.update_status(101, FlightStatus::Delayed).unwrap();
    assert_eq!(fx.read(&fx.database.flights)[0]["status"], "delayed");
    assert_eq!(fx.schedule().flight(101).unwrap().status(), FlightStatus::Delayed);
    assert!(matches!(
        schedule.update_status(999, FlightStatus::OnTime),
        Err(Error::FlightNotFound(999))
    ));
}

#[test]
fn test_change_aircraft_persists() {
    let fx = Fixture::standard();
    let mut schedule = fx.schedule();
    let fleet = AircraftSystem::load(&fx.database.aircraft).unwrap();
    schedule.change_aircraft(102, fleet.find("B737").unwrap()).unwrap();

    assert_eq!(fx.read(&fx.database.flights)[1]["aircraftModel"], "B737");
    // a reload sizes the seat map from the new aircraft
    assert_eq!(fx.schedule().flight(102).unwrap().seats().capacity(), 6);
}

#[test]
fn test_overdue_aircraft_still_loads() {
    let fx = Fixture::standard();
    let mut a320 = aircraft("A320", 4);
    a320["nextMaintenance"] = json!("2020-01-01");
    a320["lastMaintenance"] = json!("2019-01-01");
    fx.write(&fx.database.aircraft, json!([a320, aircraft("B737", 6)]));
    assert_eq!(fx.schedule().flights().len(), 3);
}
