use crate::error::{Error, Result};
use crate::flight::Flight;
use crate::store::JsonStore;
use crate::time::{format_date, today};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tabled::Tabled;
use tracing::{info, warn};

pub type AircraftModel = Arc<str>;

/// Default gap between a fresh aircraft's last and next maintenance.
const DEFAULT_MAINTENANCE_INTERVAL_MINUTES: i64 = 2900;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    #[tabled(rename = "Model")]
    pub model: AircraftModel,
    #[tabled(rename = "Capacity")]
    capacity: u32,
    #[tabled(rename = "Available")]
    available: bool,
    #[tabled(rename = "Last maintenance")]
    last_maintenance: NaiveDate,
    #[tabled(rename = "Next maintenance")]
    next_maintenance: NaiveDate,
}

impl Aircraft {
    /// A freshly serviced, available aircraft.
    pub fn new(model: &str, capacity: u32) -> Result<Self> {
        let last = today();
        let next = (last.and_time(chrono::NaiveTime::MIN)
            + Duration::minutes(DEFAULT_MAINTENANCE_INTERVAL_MINUTES))
        .date();
        Self::with_schedule(model, capacity, true, last, next)
    }

    pub fn with_schedule(
        model: &str,
        capacity: u32,
        available: bool,
        last_maintenance: NaiveDate,
        next_maintenance: NaiveDate,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        if next_maintenance < last_maintenance {
            return Err(Error::InvalidMaintenanceSchedule {
                last: format_date(last_maintenance),
                next: format_date(next_maintenance),
            });
        }
        Ok(Aircraft {
            model: Arc::from(model),
            capacity,
            available,
            last_maintenance,
            next_maintenance,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn last_maintenance(&self) -> NaiveDate {
        self.last_maintenance
    }

    pub fn next_maintenance(&self) -> NaiveDate {
        self.next_maintenance
    }

    pub fn is_maintained_on(&self, date: NaiveDate) -> bool {
        date <= self.next_maintenance
    }

    pub fn is_maintained(&self) -> bool {
        let maintained = self.is_maintained_on(today());
        if !maintained {
            warn!(
                model = %self.model,
                next = %self.next_maintenance,
                "aircraft needs maintenance, attend to it or update the maintenance schedule"
            );
        }
        maintained
    }

    pub fn is_available(&self) -> bool {
        self.is_maintained() && self.available
    }

    /// Commits both dates, or neither when the new window is out of order or
    /// would move the last maintenance backwards.
    pub fn update_maintenance_schedule(&mut self, new_last: NaiveDate, new_next: NaiveDate) -> Result<()> {
        if new_last < self.last_maintenance || new_last > new_next {
            return Err(Error::InvalidMaintenanceSchedule {
                last: format_date(new_last),
                next: format_date(new_next),
            });
        }
        self.last_maintenance = new_last;
        self.next_maintenance = new_next;
        Ok(())
    }
}

/// Owner of the fleet and of `Aircrafts.json`.
pub struct AircraftSystem {
    aircraft: Vec<Aircraft>,
    store: JsonStore<Aircraft>,
}

impl AircraftSystem {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let store = JsonStore::new(path);
        let aircraft = store.load()?;
        Ok(AircraftSystem { aircraft, store })
    }

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn find(&self, model: &str) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| &*a.model == model)
    }

    pub fn available(&self) -> impl Iterator<Item = &Aircraft> {
        self.aircraft.iter().filter(|a| a.is_available())
    }

    pub fn add_aircraft(&mut self, aircraft: Aircraft) -> Result<()> {
        info!(model = %aircraft.model, capacity = aircraft.capacity, "adding aircraft");
        self.aircraft.push(aircraft);
        self.save()
    }

    /// Removes by list position (0-based). Refused while one of `flights`
    /// flies the model and no other aircraft of that model remains.
    pub fn remove_aircraft(&mut self, index: usize, flights: &[Flight]) -> Result<Aircraft> {
        let model = match self.aircraft.get(index) {
            Some(aircraft) => aircraft.model.clone(),
            None => return Err(Error::NoSuchAircraft(index)),
        };
        let spares = self.aircraft.iter().filter(|a| a.model == model).count();
        if spares == 1 && flights.iter().any(|f| f.aircraft_model() == &*model) {
            return Err(Error::AircraftInUse(model.to_string()));
        }
        let removed = self.aircraft.remove(index);
        self.save()?;
        Ok(removed)
    }

    pub fn log_maintenance(&mut self, index: usize, last: NaiveDate, next: NaiveDate) -> Result<()> {
        let aircraft = self
            .aircraft
            .get_mut(index)
            .ok_or(Error::NoSuchAircraft(index))?;
        aircraft.update_maintenance_schedule(last, next)?;
        self.save()
    }

    fn save(&self) -> Result<()> {
        self.store.save(&self.aircraft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::FlightStatus;
    use crate::time::parse_date;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn a320() -> Aircraft {
        Aircraft::with_schedule("A320", 150, true, date("2024-01-10"), date("2024-07-10")).unwrap()
    }

    #[test]
    fn test_maintenance_window() {
        let aircraft = a320();
        assert!(aircraft.is_maintained_on(date("2024-07-10")));
        assert!(!aircraft.is_maintained_on(date("2024-07-11")));
    }

    #[test]
    fn test_overdue_aircraft_is_not_maintained() {
        let aircraft = a320();
        assert!(!aircraft.is_maintained());
        assert!(!aircraft.is_available());
    }

    #[test]
    fn test_new_aircraft_is_available() {
        let aircraft = Aircraft::new("B737", 180).unwrap();
        assert!(aircraft.is_maintained());
        assert!(aircraft.is_available());
        assert!(aircraft.next_maintenance() >= aircraft.last_maintenance());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(Aircraft::new("tiny", 0), Err(Error::InvalidCapacity)));
    }

    #[test]
    fn test_update_schedule_rejects_backwards_last() {
        let mut aircraft = a320();
        let res = aircraft.update_maintenance_schedule(date("2024-01-09"), date("2024-09-01"));
        assert!(matches!(res, Err(Error::InvalidMaintenanceSchedule { .. })));
        assert_eq!(aircraft.last_maintenance(), date("2024-01-10"));
        assert_eq!(aircraft.next_maintenance(), date("2024-07-10"));
    }

    #[test]
    fn test_update_schedule_rejects_inverted_window() {
        let mut aircraft = a320();
        let res = aircraft.update_maintenance_schedule(date("2024-08-01"), date("2024-07-31"));
        assert!(res.is_err());
        assert_eq!(aircraft.next_maintenance(), date("2024-07-10"));
    }

    #[test]
    fn test_update_schedule_commits_both() {
        let mut aircraft = a320();
        aircraft
            .update_maintenance_schedule(date("2024-01-10"), date("2024-01-10"))
            .unwrap();
        assert_eq!(aircraft.last_maintenance(), date("2024-01-10"));
        assert_eq!(aircraft.next_maintenance(), date("2024-01-10"));

        aircraft
            .update_maintenance_schedule(date("2024-03-01"), date("2099-03-01"))
            .unwrap();
        assert_eq!(aircraft.last_maintenance(), date("2024-03-01"));
        assert_eq!(aircraft.next_maintenance(), date("2099-03-01"));
        assert!(aircraft.is_maintained());
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(a320()).unwrap();
        assert_eq!(json["model"], "A320");
        assert_eq!(json["capacity"], 150);
        assert_eq!(json["available"], true);
        assert_eq!(json["lastMaintenance"], "2024-01-10");
        assert_eq!(json["nextMaintenance"], "2024-07-10");
    }

    #[test]
    fn test_system_write_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Aircrafts.json");
        std::fs::write(&path, "[]").unwrap();

        let mut fleet = AircraftSystem::load(&path).unwrap();
        fleet.add_aircraft(a320()).unwrap();
        fleet.add_aircraft(Aircraft::new("B737", 180).unwrap()).unwrap();
        fleet
            .log_maintenance(0, date("2024-02-01"), date("2099-02-01"))
            .unwrap();

        let reloaded = AircraftSystem::load(&path).unwrap();
        assert_eq!(reloaded.aircraft(), fleet.aircraft());
        assert_eq!(reloaded.find("A320").unwrap().next_maintenance(), date("2099-02-01"));

        fleet.remove_aircraft(0, &[]).unwrap();
        let reloaded = AircraftSystem::load(&path).unwrap();
        assert_eq!(reloaded.aircraft().len(), 1);
        assert!(reloaded.find("A320").is_none());
    }

    #[test]
    fn test_remove_refused_while_a_flight_needs_the_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Aircrafts.json");
        std::fs::write(&path, "[]").unwrap();
        let mut fleet = AircraftSystem::load(&path).unwrap();
        fleet.add_aircraft(Aircraft::new("A320", 4).unwrap()).unwrap();
        fleet.add_aircraft(Aircraft::new("A320", 6).unwrap()).unwrap();

        let flight = Flight::new(
            101,
            "NYC",
            "LAX",
            FlightStatus::Scheduled,
            &fleet.aircraft()[0],
            crate::time::parse_date_time("2030-06-01 14:30").unwrap(),
            crate::time::parse_date_time("2030-06-01 20:00").unwrap(),
        )
        .unwrap();
        let flights = vec![flight];

        fleet.remove_aircraft(0, &flights).unwrap();
        assert!(matches!(
            fleet.remove_aircraft(0, &flights),
            Err(Error::AircraftInUse(model)) if model == "A320"
        ));
        assert_eq!(AircraftSystem::load(&path).unwrap().aircraft().len(), 1);
        fleet.remove_aircraft(0, &[]).unwrap();
    }

    #[test]
    fn test_system_bad_index_and_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Aircrafts.json");
        std::fs::write(&path, "[]").unwrap();
        let mut fleet = AircraftSystem::load(&path).unwrap();
        fleet.add_aircraft(a320()).unwrap();

        assert!(matches!(fleet.remove_aircraft(3, &[]), Err(Error::NoSuchAircraft(3))));
        assert!(fleet
            .log_maintenance(0, date("2023-01-01"), date("2099-01-01"))
            .is_err());
        let reloaded = AircraftSystem::load(&path).unwrap();
        assert_eq!(reloaded.find("A320").unwrap().last_maintenance(), date("2024-01-10"));
    }
}
