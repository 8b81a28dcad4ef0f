use crate::error::{Error, Result};
use crate::store::JsonStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tabled::Tabled;

pub type CrewId = u32;

pub const PILOT_ROLE: &str = "Pilot";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Crew {
    #[serde(rename = "crewID")]
    #[tabled(rename = "ID")]
    pub id: CrewId,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Role")]
    pub role: String,
    #[serde(rename = "totalFlightHours")]
    #[tabled(rename = "Flight hours")]
    total_flight_hours: f64,
}

impl Crew {
    /// Hours per day after which a crew member stops being assignable.
    pub const MAX_DAILY_HOURS: f64 = 5.0;

    #[cfg(test)]
    pub fn new(id: CrewId, name: &str, role: &str, total_flight_hours: f64) -> Self {
        Crew {
            id,
            name: name.to_string(),
            role: role.to_string(),
            total_flight_hours: total_flight_hours.max(0.0),
        }
    }

    pub fn total_flight_hours(&self) -> f64 {
        self.total_flight_hours
    }

    pub fn is_pilot(&self) -> bool {
        self.role == PILOT_ROLE
    }

    pub fn is_crew_available(&self) -> bool {
        self.total_flight_hours < Self::MAX_DAILY_HOURS
    }

    /// Adds `hours` if the member is still under the daily ceiling. The total
    /// may end above the ceiling after a long flight.
    pub fn assign_to_flight(&mut self, hours: i64) -> bool {
        if !self.is_crew_available() {
            return false;
        }
        self.total_flight_hours += hours.max(0) as f64;
        true
    }
}

/// Crew records and `Crew.json`.
pub struct CrewRoster {
    members: Vec<Crew>,
    store: JsonStore<Crew>,
}

impl CrewRoster {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let store = JsonStore::new(path);
        let members = store.load()?;
        Ok(CrewRoster { members, store })
    }

    pub fn find(&self, id: CrewId) -> Option<&Crew> {
        self.members.iter().find(|c| c.id == id)
    }

    pub fn find_mut(&mut self, id: CrewId) -> Result<&mut Crew> {
        self.members
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::CrewNotFound(id))
    }

    pub fn available_pilots(&self) -> Vec<&Crew> {
        self.members
            .iter()
            .filter(|c| c.is_pilot() && c.is_crew_available())
            .collect()
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.members)
    }
}
