use crate::config::Database;
use crate::error::Result;
use crate::store::read_values;
use serde_json::Value;
use std::fmt;
use tabled::Tabled;

const MISSING: &str = "N/A";

/// Read-only summaries, each built from a fresh read of the database files.
pub struct Reports<'a> {
    database: &'a Database,
}

#[derive(Debug, PartialEq)]
pub struct OperationalReport {
    pub flights: usize,
    pub reservations: usize,
}

impl fmt::Display for OperationalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Flights: {}", self.flights)?;
        write!(f, "Total Reservations: {}", self.reservations)
    }
}

#[derive(Debug, PartialEq, Tabled)]
pub struct MaintenanceRow {
    #[tabled(rename = "Aircraft")]
    pub model: String,
    #[tabled(rename = "Last maintenance")]
    pub last: String,
    #[tabled(rename = "Next maintenance")]
    pub next: String,
}

#[derive(Debug, PartialEq, Tabled)]
pub struct ActivityRow {
    #[tabled(rename = "Passenger")]
    pub passenger: String,
    #[tabled(rename = "Flight")]
    pub flight: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

/// Renders a scalar field, or `N/A` when absent or structured.
fn field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => MISSING.to_string(),
    }
}

impl<'a> Reports<'a> {
    pub fn new(database: &'a Database) -> Self {
        Reports { database }
    }

    pub fn operational(&self) -> Result<OperationalReport> {
        Ok(OperationalReport {
            flights: read_values(&self.database.flights)?.len(),
            reservations: read_values(&self.database.reservations)?.len(),
        })
    }

    pub fn maintenance(&self) -> Result<Vec<MaintenanceRow>> {
        Ok(read_values(&self.database.aircraft)?
            .iter()
            .map(|a| MaintenanceRow {
                model: field(a, "model"),
                last: field(a, "lastMaintenance"),
                next: field(a, "nextMaintenance"),
            })
            .collect())
    }

    /// One row per reservation; the passenger name comes from `Users.json`.
    pub fn user_activity(&self) -> Result<Vec<ActivityRow>> {
        let users = read_values(&self.database.users)?;
        let name_of = |id: &Value| {
            users
                .iter()
                .find(|u| u.get("id") == Some(id))
                .map(|u| field(u, "name"))
                .unwrap_or_else(|| MISSING.to_string())
        };

        Ok(read_values(&self.database.reservations)?
            .iter()
            .map(|r| ActivityRow {
                passenger: r
                    .get("passengerid")
                    .map(&name_of)
                    .unwrap_or_else(|| MISSING.to_string()),
                flight: field(r, "flightNumber"),
                status: field(r, "checkIn"),
            })
            .collect())
    }
}
