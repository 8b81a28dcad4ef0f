use crate::logging::Verbosity;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "airline-console", about = "Airline administration console")]
pub struct Args {
    /// Directory holding the JSON database files
    #[arg(short, long, value_name = "DIR", default_value = "database")]
    pub database: PathBuf,

    /// Reservations file, defaults to <DIR>/Reservations.json
    #[arg(short, long, value_name = "FILE")]
    pub reservations: Option<PathBuf>,

    /// Print long listings directly instead of piping them through a pager
    #[arg(long)]
    pub no_pager: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub struct Config {
    pub database: Database,
    pub pager: bool,
    pub verbosity: Verbosity,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let mut database = Database::new(&args.database);
        if let Some(path) = args.reservations {
            database.reservations = path;
        }
        Config {
            database,
            pager: !args.no_pager,
            verbosity: Verbosity::from_occurrences(args.verbose),
        }
    }
}

/// File locations of every collection. Each subsystem owns exactly one file.
#[derive(Clone, Debug, PartialEq)]
pub struct Database {
    pub aircraft: PathBuf,
    pub crew: PathBuf,
    pub flights: PathBuf,
    pub users: PathBuf,
    pub reservations: PathBuf,
}

impl Database {
    pub fn new(root: &Path) -> Self {
        Database {
            aircraft: root.join("Aircrafts.json"),
            crew: root.join("Crew.json"),
            flights: root.join("Flights.json"),
            users: root.join("Users.json"),
            reservations: root.join("Reservations.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let args = Args::parse_from(["airline-console"]);
        let config = Config::from(args);
        assert_eq!(
            config.database.flights,
            PathBuf::from("database/Flights.json")
        );
        assert_eq!(
            config.database.reservations,
            PathBuf::from("database/Reservations.json")
        );
        assert!(config.pager);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_reservations_override_and_flags() {
        let args = Args::parse_from([
            "airline-console",
            "--database",
            "/tmp/air",
            "--reservations",
            "reservation.json",
            "--no-pager",
            "-vv",
        ]);
        let config = Config::from(args);
        assert_eq!(config.database.users, PathBuf::from("/tmp/air/Users.json"));
        assert_eq!(
            config.database.reservations,
            PathBuf::from("reservation.json")
        );
        assert!(!config.pager);
        assert_eq!(config.verbosity, Verbosity::Verbose);
    }
}
