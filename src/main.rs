use crate::airline::AirlineSystem;
use crate::config::{Args, Config};
use crate::console::TerminalConsole;
use crate::logging::init_logging;
use clap::Parser;
use tracing::info;

mod aircraft;
mod airline;
mod checkin;
mod config;
mod console;
mod crew;
mod error;
mod flight;
mod logging;
mod reports;
mod reservation;
mod reservation_system;
mod schedule;
mod seat_map;
mod store;
mod time;
mod user;
mod user_system;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from(Args::parse());
    init_logging(config.verbosity);
    info!(reservations = %config.database.reservations.display(), "starting airline console");

    let console = TerminalConsole::new(config.pager)?;
    let mut airline = AirlineSystem::load(config.database, console)?;
    airline.run()?;
    Ok(())
}
