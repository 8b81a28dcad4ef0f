use crate::aircraft::{Aircraft, AircraftSystem};
use crate::checkin::{BoardingPass, check_in, checkin_status};
use crate::config::Database;
use crate::console::{Console, failure, heading, success, table};
use crate::error::{Error, Result};
use crate::flight::{Flight, FlightNumber, FlightStatus};
use crate::reports::Reports;
use crate::reservation::{Payment, ReservationId};
use crate::reservation_system::{BookingRequest, ReservationSystem};
use crate::schedule::Schedule;
use crate::time::{format_date, parse_date, parse_date_time};
use crate::user::{Role, User, UserId};
use crate::user_system::{UserSystem, UserUpdate};
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;
use tracing::{debug, info};

/// Every subsystem plus the console driving them.
pub struct AirlineSystem<C: Console> {
    console: C,
    database: Database,
    fleet: AircraftSystem,
    schedule: Schedule,
    users: UserSystem,
    reservations: ReservationSystem,
}

impl<C: Console> AirlineSystem<C> {
    pub fn load(database: Database, console: C) -> Result<Self> {
        let fleet = AircraftSystem::load(&database.aircraft)?;
        let mut schedule = Schedule::load(&database, &fleet)?;
        let users = UserSystem::load(&database.users)?;
        let reservations = ReservationSystem::load(&database.reservations, &mut schedule)?;
        info!(
            aircraft = fleet.aircraft().len(),
            flights = schedule.flights().len(),
            users = users.users().len(),
            reservations = reservations.reservations().len(),
            "database loaded"
        );
        Ok(AirlineSystem {
            console,
            database,
            fleet,
            schedule,
            users,
            reservations,
        })
    }

    /// Login, role menu, logout, repeat. Ends on `exit` or closed input.
    pub fn run(&mut self) -> Result<()> {
        match self.sessions() {
            Err(Error::InputClosed) => {
                debug!("input closed");
                Ok(())
            }
            other => other,
        }
    }

    fn sessions(&mut self) -> Result<()> {
        while let Some(user) = self.login()? {
            match user.role() {
                Role::Admin => self.admin_menu()?,
                Role::Agent => self.agent_menu()?,
                Role::Passenger => self.passenger_menu(&user)?,
            }
            self.console.print("Logging out...");
        }
        self.console.print("Goodbye.");
        Ok(())
    }

    fn login(&mut self) -> Result<Option<User>> {
        self.console.print(&heading("-- Welcome to the Airline Reservation System --"));
        self.console.print(" ------ Login Page -------");
        self.console.set_completions(vec!["exit".to_string()]);
        loop {
            let email = self.ask(" Enter your email (or 'exit'): ")?;
            if email == "exit" {
                return Ok(None);
            }
            let password = self.ask(" Enter password: ")?;
            match self.users.login(&email, &password) {
                Some(user) => {
                    self.console
                        .print(&success(&format!("Login successful as {}!", user.role())));
                    return Ok(Some(user));
                }
                None => self
                    .console
                    .print(&failure(" Wrong email or password. Please try again.")),
            }
        }
    }

    // === Admin ===

    fn admin_menu(&mut self) -> Result<()> {
        loop {
            let options = ["Manage Flights", "Manage Aircraft", "Manage Users", "Generate Reports", "Logout"];
            match self.menu("Admin Menu", &options)? {
                1 => self.manage_flights()?,
                2 => self.manage_aircraft()?,
                3 => self.manage_users()?,
                4 => self.generate_reports()?,
                _ => return Ok(()),
            }
        }
    }

    fn manage_flights(&mut self) -> Result<()> {
        loop {
            let options = ["Add Flight", "Remove Flight", "Update existing Flight", "View All Flights", "Back to Admin Menu"];
            let res = match self.menu("Manage Flights", &options)? {
                1 => self.add_flight(),
                2 => self.remove_flight(),
                3 => self.update_flight(),
                4 => {
                    self.list_flights();
                    Ok(())
                }
                _ => return Ok(()),
            };
            self.settle(res)?;
        }
    }

    fn add_flight(&mut self) -> Result<()> {
        let number: FlightNumber = loop {
            let number = self.ask_parsed("Enter flight number: ")?;
            if self.schedule.flight(number).is_none() {
                break number;
            }
            self.console
                .print(&failure("Flight number already exists. Try a different number."));
        };
        let origin = self.ask("Enter origin: ")?;
        let destination = self.ask("Enter destination: ")?;
        self.console.set_completions(vec![]);
        let status = self.ask_status()?;
        let departure = self.ask_date_time("Enter departure time (YYYY-MM-DD HH:MM): ")?;
        let arrival = loop {
            let arrival = self.ask_date_time("Enter arrival time (YYYY-MM-DD HH:MM): ")?;
            if arrival > departure {
                break arrival;
            }
            self.console
                .print(&failure("Arrival time must be after departure time. Please try again."));
        };

        let models: Vec<String> = self.fleet.aircraft().iter().map(|a| a.model.to_string()).collect();
        self.console.set_completions(models);
        let model = loop {
            let model = self.ask("Enter aircraft model (type 'list' to see available models): ")?;
            if model == "list" {
                let available: Vec<String> = self.fleet.available().map(|a| format!("- {}", a.model)).collect();
                self.console.print("Available aircraft models:");
                self.console.print(&available.join("\n"));
                continue;
            }
            if self.fleet.find(&model).is_some() {
                break model;
            }
            self.console.print(&failure(
                "Aircraft model not found. Please try again (type 'list' to see available models).",
            ));
        };
        let aircraft = self
            .fleet
            .find(&model)
            .ok_or_else(|| Error::UnknownAircraft(model.clone()))?;

        let flight = Flight::new(number, &origin, &destination, status, aircraft, departure, arrival)?;
        self.schedule.add_flight(flight)?;
        self.console.print(&success("Flight successfully added."));
        Ok(())
    }

    fn remove_flight(&mut self) -> Result<()> {
        let number = self.ask_flight_number("Enter flight number: ")?;
        self.schedule.remove_flight(number)?;
        self.console.print(&success("Flight removed successfully."));
        Ok(())
    }

    fn update_flight(&mut self) -> Result<()> {
        let number = self.ask_flight_number("Enter flight number to update: ")?;
        let flight = self.schedule.flight(number).ok_or(Error::FlightNotFound(number))?;
        let details = flight.flight_details();
        let previous = flight.status();

        let options = ["Flight Details", "Crew Assignments", "Status", "Aircraft", "Back"];
        match self.menu("Select update option", &options)? {
            1 => self.console.print(&details),
            2 => self.select_crew(number)?,
            3 => {
                let status = self.ask_status()?;
                self.schedule.update_status(number, status)?;
                self.console
                    .print(&success(&format!("Status changed from {} to {}.", previous, status)));
            }
            4 => {
                let index = self.choose_aircraft()?;
                let aircraft = &self.fleet.aircraft()[index];
                self.schedule.change_aircraft(number, aircraft)?;
                self.console.print(&success("Aircraft updated."));
            }
            _ => {}
        }
        Ok(())
    }

    fn ask_status(&mut self) -> Result<FlightStatus> {
        let choices: Vec<String> = FlightStatus::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}: {}", i + 1, s))
            .collect();
        self.console
            .set_completions(FlightStatus::ALL.iter().map(|s| s.to_string()).collect());
        self.ask_parsed(&format!("Enter status ({}): ", choices.join(", ")))
    }

    /// Offers available pilots until the flight has its required count, the
    /// operator enters 0, or nobody is left to pick.
    fn select_crew(&mut self, number: FlightNumber) -> Result<()> {
        let required = self.schedule.required_pilots(number)?;
        self.console
            .print(&format!("Flight {} needs {} pilot(s).", number, required));
        if let Some(flight) = self.schedule.flight(number) {
            let on_board: Vec<String> = flight
                .crew()
                .iter()
                .map(|id| match self.schedule.crew().find(*id) {
                    Some(member) => format!("{} ({})", member.name, id),
                    None => id.to_string(),
                })
                .collect();
            if !on_board.is_empty() {
                self.console.print(&format!("Already assigned: {}", on_board.join(", ")));
            }
        }

        let mut assigned = 0;
        while assigned < required {
            let pilots = self.schedule.available_pilots();
            if pilots.is_empty() {
                self.console.print(&failure("No available pilots."));
                break;
            }
            let listing = table(pilots.iter().copied().cloned());
            let ids = pilots.iter().map(|p| p.id.to_string()).collect();
            self.console.print("Available Pilots:");
            self.console.print(&listing);
            self.console.set_completions(ids);

            let id: u32 = self.ask_parsed("Select Pilot by ID (0 to finish): ")?;
            if id == 0 {
                break;
            }
            match self.schedule.assign_pilot(number, id) {
                Ok(()) => {
                    assigned += 1;
                    self.console.print(&success("Pilot assigned."));
                }
                Err(e) => self
                    .console
                    .print(&failure(&format!("Failed to assign pilot: {}", e))),
            }
        }

        let summary = match assigned {
            0 => "No pilots assigned.".to_string(),
            n if n < required => format!("Assigned {} of {} required pilots.", n, required),
            _ => "All required pilots assigned.".to_string(),
        };
        self.console.print(&summary);
        Ok(())
    }

    fn list_flights(&mut self) {
        if self.schedule.flights().is_empty() {
            self.console.print("No flights.");
            return;
        }
        let listing = table(self.schedule.flights().iter().map(Flight::row));
        self.console.page(&listing);
    }

    fn manage_aircraft(&mut self) -> Result<()> {
        loop {
            let options = [
                "Add New Aircraft",
                "Remove Aircraft",
                "Log Aircraft Maintenance",
                "Display all aircraft",
                "Back to Admin Menu",
            ];
            let res = match self.menu("Manage Aircraft", &options)? {
                1 => self.add_aircraft(),
                2 => self.remove_aircraft(),
                3 => self.log_maintenance(),
                4 => {
                    let listing = table(self.fleet.aircraft().iter().cloned());
                    self.console.page(&listing);
                    Ok(())
                }
                _ => return Ok(()),
            };
            self.settle(res)?;
        }
    }

    fn add_aircraft(&mut self) -> Result<()> {
        self.console.set_completions(vec![]);
        let model = self.ask("Enter aircraft model: ")?;
        let capacity: u32 = loop {
            let capacity = self.ask_parsed("Enter aircraft capacity: ")?;
            if capacity > 0 {
                break capacity;
            }
            self.console.print(&failure(&Error::InvalidCapacity.to_string()));
        };
        self.fleet.add_aircraft(Aircraft::new(&model, capacity)?)?;
        self.console.print(&success("Aircraft added successfully."));
        Ok(())
    }

    fn remove_aircraft(&mut self) -> Result<()> {
        let index = self.choose_aircraft()?;
        let removed = self.fleet.remove_aircraft(index, self.schedule.flights())?;
        self.console
            .print(&success(&format!("Aircraft {} removed successfully.", removed.model)));
        Ok(())
    }

    fn log_maintenance(&mut self) -> Result<()> {
        let index = self.choose_aircraft()?;
        let last = self.ask_date("Enter last maintenance date (YYYY-MM-DD): ")?;
        let next = self.ask_date("Enter next maintenance date (YYYY-MM-DD): ")?;
        self.fleet.log_maintenance(index, last, next)?;
        self.console.print(&success("Maintenance logged successfully."));
        Ok(())
    }

    /// Numbered pick from the fleet; returns the list index.
    fn choose_aircraft(&mut self) -> Result<usize> {
        let listing: Vec<String> = self
            .fleet
            .aircraft()
            .iter()
            .enumerate()
            .map(|(i, a)| {
                format!(
                    "{}. {} ({} seats, maintained {} until {})",
                    i + 1,
                    a.model,
                    a.capacity(),
                    format_date(a.last_maintenance()),
                    format_date(a.next_maintenance())
                )
            })
            .collect();
        self.console.print("Aircraft:");
        self.console.print(&listing.join("\n"));
        self.console
            .set_completions((1..=listing.len()).map(|i| i.to_string()).collect());
        let choice: usize = self.ask_parsed("Enter the number of the aircraft to select: ")?;
        if choice == 0 || choice > listing.len() {
            return Err(Error::NoSuchAircraft(choice));
        }
        Ok(choice - 1)
    }

    fn manage_users(&mut self) -> Result<()> {
        loop {
            let options = ["Add User", "Remove User", "Update User", "View All Users", "Back to Admin Menu"];
            let res = match self.menu("Manage Users", &options)? {
                1 => self.add_user(),
                2 => self.remove_user(),
                3 => self.update_user(),
                4 => {
                    let listing = table(self.users.users().iter().map(User::row));
                    self.console.page(&listing);
                    Ok(())
                }
                _ => return Ok(()),
            };
            self.settle(res)?;
        }
    }

    fn add_user(&mut self) -> Result<()> {
        self.console.set_completions(vec![]);
        let name = self.ask("Enter name: ")?;
        let email = loop {
            let email = self.ask("Enter email: ")?;
            if self.users.is_email_unique(&email) {
                break email;
            }
            self.console
                .print(&failure("Email already exists. Please use a different email."));
        };
        let password = self.ask("Enter password: ")?;
        let role: Role = self.ask_parsed("Enter role (1) admin / (2) agent / (3) passenger: ")?;
        let id = self.users.add_user(&name, &email, &password, role)?;
        self.console
            .print(&success(&format!("User added successfully with ID {}.", id)));
        Ok(())
    }

    fn remove_user(&mut self) -> Result<()> {
        let id: UserId = self.ask_parsed("Enter User ID to remove: ")?;
        let removed = self.users.remove_user(id)?;
        self.console
            .print(&success(&format!("User {} removed successfully.", removed.name())));
        Ok(())
    }

    fn update_user(&mut self) -> Result<()> {
        let id: UserId = self.ask_parsed("Enter User ID: ")?;
        if self.users.find(id).is_none() {
            return Err(Error::UserNotFound(id));
        }
        let update = UserUpdate {
            name: self.ask_optional("Enter new name (or press Enter to skip): ")?,
            email: self.ask_optional("Enter new email (or press Enter to skip): ")?,
            password: self.ask_optional("Enter new password (or press Enter to skip): ")?,
        };
        self.users.update_user(id, update)?;
        self.console.print(&success("User updated successfully."));
        Ok(())
    }

    fn generate_reports(&mut self) -> Result<()> {
        loop {
            let options = ["Operational Report", "Maintenance Report", "User Activity Report", "Back to Admin Menu"];
            let choice = self.menu("Generate Reports", &options)?;
            let reports = Reports::new(&self.database);
            let res = match choice {
                1 => reports.operational().map(|r| r.to_string()),
                2 => reports.maintenance().map(table),
                3 => reports.user_activity().map(table),
                _ => return Ok(()),
            };
            let res = res.map(|text| self.console.page(&text));
            self.settle(res)?;
        }
    }

    // === Booking agent ===

    fn agent_menu(&mut self) -> Result<()> {
        loop {
            let options = ["Book Flight", "Remove Booking", "Modify Booking", "View All Bookings", "Logout"];
            let res = match self.menu("Booking Agent Menu", &options)? {
                1 => self.book_flight(),
                2 => self.remove_booking(),
                3 => self.modify_booking(),
                4 => {
                    self.list_bookings();
                    Ok(())
                }
                _ => return Ok(()),
            };
            self.settle(res)?;
        }
    }

    fn book_flight(&mut self) -> Result<()> {
        self.console.set_completions(vec![]);
        let passenger_id: UserId = self.ask_parsed("Enter Passenger ID: ")?;
        self.users.passenger(passenger_id)?;
        let flight_number = self.ask_flight_number("Enter Flight Number: ")?;
        let flight = self
            .schedule
            .flight(flight_number)
            .ok_or(Error::FlightNotFound(flight_number))?;
        let free: Vec<String> = flight.seats().available_seats().map(|s| s.to_string()).collect();
        self.console.print(&format!("Available seats: {}", free.join(", ")));
        self.console.set_completions(free);

        let seat_number: u32 = self.ask_parsed("Enter Seat Number: ")?;
        self.console.set_completions(vec![]);
        let free = self
            .schedule
            .flight(flight_number)
            .is_some_and(|f| f.seats().is_available(seat_number));
        if !free {
            return Err(Error::SeatUnavailable {
                flight: flight_number,
                seat: seat_number,
            });
        }
        let method = self.ask("Enter Payment Method: ")?;
        let details = self.ask("Enter Payment Details: ")?;
        let amount: u32 = self.ask_parsed("Enter Amount: ")?;

        let id = self.reservations.book(
            &self.users,
            &mut self.schedule,
            BookingRequest {
                passenger_id,
                flight_number,
                seat_number,
                payment: Payment { method, details, amount },
            },
        )?;
        if let Some(reservation) = self.reservations.get(id) {
            let confirmation = reservation.confirmation(self.schedule.flight(flight_number));
            self.console.print(&success(&confirmation));
        }
        self.console.print("Booking completed.");
        Ok(())
    }

    fn list_bookings(&mut self) {
        if self.reservations.reservations().is_empty() {
            self.console.print("No reservations.");
            return;
        }
        let listing = table(self.reservations.reservations().iter().map(|r| r.row()));
        self.console.page(&listing);
    }

    fn remove_booking(&mut self) -> Result<()> {
        let id: ReservationId = self.ask_parsed("Enter Reservation ID to cancel: ")?;
        let notice = self.reservations.remove_booking(id, &mut self.schedule)?;
        self.console.print(&notice);
        self.console
            .print(&success(&format!("Cancellation successful for Reservation ID: {}", id)));
        Ok(())
    }

    fn modify_booking(&mut self) -> Result<()> {
        let id: ReservationId = self.ask_parsed("Enter Reservation ID to modify: ")?;
        let seat: u32 = self.ask_parsed("Enter new Seat Number: ")?;
        self.reservations.modify_booking(id, seat, &mut self.schedule)?;
        self.console.print(&success(&format!(
            "Reservation ID: {} is modified with new seat number: {}",
            id, seat
        )));
        Ok(())
    }

    // === Passenger ===

    fn passenger_menu(&mut self, user: &User) -> Result<()> {
        if !user.check_access_level(Role::Passenger) {
            return Err(Error::NotAPassenger(user.id()));
        }
        loop {
            let options = [
                "Search Flights",
                "Display Reservations",
                "Check-in",
                "Check-in Status",
                "Cancel Reservation",
                "Logout",
            ];
            let res = match self.menu("Passenger Menu", &options)? {
                1 => self.search_flights(),
                2 => {
                    self.display_reservations(user.id());
                    Ok(())
                }
                3 => self.passenger_check_in(user.id()),
                4 => self.show_checkin_status(user.id()),
                5 => self.cancel_reservation(user.id()),
                _ => return Ok(()),
            };
            self.settle(res)?;
        }
    }

    fn search_flights(&mut self) -> Result<()> {
        let mut airports: Vec<String> = self
            .schedule
            .flights()
            .iter()
            .flat_map(|f| [f.origin.clone(), f.destination.clone()])
            .collect();
        airports.sort();
        airports.dedup();
        self.console.set_completions(airports);

        let origin = self.ask("Enter origin: ")?;
        let destination = self.ask("Enter destination: ")?;
        let date = self.ask_date("Enter date (YYYY-MM-DD): ")?;
        let found: Vec<String> = self
            .schedule
            .search(&origin, &destination, date.and_time(chrono::NaiveTime::MIN))
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{}. {}", i + 1, f.flight_details()))
            .collect();
        if found.is_empty() {
            self.console.print("No Flights available.");
        } else {
            self.console.print("Available Flights:");
            self.console.page(&found.join("\n"));
        }
        Ok(())
    }

    fn display_reservations(&mut self, passenger_id: UserId) {
        let listing: Vec<String> = self
            .reservations
            .for_passenger(passenger_id)
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {}", i + 1, r.describe(self.schedule.flight(r.flight_number))))
            .collect();
        if listing.is_empty() {
            self.console
                .print(&format!("No reservations found for Passenger ID: {}", passenger_id));
            return;
        }
        self.console.print("Your Reservations:");
        self.console.page(&listing.join("\n-----------------------\n"));
    }

    /// A reservation id typed by `passenger_id`, rejected unless it is theirs.
    fn ask_own_reservation(&mut self, passenger_id: UserId, prompt: &str) -> Result<ReservationId> {
        let owned: Vec<String> = self
            .reservations
            .for_passenger(passenger_id)
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        self.console.set_completions(owned);
        let id: ReservationId = self.ask_parsed(prompt)?;
        match self.reservations.check_reservation(passenger_id, id, &self.schedule) {
            Some((flight, seat)) => {
                self.console.print(&format!("Flight: {}\nSeat Number: {}", flight, seat));
                Ok(id)
            }
            None if self.reservations.get(id).is_some() => Err(Error::NotReservationOwner {
                reservation: id,
                passenger: passenger_id,
            }),
            None => Err(Error::ReservationNotFound(id)),
        }
    }

    fn passenger_check_in(&mut self, passenger_id: UserId) -> Result<()> {
        let id = self.ask_own_reservation(passenger_id, "Enter your Reservation ID for check-in: ")?;
        check_in(&mut self.reservations, id)?;
        self.console.print(&success(&format!(
            "Airport check-in completed for reservation ID: {}",
            id
        )));
        let pass = BoardingPass::issue(id, &self.reservations, &self.schedule, &self.users)?;
        self.console.print(&pass.to_string());
        Ok(())
    }

    fn show_checkin_status(&mut self, passenger_id: UserId) -> Result<()> {
        let id = self.ask_own_reservation(passenger_id, "Enter your Reservation ID: ")?;
        let status = checkin_status(id, &self.reservations, &self.schedule)?;
        self.console.print(&status.to_string());
        Ok(())
    }

    fn cancel_reservation(&mut self, passenger_id: UserId) -> Result<()> {
        let owned: Vec<String> = self
            .reservations
            .for_passenger(passenger_id)
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        self.console.set_completions(owned);
        let id: ReservationId = self.ask_parsed("Enter your Reservation ID: ")?;
        let notice = self
            .reservations
            .cancel_reservation(passenger_id, id, &mut self.schedule)?;
        self.console.print(&notice);
        self.console
            .print(&success(&format!("Cancellation successful for Reservation ID: {}", id)));
        Ok(())
    }

    // === Input ===

    /// Prints a failed action and carries on; only a dead terminal propagates.
    fn settle(&mut self, res: Result<()>) -> Result<()> {
        match res {
            Ok(()) => Ok(()),
            Err(e @ (Error::InputClosed | Error::Terminal(_))) => Err(e),
            Err(e) => {
                if !e.is_user_error() {
                    tracing::error!(error = %e, "database operation failed");
                }
                self.console.print(&failure(&format!("Error: {}", e)));
                Ok(())
            }
        }
    }

    /// Shows a numbered menu until a listed option is chosen.
    fn menu(&mut self, title: &str, options: &[&str]) -> Result<usize> {
        loop {
            self.console.print(&heading(&format!("--- {} ---", title)));
            let lines: Vec<String> = options
                .iter()
                .enumerate()
                .map(|(i, o)| format!("{}. {}", i + 1, o))
                .collect();
            self.console.print(&lines.join("\n"));
            self.console
                .set_completions((1..=options.len()).map(|i| i.to_string()).collect());
            match self.ask("Enter your choice: ")?.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(choice),
                _ => self.console.print(&failure("Invalid choice. Please try again.")),
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.console.read_line(prompt)?.ok_or(Error::InputClosed)
    }

    /// `None` for an empty answer.
    fn ask_optional(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer = self.ask(prompt)?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    fn ask_parsed<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        loop {
            match self.ask(prompt)?.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.console.print(&failure("Invalid input. Please try again.")),
            }
        }
    }

    fn ask_flight_number(&mut self, prompt: &str) -> Result<FlightNumber> {
        let numbers = self
            .schedule
            .flights()
            .iter()
            .map(|f| f.number.to_string())
            .collect();
        self.console.set_completions(numbers);
        self.ask_parsed(prompt)
    }

    fn ask_date(&mut self, prompt: &str) -> Result<NaiveDate> {
        loop {
            match parse_date(&self.ask(prompt)?) {
                Ok(date) => return Ok(date),
                Err(e) => self.console.print(&failure(&format!("{}. Use YYYY-MM-DD.", e))),
            }
        }
    }

    fn ask_date_time(&mut self, prompt: &str) -> Result<NaiveDateTime> {
        loop {
            match parse_date_time(&self.ask(prompt)?) {
                Ok(time) => return Ok(time),
                Err(e) => self
                    .console
                    .print(&failure(&format!("{}. Use YYYY-MM-DD HH:MM.", e))),
            }
        }
    }

    #[cfg(test)]
    pub fn console(&self) -> &C {
        &self.console
    }
}
