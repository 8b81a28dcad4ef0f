use std::collections::BTreeMap;

/// Seat availability for one flight, numbered 1..=capacity. Never resized.
#[derive(Clone, Debug, PartialEq)]
pub struct SeatMap {
    seats: BTreeMap<u32, bool>,
}

impl SeatMap {
    pub fn new(capacity: u32) -> Self {
        SeatMap {
            seats: (1..=capacity).map(|n| (n, true)).collect(),
        }
    }

    /// Holds `seat`; false if it does not exist or is already taken.
    pub fn book_seat(&mut self, seat: u32) -> bool {
        match self.seats.get_mut(&seat) {
            Some(available) if *available => {
                *available = false;
                true
            }
            _ => false,
        }
    }

    /// Releases `seat`; false if it does not exist or was not taken.
    pub fn unbook_seat(&mut self, seat: u32) -> bool {
        match self.seats.get_mut(&seat) {
            Some(available) if !*available => {
                *available = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_available(&self, seat: u32) -> bool {
        self.seats.get(&seat).copied().unwrap_or(false)
    }

    /// Number of seats still available.
    pub fn seats_count(&self) -> usize {
        self.seats.values().filter(|available| **available).count()
    }

    pub fn capacity(&self) -> usize {
        self.seats.len()
    }

    pub fn available_seats(&self) -> impl Iterator<Item = u32> + '_ {
        self.seats.iter().filter(|(_, a)| **a).map(|(n, _)| *n)
    }

    pub fn reset_map(&mut self) {
        self.seats.values_mut().for_each(|a| *a = true);
    }
}
