use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

pub type UserId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Agent,
    Passenger,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Agent => "agent",
            Role::Passenger => "passenger",
        };
        write!(f, "{}", s)
    }
}

/// Parses the stored role names, or the menu numbers 1-3. Case sensitive.
impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" | "admin" => Ok(Role::Admin),
            "2" | "agent" => Ok(Role::Agent),
            "3" | "passenger" => Ok(Role::Passenger),
            other => Err(Error::InvalidRole(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoyaltyTier {
    Basic,
    Silver,
    Gold,
    Platinum,
}

impl LoyaltyTier {
    pub fn for_points(points: u32) -> Self {
        match points {
            20.. => LoyaltyTier::Platinum,
            10.. => LoyaltyTier::Gold,
            5.. => LoyaltyTier::Silver,
            _ => LoyaltyTier::Basic,
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Passenger {
    loyalty_points: u32,
}

impl Passenger {
    pub fn loyalty_points(&self) -> u32 {
        self.loyalty_points
    }

    pub fn add_loyalty_points(&mut self, points: u32) {
        self.loyalty_points = self.loyalty_points.saturating_add(points);
    }

    pub fn loyalty_tier(&self) -> LoyaltyTier {
        LoyaltyTier::for_points(self.loyalty_points)
    }
}

/// The concrete kind of account, carrying whatever only that kind has.
#[derive(Clone, Debug, PartialEq)]
pub enum Account {
    Administrator,
    BookingAgent,
    Passenger(Passenger),
}

impl Account {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Account::Administrator,
            Role::Agent => Account::BookingAgent,
            Role::Passenger => Account::Passenger(Passenger::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Account::Administrator => Role::Admin,
            Account::BookingAgent => Role::Agent,
            Account::Passenger(_) => Role::Passenger,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserRecord", into = "UserRecord")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    password: String,
    account: Account,
}

impl User {
    pub fn new(id: UserId, name: &str, email: &str, password: &str, role: Role) -> Self {
        User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            account: Account::for_role(role),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.account.role()
    }

    pub fn check_access_level(&self, role: Role) -> bool {
        self.role() == role
    }

    pub fn check_password(&self, input: &str) -> bool {
        self.password == input
    }

    pub fn as_passenger(&self) -> Option<&Passenger> {
        match &self.account {
            Account::Passenger(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_passenger_mut(&mut self) -> Option<&mut Passenger> {
        match &mut self.account {
            Account::Passenger(p) => Some(p),
            _ => None,
        }
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn change_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    pub fn change_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    pub fn row(&self) -> UserRow {
        UserRow {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role(),
            loyalty: self
                .as_passenger()
                .map(|p| format!("{} ({} pts)", p.loyalty_tier(), p.loyalty_points()))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    id: UserId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: Role,
    #[tabled(rename = "Loyalty")]
    loyalty: String,
}

/// On-disk shape of a user in `Users.json`.
#[derive(Serialize, Deserialize)]
struct UserRecord {
    id: UserId,
    name: String,
    email: String,
    password: String,
    role: String,
    #[serde(rename = "loyaltyPoints", default, skip_serializing_if = "is_zero")]
    loyalty_points: u32,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl TryFrom<UserRecord> for User {
    type Error = Error;

    fn try_from(record: UserRecord) -> Result<Self> {
        let role: Role = record.role.parse()?;
        let mut user = User::new(record.id, &record.name, &record.email, &record.password, role);
        if let Some(passenger) = user.as_passenger_mut() {
            passenger.add_loyalty_points(record.loyalty_points);
        }
        Ok(user)
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        let loyalty_points = user.as_passenger().map_or(0, |p| p.loyalty_points());
        UserRecord {
            id: user.id,
            role: user.role().to_string(),
            name: user.name,
            email: user.email,
            password: user.password,
            loyalty_points,
        }
    }
}
