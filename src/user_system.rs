use crate::error::{Error, Result};
use crate::store::JsonStore;
use crate::user::{Role, User, UserId};
use std::path::PathBuf;
use tracing::{debug, info};

/// Fields to change on an existing user; `None` leaves a field as it is.
#[derive(Debug, Default, Clone)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct UserSystem {
    users: Vec<User>,
    store: JsonStore<User>,
}

impl UserSystem {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let store = JsonStore::new(path);
        let users = store.load()?;
        Ok(UserSystem { users, store })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id() == id)
    }

    /// First user, in stored order, whose email and password both match.
    pub fn login(&self, email: &str, password: &str) -> Option<User> {
        let user = self
            .users
            .iter()
            .find(|u| u.email() == email && u.check_password(password))
            .cloned();
        match &user {
            Some(u) => info!(id = u.id(), role = %u.role(), "login"),
            None => debug!(email, "login rejected"),
        }
        user
    }

    pub fn passenger(&self, id: UserId) -> Result<&User> {
        let user = self.find(id).ok_or(Error::UserNotFound(id))?;
        if user.as_passenger().is_none() {
            return Err(Error::NotAPassenger(id));
        }
        Ok(user)
    }

    /// Exact, case-sensitive comparison against every stored user.
    pub fn is_email_unique(&self, email: &str) -> bool {
        self.users.iter().all(|u| u.email() != email)
    }

    pub fn add_user(&mut self, name: &str, email: &str, password: &str, role: Role) -> Result<UserId> {
        if !self.is_email_unique(email) {
            return Err(Error::DuplicateEmail(email.to_string()));
        }
        let id = self.users.last().map_or(1, |u| u.id() + 1);
        self.users.push(User::new(id, name, email, password, role));
        self.save()?;
        info!(id, %role, "user added");
        Ok(id)
    }

    pub fn remove_user(&mut self, id: UserId) -> Result<User> {
        let idx = self
            .users
            .iter()
            .position(|u| u.id() == id)
            .ok_or(Error::UserNotFound(id))?;
        let removed = self.users.remove(idx);
        self.save()?;
        info!(id, "user removed");
        Ok(removed)
    }

    /// Applies every field or none. A new email must not match any stored
    /// email, the user's own included.
    pub fn update_user(&mut self, id: UserId, update: UserUpdate) -> Result<()> {
        if let Some(email) = &update.email {
            if !self.is_email_unique(email) {
                return Err(Error::DuplicateEmail(email.clone()));
            }
        }
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id() == id)
            .ok_or(Error::UserNotFound(id))?;
        if let Some(name) = &update.name {
            user.rename(name);
        }
        if let Some(email) = &update.email {
            user.change_email(email);
        }
        if let Some(password) = &update.password {
            user.change_password(password);
        }
        self.save()?;
        info!(id, "user updated");
        Ok(())
    }

    fn save(&self) -> Result<()> {
        self.store.save(&self.users)
    }
}
