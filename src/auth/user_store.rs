//! User Storage
//!
//! In-memory username → password map consulted on login and on every
//! authorization. Backed by a concurrent map so users can be added or
//! removed while requests are in flight.

use dashmap::DashMap;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, String>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user. Entries with an empty name or password are ignored.
    pub fn add(&self, username: &str, password: &str) {
        if username.is_empty() || password.is_empty() {
            debug!("Skipping user entry with empty name or password");
            return;
        }
        self.users.insert(username.to_string(), password.to_string());
    }

    /// Add every entry of `users`; `None` is a no-op.
    pub fn add_all(&self, users: Option<&HashMap<String, String>>) {
        let Some(users) = users else {
            return;
        };
        for (username, password) in users {
            self.add(username, password);
        }
    }

    /// Remove a user. Outstanding tokens for that user stop authorizing.
    pub fn remove(&self, username: &str) -> bool {
        let removed = self.users.remove(username).is_some();
        if removed {
            info!("Removed user: {}", username);
        }
        removed
    }

    pub fn lookup(&self, username: &str) -> Option<String> {
        self.users.get(username).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Check a username/password pair. Unknown users and wrong passwords
    /// are indistinguishable to the caller.
    pub fn verify_password(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(stored) => {
                ring::constant_time::verify_slices_are_equal(
                    stored.value().as_bytes(),
                    password.as_bytes(),
                )
                .is_ok()
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
