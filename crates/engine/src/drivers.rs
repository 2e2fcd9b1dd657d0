//! Registered drivers.
//!
//! The registry is a closed, static list: drivers are never created or
//! deleted at runtime. Transactions reference drivers by id only.

use serde::{Deserialize, Serialize};

use crate::util::normalize_key;

/// A vehicle operator tracked by the company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub vehicle: String,
}

impl Driver {
    pub fn new(id: &str, name: &str, vehicle: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            vehicle: vehicle.to_string(),
        }
    }
}

/// Ordered list of registered drivers.
///
/// Order matters: per-driver reports are produced in registry order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverRegistry {
    drivers: Vec<Driver>,
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new(vec![
            Driver::new("pompilio", "Pompilio", "Nissan Caravan"),
            Driver::new("john", "John", "Nissan Caravan"),
            Driver::new("tito", "Tito", "Hino Ranger"),
        ])
    }
}

impl DriverRegistry {
    pub fn new(drivers: Vec<Driver>) -> Self {
        Self { drivers }
    }

    pub fn all(&self) -> &[Driver] {
        &self.drivers
    }

    /// Exact lookup by id.
    pub fn get(&self, id: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    /// Display name for a driver id, or `"Desconhecido"` for ids that are not
    /// registered.
    pub fn display_name(&self, id: &str) -> &str {
        self.get(id).map_or("Desconhecido", |d| d.name.as_str())
    }

    /// Resolves free text (an id or a name, any case, with or without
    /// accents) to a registered driver.
    pub fn resolve(&self, input: &str) -> Option<&Driver> {
        let key = normalize_key(input)?;
        self.drivers.iter().find(|d| {
            normalize_key(&d.id).as_deref() == Some(key.as_str())
                || normalize_key(&d.name).as_deref() == Some(key.as_str())
        })
    }

    /// Canonical id for a driver reference typed by a user.
    ///
    /// Registered drivers resolve to their id; anything else is lower-cased
    /// and trimmed so that it lands in a stable "unknown driver" bucket.
    pub fn canonical_id(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(
            self.resolve(trimmed)
                .map_or_else(|| trimmed.to_lowercase(), |d| d.id.clone()),
        )
    }
}
