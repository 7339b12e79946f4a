//! The editable inventory: device categories plus the global multiplier.
//!
//! Mutators uphold the model invariants so the estimator never has to
//! validate: counts are unsigned, rates clamp at zero, and a log-source
//! change re-seeds the rate from the recommendation table.

use serde::{Deserialize, Serialize};

use crate::catalog::{default_catalog, recommended_eps};
use crate::error::Error;
use crate::estimator::{CalculationResult, estimate};
use crate::model::{DeviceCategory, LogSourceType, TrafficMultiplier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub multiplier: TrafficMultiplier,
    #[serde(default, rename = "devices")]
    pub categories: Vec<DeviceCategory>,
}

impl Default for Inventory {
    /// Seed from the built-in catalog at multiplier 1.0.
    fn default() -> Self {
        Self {
            multiplier: TrafficMultiplier::default(),
            categories: default_catalog(),
        }
    }
}

impl Inventory {
    /// Run the estimator over the current state.
    pub fn estimate(&self) -> CalculationResult {
        estimate(&self.categories, self.multiplier)
    }

    pub fn get(&self, id: &str) -> Option<&DeviceCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut DeviceCategory, Error> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::CategoryNotFound { id: id.to_owned() })
    }

    /// Set the unit count of a category.
    pub fn set_count(&mut self, id: &str, count: u32) -> Result<(), Error> {
        self.get_mut(id)?.count = count;
        Ok(())
    }

    /// Set the per-unit EPS rate of a category, clamped at zero.
    pub fn set_rate(&mut self, id: &str, rate: f64) -> Result<(), Error> {
        self.get_mut(id)?.base_eps_multiplier = rate.max(0.0);
        Ok(())
    }

    /// Change a category's log source.
    ///
    /// Resets the per-unit rate to the recommended default for the new
    /// `(type, source)` pair, discarding any manual rate.
    pub fn set_log_source(&mut self, id: &str, source: LogSourceType) -> Result<(), Error> {
        let category = self.get_mut(id)?;
        category.log_source_type = source;
        category.base_eps_multiplier = recommended_eps(category.device_type, source);
        Ok(())
    }

    /// Set the global traffic multiplier (clamped into its valid range).
    pub fn set_multiplier(&mut self, value: f64) {
        self.multiplier = TrafficMultiplier::new(value);
    }

    /// Append a category. Its rate is clamped at zero; the id must be new.
    pub fn add(&mut self, mut category: DeviceCategory) -> Result<(), Error> {
        if self.get(&category.id).is_some() {
            return Err(Error::DuplicateCategory {
                id: category.id,
            });
        }
        category.base_eps_multiplier = category.base_eps_multiplier.max(0.0);
        self.categories.push(category);
        Ok(())
    }

    /// Remove a category by id, returning it.
    pub fn remove(&mut self, id: &str) -> Result<DeviceCategory, Error> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::CategoryNotFound { id: id.to_owned() })?;
        Ok(self.categories.remove(index))
    }

    /// Restore the seed catalog and default multiplier.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
