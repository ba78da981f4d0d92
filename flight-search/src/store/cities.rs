//! Airport code registry.

use std::collections::HashMap;

use crate::domain::CityId;

/// Assigns dense [`CityId`]s to airport codes in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CityRegistry {
    ids: HashMap<String, CityId>,
    codes: Vec<String>,
}

impl CityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `code`, registering it if unseen.
    pub fn intern(&mut self, code: &str) -> CityId {
        if let Some(&id) = self.ids.get(code) {
            return id;
        }
        let id = CityId(self.codes.len() as u32);
        self.codes.push(code.to_string());
        self.ids.insert(code.to_string(), id);
        id
    }

    /// Id of `code`, if registered.
    pub fn get(&self, code: &str) -> Option<CityId> {
        self.ids.get(code).copied()
    }

    /// Airport code of `id`, if registered.
    pub fn code(&self, id: CityId) -> Option<&str> {
        self.codes.get(id.0 as usize).map(String::as_str)
    }

    /// Number of registered cities.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if no city is registered.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
