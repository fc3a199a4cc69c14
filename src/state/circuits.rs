// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached per-circuit state.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::response::{CircuitPayload, CircuitsDocument};
use crate::types::{Priority, RelayState};

/// One branch circuit's cached state.
///
/// Built from the circuits document at refresh time; read-only thereafter.
/// Mutations go through the client's `set_relay`/`set_priority` operations
/// and only become visible after the next refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    name: String,
    instant_power_w: f64,
    produced_energy_wh: f64,
    consumed_energy_wh: f64,
    relay_state: RelayState,
    priority: Priority,
    tabs: Vec<u32>,
    is_user_controllable: bool,
}

impl Circuit {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instantaneous power magnitude in watts.
    ///
    /// Producing circuits report negative wire values; consumers of this
    /// accessor get the absolute value either way.
    #[must_use]
    pub fn power(&self) -> f64 {
        self.instant_power_w.abs()
    }

    /// Produced energy counter in watt-hours.
    #[must_use]
    pub fn energy_produced(&self) -> f64 {
        self.produced_energy_wh
    }

    /// Consumed energy counter in watt-hours.
    #[must_use]
    pub fn energy_consumed(&self) -> f64 {
        self.consumed_energy_wh
    }

    /// Relay state as last reported by the panel.
    #[must_use]
    pub fn relay_state(&self) -> RelayState {
        self.relay_state
    }

    /// Returns `true` unless the relay is known to be closed.
    #[must_use]
    pub fn is_relay_open(&self) -> bool {
        self.relay_state.is_open()
    }

    /// Returns `true` if the relay is closed. Exact complement of
    /// [`Circuit::is_relay_open`].
    #[must_use]
    pub fn is_relay_closed(&self) -> bool {
        self.relay_state.is_closed()
    }

    /// Load-shedding priority.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Whether the panel accepts mutations for this circuit.
    #[must_use]
    pub fn is_user_controllable(&self) -> bool {
        self.is_user_controllable
    }

    /// Physical breaker slots spanned by this circuit.
    #[must_use]
    pub fn breaker_positions(&self) -> &[u32] {
        &self.tabs
    }
}

impl From<CircuitPayload> for Circuit {
    fn from(payload: CircuitPayload) -> Self {
        Self {
            name: payload.name,
            instant_power_w: payload.instant_power_w,
            produced_energy_wh: payload.produced_energy_wh,
            consumed_energy_wh: payload.consumed_energy_wh,
            relay_state: payload.relay_state,
            priority: payload.priority,
            tabs: payload.tabs,
            is_user_controllable: payload.is_user_controllable,
        }
    }
}

/// Cached registry of all circuits, keyed by circuit id.
///
/// A refresh replaces the whole map: ids absent from the new payload are
/// removed, new ids are added. Accessors never perform I/O.
///
/// # Examples
///
/// ```
/// use spanr_lib::response::CircuitsDocument;
/// use spanr_lib::state::CircuitRegistry;
///
/// let json = r#"{"circuits": {"id1": {"name": "Kitchen",
///     "instantPowerW": -120.5, "relayState": "CLOSED"}}}"#;
/// let doc: CircuitsDocument = serde_json::from_str(json).unwrap();
/// let registry = CircuitRegistry::from_document(doc);
///
/// assert!((registry.power("id1").unwrap() - 120.5).abs() < f64::EPSILON);
/// assert!(!registry.is_relay_open("id1").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircuitRegistry {
    circuits: HashMap<String, Circuit>,
}

impl CircuitRegistry {
    /// Builds a registry from a parsed circuits document.
    #[must_use]
    pub fn from_document(doc: CircuitsDocument) -> Self {
        let circuits = doc
            .circuits
            .into_iter()
            .map(|(id, payload)| (id, Circuit::from(payload)))
            .collect();
        Self { circuits }
    }

    /// Returns the circuit ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.circuits.keys().map(String::as_str)
    }

    /// Returns the number of circuits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    /// Returns `true` if the registry holds no circuits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    /// Looks up a circuit by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Circuit> {
        self.circuits.get(id)
    }

    /// Looks up a circuit by id, failing with [`Error::CircuitNotFound`]
    /// for an unknown id.
    pub fn circuit(&self, id: &str) -> Result<&Circuit> {
        self.circuits
            .get(id)
            .ok_or_else(|| Error::CircuitNotFound(id.to_string()))
    }

    /// Display name of a circuit.
    pub fn name(&self, id: &str) -> Result<&str> {
        Ok(self.circuit(id)?.name())
    }

    /// Instantaneous power magnitude of a circuit in watts.
    pub fn power(&self, id: &str) -> Result<f64> {
        Ok(self.circuit(id)?.power())
    }

    /// Produced energy counter of a circuit in watt-hours.
    pub fn energy_produced(&self, id: &str) -> Result<f64> {
        Ok(self.circuit(id)?.energy_produced())
    }

    /// Consumed energy counter of a circuit in watt-hours.
    pub fn energy_consumed(&self, id: &str) -> Result<f64> {
        Ok(self.circuit(id)?.energy_consumed())
    }

    /// Returns `true` unless the circuit's relay is known to be closed.
    pub fn is_relay_open(&self, id: &str) -> Result<bool> {
        Ok(self.circuit(id)?.is_relay_open())
    }

    /// Returns `true` if the circuit's relay is closed.
    pub fn is_relay_closed(&self, id: &str) -> Result<bool> {
        Ok(self.circuit(id)?.is_relay_closed())
    }

    /// Load-shedding priority of a circuit.
    pub fn priority(&self, id: &str) -> Result<Priority> {
        Ok(self.circuit(id)?.priority())
    }

    /// Whether the panel accepts mutations for a circuit.
    pub fn is_user_controllable(&self, id: &str) -> Result<bool> {
        Ok(self.circuit(id)?.is_user_controllable())
    }

    /// Physical breaker slots spanned by a circuit.
    pub fn breaker_positions(&self, id: &str) -> Result<&[u32]> {
        Ok(self.circuit(id)?.breaker_positions())
    }
}
