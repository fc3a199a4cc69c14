// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Circuits document parsing (`/api/v1/circuits` and legacy
//! `/api/v1/spaces`).
//!
//! The legacy family has only been observed with the same field names as
//! the current one, so both parse through this document.

use std::collections::HashMap;

use serde::Deserialize;

use crate::types::{Priority, RelayState};

/// Top-level circuits document: a map from circuit id to circuit payload.
///
/// # Examples
///
/// ```
/// use spanr_lib::response::CircuitsDocument;
///
/// let json = r#"{"circuits": {
///     "id1": {"name": "Kitchen", "instantPowerW": -120.5,
///             "producedEnergyWh": 0, "consumedEnergyWh": 500,
///             "relayState": "CLOSED", "priority": "MUST_HAVE",
///             "tabs": [3], "is_user_controllable": true}
/// }}"#;
/// let doc: CircuitsDocument = serde_json::from_str(json).unwrap();
/// assert_eq!(doc.circuits["id1"].name, "Kitchen");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitsDocument {
    /// Per-circuit payloads keyed by circuit id.
    pub circuits: HashMap<String, CircuitPayload>,
}

/// One circuit's state as reported by the panel.
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitPayload {
    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Instantaneous power in watts; negative for producing circuits.
    #[serde(default, rename = "instantPowerW")]
    pub instant_power_w: f64,

    /// Produced energy counter in watt-hours.
    #[serde(default, rename = "producedEnergyWh")]
    pub produced_energy_wh: f64,

    /// Consumed energy counter in watt-hours.
    #[serde(default, rename = "consumedEnergyWh")]
    pub consumed_energy_wh: f64,

    /// Relay state.
    #[serde(default, rename = "relayState")]
    pub relay_state: RelayState,

    /// Load-shedding priority.
    #[serde(default)]
    pub priority: Priority,

    /// Physical breaker slots spanned by this circuit.
    #[serde(default)]
    pub tabs: Vec<u32>,

    /// Whether the panel accepts relay/priority mutations for this circuit.
    #[serde(default)]
    pub is_user_controllable: bool,
}
