// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status document parsing (`/api/v1/status`).

use serde::Deserialize;

use crate::types::DoorState;

/// Top-level status document.
///
/// # Examples
///
/// ```
/// use spanr_lib::response::StatusDocument;
///
/// let json = r#"{
///     "system": {"serial": "SN123", "model": "00200", "doorState": "CLOSED"},
///     "software": {"firmwareVersion": "spanos2/r202249/02"},
///     "network": {"eth0Link": true, "wlanLink": false, "wwanLink": false}
/// }"#;
/// let doc: StatusDocument = serde_json::from_str(json).unwrap();
/// assert_eq!(doc.system.serial, "SN123");
/// assert!(doc.network.eth0_link);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct StatusDocument {
    /// Hardware identity and door state.
    pub system: SystemSection,
    /// Firmware information.
    pub software: SoftwareSection,
    /// Link state of the panel's network interfaces.
    #[serde(default)]
    pub network: NetworkSection,
}

/// The `system` section of the status document.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemSection {
    /// Serial number; stable identity for the device's lifetime.
    pub serial: String,

    /// Hardware model identifier.
    #[serde(default)]
    pub model: String,

    /// State of the physical panel door.
    #[serde(default, rename = "doorState")]
    pub door_state: DoorState,
}

/// The `software` section of the status document.
#[derive(Debug, Clone, Deserialize)]
pub struct SoftwareSection {
    /// Firmware version string, e.g. `spanos2/r202249/02`.
    #[serde(rename = "firmwareVersion")]
    pub firmware_version: String,
}

/// The `network` section of the status document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkSection {
    /// Ethernet link is up.
    #[serde(default, rename = "eth0Link")]
    pub eth0_link: bool,

    /// Wi-Fi link is up.
    #[serde(default, rename = "wlanLink")]
    pub wlan_link: bool,

    /// Cellular link is up.
    #[serde(default, rename = "wwanLink")]
    pub wwan_link: bool,
}
