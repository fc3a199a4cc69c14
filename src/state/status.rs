// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached panel status snapshot.

use crate::response::StatusDocument;
use crate::types::DoorState;

/// Status-derived state of the panel, replaced wholesale on each successful
/// status refresh.
///
/// The serial number is deliberately absent here: identity is sticky and
/// lives on the client, captured once on the first successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelStatus {
    firmware_version: String,
    model: String,
    door_state: DoorState,
    ethernet_link_up: bool,
    wifi_link_up: bool,
    cellular_link_up: bool,
}

impl PanelStatus {
    /// Builds a snapshot from a parsed status document.
    pub(crate) fn from_document(doc: &StatusDocument) -> Self {
        Self {
            firmware_version: doc.software.firmware_version.clone(),
            model: doc.system.model.clone(),
            door_state: doc.system.door_state,
            ethernet_link_up: doc.network.eth0_link,
            wifi_link_up: doc.network.wlan_link,
            cellular_link_up: doc.network.wwan_link,
        }
    }

    /// Firmware version string as formatted by the device.
    #[must_use]
    pub fn firmware_version(&self) -> &str {
        &self.firmware_version
    }

    /// Hardware model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// State of the physical panel door.
    #[must_use]
    pub fn door_state(&self) -> DoorState {
        self.door_state
    }

    /// Returns `true` if the Ethernet link is up.
    #[must_use]
    pub fn is_ethernet_connected(&self) -> bool {
        self.ethernet_link_up
    }

    /// Returns `true` if the Wi-Fi link is up.
    #[must_use]
    pub fn is_wifi_connected(&self) -> bool {
        self.wifi_link_up
    }

    /// Returns `true` if the cellular link is up.
    #[must_use]
    pub fn is_cellular_connected(&self) -> bool {
        self.cellular_link_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> StatusDocument {
        serde_json::from_str(
            r#"{
                "system": {"serial": "SN123", "model": "00200", "doorState": "OPEN"},
                "software": {"firmwareVersion": "spanos2/r202249/02"},
                "network": {"eth0Link": true, "wlanLink": false, "wwanLink": true}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn snapshot_from_document() {
        let status = PanelStatus::from_document(&document());
        assert_eq!(status.firmware_version(), "spanos2/r202249/02");
        assert_eq!(status.model(), "00200");
        assert!(status.door_state().is_open());
        assert!(status.is_ethernet_connected());
        assert!(!status.is_wifi_connected());
        assert!(status.is_cellular_connected());
    }
}
