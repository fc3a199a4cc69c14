// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for one SPAN panel.
//!
//! A [`PanelClient`] composes the transport, the firmware-driven endpoint
//! selection, and the cached state regions into a single per-device object.
//! An external scheduler calls [`PanelClient::refresh_all`] on whatever
//! cadence it likes; read accessors serve the last refreshed snapshot and
//! never perform I/O.

use std::sync::OnceLock;
use std::time::Duration;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;

use crate::command::{PriorityCommand, RelayCommand};
use crate::endpoint::{CircuitsPath, PANEL_PATH, STATUS_PATH};
use crate::error::{Error, ParseError, Result};
use crate::response::{CircuitsDocument, PanelPowerDocument, StatusDocument};
use crate::state::{CircuitRegistry, PanelStatus};
use crate::transport::Transport;
use crate::types::{DoorState, Priority, RelayState};

/// Client for a single SPAN panel on the local network.
///
/// The client owns three independently cached regions: panel status, panel
/// grid power, and the circuit registry. Each region is replaced wholesale
/// by its own refresh operation and retains its last good value when a
/// refresh fails. Mutations (`set_relay`, `set_priority`) never touch the
/// cache; the panel is the sole source of truth and the effect becomes
/// visible on the next refresh.
///
/// # Examples
///
/// ```no_run
/// use spanr_lib::{PanelClient, RelayState};
///
/// #[tokio::main]
/// async fn main() -> spanr_lib::Result<()> {
///     let client = PanelClient::new("span.lan")?;
///     client.refresh_all().await?;
///
///     println!("serial: {}", client.serial_number()?);
///     let circuits = client.circuits()?;
///     for id in circuits.ids() {
///         println!("{}: {} W", circuits.name(id)?, circuits.power(id)?);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct PanelClient {
    host: String,
    transport: Transport,
    /// Sticky identity: set on the first successful status fetch, never
    /// overwritten afterwards.
    serial_number: OnceLock<String>,
    status: RwLock<Option<PanelStatus>>,
    grid_power: RwLock<Option<f64>>,
    circuits: RwLock<Option<CircuitRegistry>>,
}

impl PanelClient {
    /// Creates a client for the specified host with the default transport
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self> {
        Self::builder(host).build()
    }

    /// Returns a builder for a client with custom settings.
    #[must_use]
    pub fn builder(host: impl Into<String>) -> PanelClientBuilder {
        PanelClientBuilder {
            host: host.into(),
            timeout: None,
        }
    }

    fn from_transport(host: String, transport: Transport) -> Self {
        Self {
            host,
            transport,
            serial_number: OnceLock::new(),
            status: RwLock::new(None),
            grid_power: RwLock::new(None),
            circuits: RwLock::new(None),
        }
    }

    /// Network address of the panel, lowercase-normalized.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    // ========== Refresh ==========

    /// Refreshes status, panel power and the circuit registry.
    ///
    /// The three sub-refreshes run concurrently and commit independently: a
    /// region whose fetch failed keeps its last good value while the others
    /// still update. The call as a whole fails with the first error.
    ///
    /// Returns the client itself as the current readable snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if any sub-refresh fails.
    pub async fn refresh_all(&self) -> Result<&Self> {
        let (status, power, circuits) = tokio::join!(
            self.refresh_status(),
            self.refresh_panel_power(),
            self.refresh_circuits(),
        );
        status?;
        power?;
        circuits?;
        Ok(self)
    }

    /// Fetches `/api/v1/status` and replaces the cached status region.
    ///
    /// The serial number is captured on the first success only; later
    /// payloads never overwrite it. All other status fields are replaced
    /// wholesale.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, HTTP rejection, or a malformed
    /// payload.
    pub async fn refresh_status(&self) -> Result<()> {
        let doc = self.fetch_status().await?;
        self.commit_status(&doc);
        Ok(())
    }

    /// Fetches `/api/v1/panel` and replaces the cached grid power.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, HTTP rejection, or a malformed
    /// payload.
    pub async fn refresh_panel_power(&self) -> Result<()> {
        let response = self.transport.get(PANEL_PATH).await?;
        let doc: PanelPowerDocument = Self::parse_json(response).await?;
        *self.grid_power.write() = Some(doc.instant_grid_power_w);
        Ok(())
    }

    /// Fetches the circuits endpoint and wholesale-replaces the circuit
    /// registry.
    ///
    /// The endpoint family is re-resolved from the cached firmware version
    /// on every call; if no status has been fetched yet, one is fetched
    /// first.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, HTTP rejection, or a malformed
    /// payload.
    pub async fn refresh_circuits(&self) -> Result<()> {
        let path = self.resolve_circuits_path().await?;
        let response = self.transport.get(path.as_path()).await?;
        let doc: CircuitsDocument = Self::parse_json(response).await?;
        *self.circuits.write() = Some(CircuitRegistry::from_document(doc));
        Ok(())
    }

    // ========== Mutation ==========

    /// Requests a relay-state change for a circuit.
    ///
    /// Never updates the local cache; call a refresh afterwards to observe
    /// the new state. The panel may reject the request (HTTP 400) for a
    /// circuit that is not user controllable, surfaced as
    /// [`Error::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or rejection by the panel.
    pub async fn set_relay(&self, id: &str, state: RelayState) -> Result<()> {
        let path = self.resolve_circuits_path().await?;
        let body = RelayCommand::new(state);
        self.transport
            .post_json(&path.circuit_path(id), &body)
            .await?;
        Ok(())
    }

    /// Requests the relay of a circuit to open (de-energize).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or rejection by the panel.
    pub async fn set_relay_open(&self, id: &str) -> Result<()> {
        self.set_relay(id, RelayState::Open).await
    }

    /// Requests the relay of a circuit to close (energize).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or rejection by the panel.
    pub async fn set_relay_closed(&self, id: &str) -> Result<()> {
        self.set_relay(id, RelayState::Closed).await
    }

    /// Requests a load-shedding priority change for a circuit.
    ///
    /// Same contract as [`PanelClient::set_relay`]: no local cache update,
    /// and the panel may reject the request for a non-controllable circuit.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or rejection by the panel.
    pub async fn set_priority(&self, id: &str, priority: Priority) -> Result<()> {
        let path = self.resolve_circuits_path().await?;
        let body = PriorityCommand::new(priority);
        self.transport
            .post_json(&path.circuit_path(id), &body)
            .await?;
        Ok(())
    }

    // ========== Read accessors ==========

    /// Serial number captured on the first successful status fetch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn serial_number(&self) -> Result<&str> {
        self.serial_number
            .get()
            .map(String::as_str)
            .ok_or(Error::NotYetLoaded("serial number"))
    }

    /// Cloned snapshot of the cached panel status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn status(&self) -> Result<PanelStatus> {
        self.status
            .read()
            .clone()
            .ok_or(Error::NotYetLoaded("status"))
    }

    /// Firmware version as last reported by the panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn firmware_version(&self) -> Result<String> {
        Ok(self.status()?.firmware_version().to_string())
    }

    /// Hardware model identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn model(&self) -> Result<String> {
        Ok(self.status()?.model().to_string())
    }

    /// State of the physical panel door.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn door_state(&self) -> Result<DoorState> {
        Ok(self.status()?.door_state())
    }

    /// Returns `true` unless the door is known to be closed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn is_door_open(&self) -> Result<bool> {
        Ok(self.door_state()?.is_open())
    }

    /// Returns `true` if the door is closed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn is_door_closed(&self) -> Result<bool> {
        Ok(self.door_state()?.is_closed())
    }

    /// Returns `true` if the Ethernet link is up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn is_ethernet_connected(&self) -> Result<bool> {
        Ok(self.status()?.is_ethernet_connected())
    }

    /// Returns `true` if the Wi-Fi link is up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn is_wifi_connected(&self) -> Result<bool> {
        Ok(self.status()?.is_wifi_connected())
    }

    /// Returns `true` if the cellular link is up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful status
    /// refresh.
    pub fn is_cellular_connected(&self) -> Result<bool> {
        Ok(self.status()?.is_cellular_connected())
    }

    /// Instantaneous grid power in watts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful panel
    /// power refresh.
    pub fn instant_grid_power(&self) -> Result<f64> {
        (*self.grid_power.read()).ok_or(Error::NotYetLoaded("panel power"))
    }

    /// Cloned snapshot of the cached circuit registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotYetLoaded`] before the first successful circuits
    /// refresh.
    pub fn circuits(&self) -> Result<CircuitRegistry> {
        self.circuits
            .read()
            .clone()
            .ok_or(Error::NotYetLoaded("circuits"))
    }

    // ========== Internals ==========

    async fn fetch_status(&self) -> Result<StatusDocument> {
        let response = self.transport.get(STATUS_PATH).await?;
        Self::parse_json(response).await
    }

    fn commit_status(&self, doc: &StatusDocument) {
        // Sticky identity: only the first non-empty serial is kept, so a
        // later malformed payload cannot blank or rewrite it.
        if !doc.system.serial.is_empty() {
            let _ = self.serial_number.set(doc.system.serial.clone());
        }
        *self.status.write() = Some(PanelStatus::from_document(doc));
    }

    /// Resolves the circuits endpoint family from the cached firmware
    /// version, fetching status first if none has been cached yet.
    ///
    /// Re-evaluated on every call: firmware can be upgraded between polls.
    async fn resolve_circuits_path(&self) -> Result<CircuitsPath> {
        let cached = {
            self.status
                .read()
                .as_ref()
                .map(|status| status.firmware_version().to_string())
        };
        let firmware = match cached {
            Some(version) => version,
            None => {
                let doc = self.fetch_status().await?;
                self.commit_status(&doc);
                doc.software.firmware_version
            }
        };
        Ok(CircuitsPath::from_firmware(&firmware))
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let body = response.text().await.map_err(ParseError::Body)?;
        serde_json::from_str(&body).map_err(|err| Error::Parse(ParseError::Json(err)))
    }
}

/// Builder for [`PanelClient`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use spanr_lib::PanelClient;
///
/// # fn example() -> spanr_lib::Result<()> {
/// let client = PanelClient::builder("span.lan")
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PanelClientBuilder {
    host: String,
    timeout: Option<Duration>,
}

impl PanelClientBuilder {
    /// Sets the per-attempt transport timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn build(self) -> Result<PanelClient> {
        let host = self.host.to_lowercase();
        let transport = match self.timeout {
            Some(timeout) => Transport::with_timeout(&host, timeout),
            None => Transport::new(&host),
        }
        .map_err(Error::Transport)?;
        Ok(PanelClient::from_transport(host, transport))
    }
}
