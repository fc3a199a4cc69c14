// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SpanR` Lib - A Rust client for SPAN smart electrical panels.
//!
//! This library talks to a panel's local JSON/HTTP API: it discovers which
//! endpoint shape the firmware supports, fetches and caches panel-wide and
//! per-circuit status with a retry budget for the flaky LAN link, and issues
//! relay and load-shedding priority commands.
//!
//! # Model
//!
//! One [`PanelClient`] manages exactly one panel. An external scheduler
//! calls [`PanelClient::refresh_all`] periodically; reads are served from
//! the cached snapshot and never hit the network. Mutations go straight to
//! the device and do not update the cache - the panel is the sole source of
//! truth (physical overrides are possible), so the new state becomes visible
//! on the next refresh rather than optimistically.
//!
//! # Quick Start
//!
//! ```no_run
//! use spanr_lib::{PanelClient, Priority, RelayState};
//!
//! #[tokio::main]
//! async fn main() -> spanr_lib::Result<()> {
//!     let client = PanelClient::new("span.lan")?;
//!     client.refresh_all().await?;
//!
//!     println!("serial: {}", client.serial_number()?);
//!     println!("firmware: {}", client.firmware_version()?);
//!     println!("grid power: {} W", client.instant_grid_power()?);
//!
//!     let circuits = client.circuits()?;
//!     for id in circuits.ids() {
//!         println!(
//!             "{}: {} W, relay open: {}",
//!             circuits.name(id)?,
//!             circuits.power(id)?,
//!             circuits.is_relay_open(id)?
//!         );
//!     }
//!
//!     // Shed a circuit, then refresh to observe the result.
//!     client.set_priority("id1", Priority::NotEssential).await?;
//!     client.set_relay("id1", RelayState::Open).await?;
//!     client.refresh_all().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Firmware endpoint families
//!
//! The per-circuit API was renamed in firmware r202223 from `spaces` to
//! `circuits`. The client resolves the right family from the reported
//! firmware version on every circuit operation; see
//! [`endpoint::CircuitsPath`].

mod client;
pub mod command;
pub mod endpoint;
pub mod error;
pub mod response;
pub mod state;
pub mod transport;
pub mod types;

pub use client::{PanelClient, PanelClientBuilder};
pub use endpoint::CircuitsPath;
pub use error::{Error, ParseError, RemoteRejected, Result, TransportError};
pub use state::{Circuit, CircuitRegistry, PanelStatus};
pub use transport::Transport;
pub use types::{DoorState, Priority, RelayState};
