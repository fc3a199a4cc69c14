// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relay state of a circuit.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ParseError;

/// State of the switching relay on a circuit.
///
/// `Open` interrupts power to the circuit, `Closed` allows it. Firmware
/// values outside the documented pair deserialize as `Unknown` instead of
/// failing a whole refresh.
///
/// # Examples
///
/// ```
/// use spanr_lib::types::RelayState;
///
/// assert_eq!(RelayState::Open.as_str(), "OPEN");
/// assert_eq!(RelayState::Closed.as_str(), "CLOSED");
/// assert!(RelayState::Open.is_open());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum RelayState {
    /// Relay is open; the circuit is de-energized.
    #[serde(rename = "OPEN")]
    Open,
    /// Relay is closed; the circuit is energized.
    #[serde(rename = "CLOSED")]
    Closed,
    /// Unrecognized value reported by the firmware.
    #[serde(other)]
    Unknown,
}

impl RelayState {
    /// Returns the wire string representation.
    ///
    /// `Unknown` has no wire representation and maps to `"UNKNOWN"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns `true` unless the relay is known to be closed.
    ///
    /// The panel only guarantees the `CLOSED` value as the negative case, so
    /// anything else reads as open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Returns `true` if the relay is closed. Exact complement of
    /// [`RelayState::is_open`].
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        !self.is_open()
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelayState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(ParseError::InvalidValue {
                field: "relayState",
                value: s.to_string(),
            }),
        }
    }
}
