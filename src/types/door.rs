// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel door state.

use std::fmt;

use serde::Deserialize;

/// State of the panel's physical door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum DoorState {
    /// Door is open.
    #[serde(rename = "OPEN")]
    Open,
    /// Door is closed.
    #[serde(rename = "CLOSED")]
    Closed,
    /// Unrecognized value reported by the firmware.
    #[serde(other)]
    Unknown,
}

impl DoorState {
    /// Returns `true` if the door is known to be closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns `true` unless the door is known to be closed.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.is_closed()
    }

    /// Returns the wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Default for DoorState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
