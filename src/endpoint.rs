// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware-dependent endpoint selection.
//!
//! The circuits API was renamed in firmware r202223: older firmware serves
//! per-circuit data under `/api/v1/spaces`, newer firmware under
//! `/api/v1/circuits`. The device only guarantees the raw ordering of its
//! version strings, so the comparison is bytewise, not semver.

/// Status endpoint path.
pub(crate) const STATUS_PATH: &str = "/api/v1/status";

/// Panel-level power endpoint path.
pub(crate) const PANEL_PATH: &str = "/api/v1/panel";

/// First firmware version that serves the `circuits` endpoint family.
pub(crate) const CIRCUITS_FIRMWARE_THRESHOLD: &str = "spanos2/r202223/04";

/// URL family used for per-circuit reads and mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitsPath {
    /// Current endpoint family, firmware at or after the rename.
    Circuits,
    /// Legacy endpoint family ("spaces"), firmware before the rename.
    Spaces,
}

impl CircuitsPath {
    /// Resolves the endpoint family for a firmware version string.
    ///
    /// Versions sorting strictly before `spanos2/r202223/04` under bytewise
    /// ordering use the legacy family.
    ///
    /// # Examples
    ///
    /// ```
    /// use spanr_lib::endpoint::CircuitsPath;
    ///
    /// assert_eq!(
    ///     CircuitsPath::from_firmware("spanos2/r202216/07"),
    ///     CircuitsPath::Spaces
    /// );
    /// assert_eq!(
    ///     CircuitsPath::from_firmware("spanos2/r202249/02"),
    ///     CircuitsPath::Circuits
    /// );
    /// ```
    #[must_use]
    pub fn from_firmware(version: &str) -> Self {
        if version < CIRCUITS_FIRMWARE_THRESHOLD {
            Self::Spaces
        } else {
            Self::Circuits
        }
    }

    /// Returns the URL path for this endpoint family.
    #[must_use]
    pub const fn as_path(&self) -> &'static str {
        match self {
            Self::Circuits => "/api/v1/circuits",
            Self::Spaces => "/api/v1/spaces",
        }
    }

    /// Returns the URL path for a single circuit within this family.
    #[must_use]
    pub fn circuit_path(&self, id: &str) -> String {
        format!("{}/{}", self.as_path(), urlencoding::encode(id))
    }
}
