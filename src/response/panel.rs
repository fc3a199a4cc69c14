// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel-level power document parsing (`/api/v1/panel`).

use serde::Deserialize;

/// Top-level panel power document.
///
/// # Examples
///
/// ```
/// use spanr_lib::response::PanelPowerDocument;
///
/// let doc: PanelPowerDocument =
///     serde_json::from_str(r#"{"instantGridPowerW": 1523.4}"#).unwrap();
/// assert!((doc.instant_grid_power_w - 1523.4).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PanelPowerDocument {
    /// Instantaneous grid power in watts.
    #[serde(rename = "instantGridPowerW")]
    pub instant_grid_power_w: f64,
}
