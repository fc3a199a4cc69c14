// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire payload parsing for the panel's JSON documents.

mod circuits;
mod panel;
mod status;

pub use circuits::{CircuitPayload, CircuitsDocument};
pub use panel::PanelPowerDocument;
pub use status::{NetworkSection, SoftwareSection, StatusDocument, SystemSection};
