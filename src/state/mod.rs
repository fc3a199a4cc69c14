// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached panel state.
//!
//! Each region (panel status, circuit registry) is replaced wholesale on a
//! successful refresh, never merged field by field. Readers only ever see a
//! complete snapshot.

mod circuits;
mod status;

pub use circuits::{Circuit, CircuitRegistry};
pub use status::PanelStatus;
