// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire-level value types for the SPAN panel API.

mod door;
mod priority;
mod relay;

pub use door::DoorState;
pub use priority::Priority;
pub use relay::RelayState;
