// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mutation request bodies for the per-circuit POST endpoint.

use serde::Serialize;

use crate::types::{Priority, RelayState};

/// Body of a relay-state change request:
/// `{"relay_state_in": {"relayState": "OPEN"|"CLOSED"}}`.
///
/// # Examples
///
/// ```
/// use spanr_lib::command::RelayCommand;
/// use spanr_lib::types::RelayState;
///
/// let body = serde_json::to_string(&RelayCommand::new(RelayState::Open)).unwrap();
/// assert_eq!(body, r#"{"relay_state_in":{"relayState":"OPEN"}}"#);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct RelayCommand {
    relay_state_in: RelayStateIn,
}

#[derive(Debug, Clone, Serialize)]
struct RelayStateIn {
    #[serde(rename = "relayState")]
    relay_state: &'static str,
}

impl RelayCommand {
    /// Creates a relay-state change request.
    #[must_use]
    pub fn new(state: RelayState) -> Self {
        Self {
            relay_state_in: RelayStateIn {
                relay_state: state.as_str(),
            },
        }
    }
}

/// Body of a priority change request:
/// `{"priority_in": {"priority": "MUST_HAVE"|"NICE_TO_HAVE"|"NOT_ESSENTIAL"}}`.
#[derive(Debug, Clone, Serialize)]
pub struct PriorityCommand {
    priority_in: PriorityIn,
}

#[derive(Debug, Clone, Serialize)]
struct PriorityIn {
    priority: &'static str,
}

impl PriorityCommand {
    /// Creates a priority change request.
    #[must_use]
    pub fn new(priority: Priority) -> Self {
        Self {
            priority_in: PriorityIn {
                priority: priority.as_str(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_command_body() {
        let body = serde_json::to_string(&RelayCommand::new(RelayState::Closed)).unwrap();
        assert_eq!(body, r#"{"relay_state_in":{"relayState":"CLOSED"}}"#);
    }

    #[test]
    fn priority_command_body() {
        let body = serde_json::to_string(&PriorityCommand::new(Priority::NotEssential)).unwrap();
        assert_eq!(body, r#"{"priority_in":{"priority":"NOT_ESSENTIAL"}}"#);
    }
}
