// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Load-shedding priority of a circuit.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ParseError;

/// Load-shedding tier assigned to a circuit.
///
/// The panel's backup logic sheds `NotEssential` circuits first and
/// `MustHave` circuits last.
///
/// # Examples
///
/// ```
/// use spanr_lib::types::Priority;
///
/// assert_eq!(Priority::MustHave.as_str(), "MUST_HAVE");
/// assert_eq!("NICE_TO_HAVE".parse::<Priority>().unwrap(), Priority::NiceToHave);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Priority {
    /// Circuit must stay powered as long as possible.
    #[serde(rename = "MUST_HAVE")]
    MustHave,
    /// Circuit is shed after the non-essential tier.
    #[serde(rename = "NICE_TO_HAVE")]
    NiceToHave,
    /// Circuit is shed first.
    #[serde(rename = "NOT_ESSENTIAL")]
    NotEssential,
    /// Unrecognized value reported by the firmware.
    #[serde(other)]
    Unknown,
}

impl Priority {
    /// Returns the wire string representation.
    ///
    /// `Unknown` has no wire representation and maps to `"UNKNOWN"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MustHave => "MUST_HAVE",
            Self::NiceToHave => "NICE_TO_HAVE",
            Self::NotEssential => "NOT_ESSENTIAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MUST_HAVE" => Ok(Self::MustHave),
            "NICE_TO_HAVE" => Ok(Self::NiceToHave),
            "NOT_ESSENTIAL" => Ok(Self::NotEssential),
            _ => Err(ParseError::InvalidValue {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_as_str() {
        assert_eq!(Priority::MustHave.as_str(), "MUST_HAVE");
        assert_eq!(Priority::NiceToHave.as_str(), "NICE_TO_HAVE");
        assert_eq!(Priority::NotEssential.as_str(), "NOT_ESSENTIAL");
    }

    #[test]
    fn priority_from_str() {
        assert_eq!("MUST_HAVE".parse::<Priority>().unwrap(), Priority::MustHave);
        assert_eq!(
            "NOT_ESSENTIAL".parse::<Priority>().unwrap(),
            Priority::NotEssential
        );
        assert!("ESSENTIAL".parse::<Priority>().is_err());
    }

    #[test]
    fn deserialize_unknown_variant() {
        let priority: Priority = serde_json::from_str("\"SHED_NOW\"").unwrap();
        assert_eq!(priority, Priority::Unknown);
    }
}
