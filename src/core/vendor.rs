//! Vendor descriptors.
//!
//! Defines the two supported reference-data vendors and their fixed
//! endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Vendor Enum
// =============================================================================

/// Supported reference-data vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// International E&P data service (fields, reservoirs, reservoir views).
    Eandp,
    /// ICONA company database.
    Icona,
}

impl Vendor {
    /// All vendors in display order.
    pub const ALL: &'static [Self] = &[Self::Eandp, Self::Icona];

    /// Short identifier used in config and logs.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Eandp => "eandp",
            Self::Icona => "icona",
        }
    }

    /// Display name for human output.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Eandp => "International E&P",
            Self::Icona => "ICONA",
        }
    }

    /// Fixed API root for this vendor.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Eandp => "https://energydataservices.ihsenergy.com/rest/data/v1/international",
            Self::Icona => "https://icona-api.etools.ihsenergy.com/api",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
