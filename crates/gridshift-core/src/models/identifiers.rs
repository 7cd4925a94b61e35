//! Closed sets of legacy datums and NTv2 grids.
//!
//! Both sets are fixed at build time. Adding a member here does not make it
//! resolvable; the registry decides which combinations are supported.

use crate::error::{GridshiftError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Legacy German geodetic datum (DHDN / Gauss-Krüger)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatumId {
    /// Gauss-Krüger zone 3
    Gk3,
    /// Gauss-Krüger zone 4
    Gk4,
}

impl DatumId {
    pub const ALL: [DatumId; 2] = [DatumId::Gk3, DatumId::Gk4];

    /// Stable key used on the command line and in JSON output
    pub fn key(&self) -> &'static str {
        match self {
            DatumId::Gk3 => "gk3",
            DatumId::Gk4 => "gk4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatumId::Gk3 => "Gauss-Krüger zone 3 [EPSG:5677 or EPSG:31467]",
            DatumId::Gk4 => "Gauss-Krüger zone 4 [EPSG:5678 or EPSG:31468]",
        }
    }

    /// EPSG code declared on data written back into this datum
    pub fn epsg(&self) -> u32 {
        match self {
            DatumId::Gk3 => 5677,
            DatumId::Gk4 => 5678,
        }
    }

    /// Registry identifier in `EPSG:nnnn` form
    pub fn crs_identifier(&self) -> String {
        format!("EPSG:{}", self.epsg())
    }
}

impl fmt::Display for DatumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DatumId {
    type Err = GridshiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gk3" | "5677" | "31467" => Ok(DatumId::Gk3),
            "gk4" | "5678" | "31468" => Ok(DatumId::Gk4),
            _ => Err(GridshiftError::ConfigInvalid {
                key: "datum".to_string(),
                reason: format!("Unknown datum: {}. Use gk3 or gk4", s),
            }),
        }
    }
}

/// NTv2 transformation grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GridId {
    /// BY-KanU, Bavaria
    #[serde(rename = "BY_KANU")]
    ByKanu,
}

impl GridId {
    pub const ALL: [GridId; 1] = [GridId::ByKanu];

    pub fn key(&self) -> &'static str {
        match self {
            GridId::ByKanu => "BY_KANU",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GridId::ByKanu => "BY-KanU (CC-BY-ND; High accuracy for Bavaria)",
        }
    }

    /// File name the grid must have inside the grid directory
    pub fn filename(&self) -> &'static str {
        match self {
            GridId::ByKanu => "BY_KANU.gsb",
        }
    }

    /// Approximate download size
    pub fn size(&self) -> &'static str {
        match self {
            GridId::ByKanu => "3.03 GB",
        }
    }

    pub fn accuracy(&self) -> &'static str {
        match self {
            GridId::ByKanu => "+- 1cm",
        }
    }

    /// Where the operator obtains the grid archive
    pub fn source(&self) -> &'static str {
        match self {
            GridId::ByKanu => "http://geodaten.bayern.de/oadownload/bvv_internet/kanu/ntv2_bayern.zip",
        }
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GridId {
    type Err = GridshiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "BY_KANU" => Ok(GridId::ByKanu),
            _ => Err(GridshiftError::ConfigInvalid {
                key: "grid".to_string(),
                reason: format!("Unknown grid: {}. Use by-kanu", s),
            }),
        }
    }
}
