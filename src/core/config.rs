//! Facility configuration.
//!
//! The facility provides this once at startup:
//! - `AlleySetup`: lane count, frame variant, default lane capacity
//! - `FacilitySource`: where the lane count comes from (back office, file, test)
//!
//! Lanes receive the setup as an `Arc<AlleySetup>` at construction. It is
//! never mutated after that.

use serde::{Deserialize, Serialize};

use super::error::{LaneError, Result};
use crate::scoring::FrameKind;

/// Lane count used when nothing else is configured.
pub const DEFAULT_LANE_COUNT: u16 = 32;

/// Supplies the number of lanes physically present in the facility.
///
/// Real deployments answer this from the facility-management system; tests
/// and single-site installs use a fixed `AlleySetup`.
pub trait FacilitySource {
    /// Current lane count.
    fn lane_count(&self) -> Result<u16>;
}

/// Read-only facility configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlleySetup {
    /// Number of lanes (1-based lane numbers run `1..=lane_count`).
    pub lane_count: u16,

    /// Frame variant bowled on every lane.
    #[serde(default)]
    pub frame_kind: FrameKind,

    /// Capacity used by `LaneCommand::StartGame` when the operator leaves
    /// `max_players` out.
    #[serde(default = "default_max_players")]
    pub default_max_players: u8,
}

fn default_max_players() -> u8 {
    6
}

impl Default for AlleySetup {
    fn default() -> Self {
        Self::new(DEFAULT_LANE_COUNT)
    }
}

impl AlleySetup {
    /// Create a setup for a facility with `lane_count` lanes.
    #[must_use]
    pub fn new(lane_count: u16) -> Self {
        Self {
            lane_count,
            frame_kind: FrameKind::TenPin,
            default_max_players: default_max_players(),
        }
    }

    /// Build a setup from an external source, surfacing its failure.
    pub fn from_source(source: &dyn FacilitySource) -> Result<Self> {
        let setup = Self::new(source.lane_count()?);
        setup.validate()?;
        Ok(setup)
    }

    /// Set the frame variant.
    #[must_use]
    pub fn with_frame_kind(mut self, kind: FrameKind) -> Self {
        self.frame_kind = kind;
        self
    }

    /// Set the default lane capacity.
    #[must_use]
    pub fn with_default_max_players(mut self, max_players: u8) -> Self {
        self.default_max_players = max_players;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.lane_count == 0 {
            return Err(LaneError::InvalidSetup("facility has no lanes".into()));
        }
        Ok(())
    }

    /// Check whether `lane` is a lane number in this facility.
    #[must_use]
    pub fn contains_lane(&self, lane: u16) -> bool {
        (1..=self.lane_count).contains(&lane)
    }

    /// Iterate over every lane number.
    pub fn lane_numbers(&self) -> impl Iterator<Item = u16> {
        1..=self.lane_count
    }
}

impl FacilitySource for AlleySetup {
    fn lane_count(&self) -> Result<u16> {
        Ok(self.lane_count)
    }
}
