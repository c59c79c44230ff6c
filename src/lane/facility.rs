//! All lanes in a facility, each behind its own lock.
//!
//! Commands against different lanes never contend; commands against the same
//! lane are serialized by that lane's mutex. Events are drained while the
//! lock is held and dispatched to observers after it is released, so an
//! observer doing I/O never blocks the scoring path.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::command::{CommandOutcome, LaneCommand};
use super::events::LaneObserver;
use super::session::Lane;
use super::snapshot::LaneSnapshot;
use crate::core::{AlleySetup, LaneError, Result};

/// Shared handle to one lane.
pub type LaneHandle = Arc<Mutex<Lane>>;

/// Registry of every lane in the facility.
pub struct Facility {
    setup: Arc<AlleySetup>,
    lanes: Vec<LaneHandle>,
    observers: Vec<Arc<dyn LaneObserver>>,
}

impl Facility {
    /// Create one idle lane per configured lane number.
    pub fn new(setup: AlleySetup) -> Result<Self> {
        setup.validate()?;
        let setup = Arc::new(setup);
        let lanes = setup
            .lane_numbers()
            .map(|n| Arc::new(Mutex::new(Lane::new(n, Arc::clone(&setup)))))
            .collect();

        Ok(Self {
            setup,
            lanes,
            observers: Vec::new(),
        })
    }

    /// Register an observer for lane events.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn LaneObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    #[must_use]
    pub fn setup(&self) -> &AlleySetup {
        &self.setup
    }

    #[must_use]
    pub fn lane_count(&self) -> u16 {
        self.setup.lane_count
    }

    /// Handle to a lane, for a task that owns the lane's event stream.
    pub fn lane(&self, number: u16) -> Result<LaneHandle> {
        self.slot(number).map(Arc::clone)
    }

    fn slot(&self, number: u16) -> Result<&LaneHandle> {
        if !self.setup.contains_lane(number) {
            return Err(LaneError::UnknownLane {
                lane: number,
                lane_count: self.setup.lane_count,
            });
        }
        Ok(&self.lanes[usize::from(number - 1)])
    }

    /// Apply a command to one lane, then notify observers.
    pub fn execute(&self, number: u16, command: LaneCommand) -> Result<CommandOutcome> {
        let slot = self.slot(number)?;

        let (result, events) = {
            let mut lane = slot.lock();
            let result = lane.apply(command);
            (result, lane.take_events())
        };

        debug!(lane = number, events = events.len(), "command committed");
        for event in &events {
            for observer in &self.observers {
                observer.on_event(event);
            }
        }

        result
    }

    /// Read a lane under its lock.
    pub fn with_lane<R>(&self, number: u16, f: impl FnOnce(&Lane) -> R) -> Result<R> {
        let slot = self.slot(number)?;
        let lane = slot.lock();
        Ok(f(&lane))
    }

    /// Snapshot every lane, one lock at a time.
    #[must_use]
    pub fn snapshot_all(&self) -> Vec<LaneSnapshot> {
        self.lanes.iter().map(|l| l.lock().snapshot()).collect()
    }

    /// Replace a lane's state from a snapshot.
    pub fn restore(&self, snapshot: LaneSnapshot) -> Result<()> {
        let slot = self.slot(snapshot.lane_number)?;
        let restored = Lane::restore(Arc::clone(&self.setup), snapshot)?;
        *slot.lock() = restored;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_lanes() {
        let facility = Facility::new(AlleySetup::new(4)).unwrap();
        assert_eq!(facility.lane_count(), 4);
        assert_eq!(facility.with_lane(3, Lane::number).unwrap(), 3);
    }

    #[test]
    fn test_unknown_lane() {
        let facility = Facility::new(AlleySetup::new(4)).unwrap();
        assert_eq!(
            facility.execute(5, LaneCommand::Reset).unwrap_err(),
            LaneError::UnknownLane { lane: 5, lane_count: 4 }
        );
        assert!(facility.lane(0).is_err());
    }

    #[test]
    fn test_zero_lane_facility_rejected() {
        assert!(Facility::new(AlleySetup::new(0)).is_err());
    }
}
