//! Facility-level tests: per-lane isolation, serialized commands, observers.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use openbowler::{
    AlleySetup, BowlerRng, CommandOutcome, Facility, LaneCommand, LaneError, LaneEvent,
    LaneObserver, SimulatedBowler,
};

/// Observer that records every event it sees.
#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<LaneEvent>>,
}

impl LaneObserver for Recorder {
    fn on_event(&self, event: &LaneEvent) {
        self.events.lock().push(event.clone());
    }
}

fn start(facility: &Facility, lane: u16, players: &[&str], games: f64) {
    facility
        .execute(lane, LaneCommand::StartGame { max_players: Some(players.len() as u8), games })
        .unwrap();
    for (i, name) in players.iter().enumerate() {
        facility
            .execute(lane, LaneCommand::AddPlayer { name: (*name).to_string(), order: i as u8 + 1 })
            .unwrap();
    }
    facility.execute(lane, LaneCommand::SetPinsetter { active: true }).unwrap();
}

/// Play a lane to completion through the command surface.
fn play_lane(facility: &Facility, lane: u16, seed: u64) -> usize {
    let mut bowler = SimulatedBowler::new(BowlerRng::new(seed).for_lane(lane), 0.6);
    let mut balls = 0;
    loop {
        let ball = facility
            .with_lane(lane, |l| l.game().map(|g| bowler.ball_for(g)))
            .unwrap();
        let Some(Ok(pins)) = ball else { break };

        match facility.execute(lane, LaneCommand::Roll { pins }).unwrap() {
            CommandOutcome::Rolled(report) if report.game_complete => break,
            _ => balls += 1,
        }
    }
    balls
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_lanes_play_concurrently() {
    init_tracing();
    let facility = Facility::new(AlleySetup::new(8)).unwrap();

    thread::scope(|s| {
        for lane in 1..=8u16 {
            let facility = &facility;
            s.spawn(move || {
                start(facility, lane, &["A", "B", "C"], 2.0);
                play_lane(facility, lane, 77);
            });
        }
    });

    for lane in 1..=8u16 {
        facility
            .with_lane(lane, |l| {
                assert!(!l.is_game_active());
                assert!(!l.is_pinsetter_active());
                assert_eq!(l.num_games(), 0.0);
                for player in l.players() {
                    assert_eq!(player.completed_count(), 20);
                }
            })
            .unwrap();
    }
}

#[test]
fn test_same_lane_commands_are_serialized() {
    let facility = Facility::new(AlleySetup::new(2)).unwrap();
    facility
        .execute(1, LaneCommand::StartGame { max_players: Some(100), games: 1.0 })
        .unwrap();

    // Racing joins on one lane: every order is taken exactly once.
    thread::scope(|s| {
        for t in 0..4u8 {
            let facility = &facility;
            s.spawn(move || {
                for i in 0..25u8 {
                    let order = t * 25 + i;
                    facility
                        .execute(1, LaneCommand::AddPlayer { name: format!("P{order}"), order })
                        .unwrap();
                }
            });
        }
    });

    let orders: Vec<u8> = facility
        .with_lane(1, |l| l.players().iter().map(|p| p.order()).collect())
        .unwrap();
    assert_eq!(orders, (0..100).collect::<Vec<u8>>());
}

#[test]
fn test_observers_see_committed_events() {
    let recorder = Arc::new(Recorder::default());
    let facility = Facility::new(AlleySetup::new(4))
        .unwrap()
        .with_observer(recorder.clone());

    start(&facility, 2, &["Solo"], 0.1);
    facility.execute(2, LaneCommand::RaiseServiceCall).unwrap();
    facility
        .execute(2, LaneCommand::Roll { pins: (1..=10).collect() })
        .unwrap();

    let events = recorder.events.lock().clone();
    assert!(events.iter().all(|e| e.lane() == 2));
    assert!(events.contains(&LaneEvent::ServiceCallRaised { lane: 2 }));
    assert!(events.contains(&LaneEvent::GameComplete { lane: 2 }));
    assert_eq!(events.last(), Some(&LaneEvent::PinsetterChanged { lane: 2, active: false }));
}

#[test]
fn test_observer_sees_billing_hook() {
    let recorder = Arc::new(Recorder::default());
    let facility = Facility::new(AlleySetup::new(4))
        .unwrap()
        .with_observer(recorder.clone());

    facility.execute(3, LaneCommand::SetGames { games: 2.5 }).unwrap();

    assert_eq!(
        recorder.events.lock().as_slice(),
        &[LaneEvent::GamesChanged { lane: 3, games: 2.5 }]
    );
}

#[test]
fn test_rejections_surface_through_facility() {
    let facility = Facility::new(AlleySetup::new(32)).unwrap();

    assert_eq!(
        facility.execute(5, LaneCommand::SetCrosslane { with: 7 }).unwrap(),
        CommandOutcome::Rejected
    );
    assert_eq!(
        facility.execute(5, LaneCommand::Roll { pins: vec![1] }).unwrap_err(),
        LaneError::NoActiveGame
    );
    assert!(facility
        .execute(40, LaneCommand::Reset)
        .unwrap_err()
        .is_rejection());
}

#[test]
fn test_snapshot_and_restore_facility() {
    let facility = Facility::new(AlleySetup::new(3)).unwrap();
    start(&facility, 1, &["A", "B"], 1.0);
    facility
        .execute(1, LaneCommand::Roll { pins: vec![1, 2, 3] })
        .unwrap();

    let snapshots = facility.snapshot_all();
    assert_eq!(snapshots.len(), 3);

    let bytes = snapshots[0].encode().unwrap();

    let rebuilt = Facility::new(AlleySetup::new(3)).unwrap();
    rebuilt
        .restore(openbowler::LaneSnapshot::decode(&bytes).unwrap())
        .unwrap();

    assert_eq!(rebuilt.with_lane(1, |l| l.snapshot()).unwrap(), snapshots[0]);
    let names = rebuilt.with_lane(1, |l| l.player_names()).unwrap();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_command_json_over_transport() {
    let facility = Facility::new(AlleySetup::new(4)).unwrap();
    let wire = r#"{"command":"start_game","max_players":2,"games":1.0}"#;

    let command: LaneCommand = serde_json::from_str(wire).unwrap();
    let outcome = facility.execute(1, command).unwrap();

    assert_eq!(serde_json::to_string(&outcome).unwrap(), r#"{"outcome":"applied"}"#);
}

#[test]
fn test_facility_restore_rejects_bad_crosslane() {
    let facility = Facility::new(AlleySetup::new(8)).unwrap();
    let mut snapshot = facility.with_lane(5, |l| l.snapshot()).unwrap();
    snapshot.crosslane_with = Some(20);

    assert!(matches!(facility.restore(snapshot), Err(LaneError::Snapshot(_))));
    assert_eq!(facility.with_lane(5, |l| l.crosslane_with()).unwrap(), None);
}
