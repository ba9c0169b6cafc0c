//! End-to-end flows through the control loop: Configuration browsing,
//! mode switches, and the Monitoring reaction set.
//!
//! These run on the host and verify the full cascade from a clock sample
//! down to gateway/display calls, with no real hardware.

use std::time::Duration;

use crate::mock_hw::{BoardCall, MockBoard, RecordingSink};
use roomsense::app::events::AppEvent;
use roomsense::app::ports::PinMode;
use roomsense::app::service::ControlLoop;
use roomsense::adapters::clock::ManualClock;
use roomsense::bus::Topic;
use roomsense::config::SystemConfig;
use roomsense::fsm::ModeId;
use roomsense::pins;
use roomsense::ticker::WallTime;

fn make_loop() -> (ControlLoop, MockBoard, ManualClock, RecordingSink) {
    let mut lp = ControlLoop::with_interval(SystemConfig::default(), Duration::ZERO);
    let mut board = MockBoard::new();
    board.pot_raw = 512;
    let clock = ManualClock::new(WallTime {
        hour: 10,
        minute: 0,
        second: 0,
    });
    let mut sink = RecordingSink::new();
    lp.start(&mut sink);
    (lp, board, clock, sink)
}

/// Press and release the button across one cycle.
fn press_button(
    lp: &mut ControlLoop,
    board: &mut MockBoard,
    clock: &ManualClock,
    sink: &mut RecordingSink,
) {
    board.button_pressed = true;
    lp.run_for(1, board, clock, sink);
    board.button_pressed = false;
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_in_configuration_mode() {
    let (lp, _, _, sink) = make_loop();
    assert_eq!(lp.mode(), ModeId::Configuration);
    assert_eq!(sink.events, vec![AppEvent::Started(ModeId::Configuration)]);
}

// ── Configuration mode ────────────────────────────────────────

#[test]
fn pot_mid_scale_selects_middle_profile() {
    let (mut lp, mut board, clock, mut sink) = make_loop();

    lp.run_for(1, &mut board, &clock, &mut sink);

    // 512 / 3 / 100 ≈ 1.71 → catalog[1]
    assert_eq!(board.last_text(), Some("sensitive"));
    assert!(sink.events.contains(&AppEvent::ProfileApplied {
        index: 1,
        name: "sensitive",
    }));
    assert_eq!(
        lp.machine().state().active_profile,
        Some("sensitive"),
        "profile recorded in shared state"
    );
}

#[test]
fn button_poll_drives_pin_mode_first() {
    let (mut lp, mut board, clock, mut sink) = make_loop();
    lp.run_for(1, &mut board, &clock, &mut sink);

    let mode_idx = board
        .calls
        .iter()
        .position(|c| {
            *c == BoardCall::SetPinMode {
                pin: pins::BUTTON_PIN,
                mode: PinMode::Input,
            }
        })
        .expect("button poll must set pin mode");
    let read_idx = board
        .calls
        .iter()
        .position(|c| {
            *c == BoardCall::ReadDigital {
                pin: pins::BUTTON_PIN,
            }
        })
        .expect("button poll must read the pin");
    assert!(mode_idx < read_idx);
}

#[test]
fn configuration_reapplies_profile_every_cycle() {
    let (mut lp, mut board, clock, mut sink) = make_loop();

    // The clock never advances, but Configuration records nothing, so the
    // ticker reports changes on every cycle and the pot is re-evaluated.
    lp.run_for(3, &mut board, &clock, &mut sink);

    let applied = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ProfileApplied { .. }))
        .count();
    assert_eq!(applied, 3);
}

// ── Mode switching ────────────────────────────────────────────

#[test]
fn button_promotes_to_monitoring() {
    let (mut lp, mut board, clock, mut sink) = make_loop();

    press_button(&mut lp, &mut board, &clock, &mut sink);

    assert_eq!(lp.mode(), ModeId::Monitoring);
    assert!(sink.events.contains(&AppEvent::ModeChanged {
        from: ModeId::Configuration,
        to: ModeId::Monitoring,
    }));
    // Monitoring's table is live: four second-change subscribers.
    assert_eq!(lp.machine().bus().subscriber_count(Topic::SecondChange), 4);
    assert_eq!(lp.machine().bus().subscriber_count(Topic::StateChange), 1);
}

#[test]
fn monitoring_takes_over_display_on_next_cycle() {
    let (mut lp, mut board, clock, mut sink) = make_loop();
    press_button(&mut lp, &mut board, &clock, &mut sink);

    board.temperature_c = 23.5;
    board.humidity_pct = 51.0;
    clock.advance_second();
    lp.run_for(1, &mut board, &clock, &mut sink);

    assert_eq!(board.last_text(), Some("Hum 51.0 temp 23.5"));
    // Hour 10 is inside the day window.
    assert_eq!(board.last_colour(), Some((0, 255, 0)));
    assert_eq!(lp.machine().state().current_hour, Some(10));
    assert_eq!(lp.machine().state().is_day, Some(true));
}

#[test]
fn button_in_monitoring_demotes_to_configuration() {
    let (mut lp, mut board, clock, mut sink) = make_loop();
    press_button(&mut lp, &mut board, &clock, &mut sink);
    clock.advance_second();

    press_button(&mut lp, &mut board, &clock, &mut sink);

    assert_eq!(lp.mode(), ModeId::Configuration);
    assert!(sink.events.contains(&AppEvent::ModeChanged {
        from: ModeId::Monitoring,
        to: ModeId::Configuration,
    }));
    assert_eq!(lp.machine().bus().subscriber_count(Topic::SecondChange), 2);
}

#[test]
fn display_refresh_still_fires_after_mid_cascade_switch() {
    // The second-change handler list is snapshotted before dispatch, so
    // RefreshDisplay (registered after PollButton) still runs in the same
    // cascade that demoted the mode.
    let (mut lp, mut board, clock, mut sink) = make_loop();
    press_button(&mut lp, &mut board, &clock, &mut sink);
    clock.advance_second();

    press_button(&mut lp, &mut board, &clock, &mut sink);

    assert_eq!(lp.mode(), ModeId::Configuration);
    assert_eq!(board.last_text(), Some("Hum 45.0 temp 21.0"));
}

// ── Monitoring mode ───────────────────────────────────────────

#[test]
fn unchanged_clock_is_quiet_in_monitoring() {
    let (mut lp, mut board, clock, mut sink) = make_loop();
    press_button(&mut lp, &mut board, &clock, &mut sink);
    clock.advance_second();
    lp.run_for(1, &mut board, &clock, &mut sink);

    // All three fields recorded now; a cycle with a frozen clock does
    // nothing at all.
    let calls_before = board.calls.len();
    lp.run_for(1, &mut board, &clock, &mut sink);
    assert_eq!(board.calls.len(), calls_before);
}

#[test]
fn second_rollover_refreshes_display_without_gated_sample() {
    let (mut lp, mut board, clock, mut sink) = make_loop();
    press_button(&mut lp, &mut board, &clock, &mut sink);
    clock.set(WallTime {
        hour: 10,
        minute: 7,
        second: 0,
    });
    lp.run_for(1, &mut board, &clock, &mut sink);

    let dht_before = board.dht_read_count();
    clock.advance_second();
    lp.run_for(1, &mut board, &clock, &mut sink);

    // Minute 7 is not on the quarter-hour gate: only the display refresh
    // touched the DHT.
    assert_eq!(board.dht_read_count(), dht_before + 1);
}

#[test]
fn quarter_hour_minute_samples_dht_twice_in_one_cycle() {
    let (mut lp, mut board, clock, mut sink) = make_loop();
    press_button(&mut lp, &mut board, &clock, &mut sink);
    clock.set(WallTime {
        hour: 10,
        minute: 14,
        second: 59,
    });
    lp.run_for(1, &mut board, &clock, &mut sink);

    let dht_before = board.dht_read_count();
    clock.advance_second(); // 10:15:00
    lp.run_for(1, &mut board, &clock, &mut sink);

    // Gated sample on the minute change plus the per-second refresh:
    // two independent reads, no shared cache.
    assert_eq!(board.dht_read_count(), dht_before + 2);
}

#[test]
fn day_night_boundaries_drive_backlight() {
    let (mut lp, mut board, clock, mut sink) = make_loop();
    press_button(&mut lp, &mut board, &clock, &mut sink);

    for (hour, colour, day) in [
        (7, (255, 0, 0), false),
        (8, (0, 255, 0), true),
        (16, (0, 255, 0), true),
        (17, (255, 0, 0), false),
    ] {
        clock.set(WallTime {
            hour,
            minute: 30,
            second: 30,
        });
        lp.run_for(1, &mut board, &clock, &mut sink);
        assert_eq!(board.last_colour(), Some(colour), "hour {hour}");
        assert_eq!(lp.machine().state().is_day, Some(day), "hour {hour}");
    }
}

#[test]
fn sound_below_threshold_stays_silent() {
    let (mut lp, mut board, clock, mut sink) = make_loop();
    press_button(&mut lp, &mut board, &clock, &mut sink);

    board.sound_raw = 499;
    clock.advance_second();
    lp.run_for(1, &mut board, &clock, &mut sink);

    assert!(
        !sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::NoiseDetected { .. }))
    );
}

#[test]
fn sound_at_threshold_reports_daytime_classification() {
    let (mut lp, mut board, clock, mut sink) = make_loop();
    press_button(&mut lp, &mut board, &clock, &mut sink);

    // First monitoring cycle classifies hour 10 as day.
    board.sound_raw = 500;
    clock.advance_second();
    lp.run_for(1, &mut board, &clock, &mut sink);

    assert!(sink.events.contains(&AppEvent::NoiseDetected {
        level: 500,
        daytime: true,
    }));

    // At hour 20 the same level reports as a night observation.
    sink.events.clear();
    clock.set(WallTime {
        hour: 20,
        minute: 0,
        second: 10,
    });
    lp.run_for(1, &mut board, &clock, &mut sink);

    assert!(sink.events.contains(&AppEvent::NoiseDetected {
        level: 500,
        daytime: false,
    }));
}

// ── Fault policy ──────────────────────────────────────────────

#[test]
fn sensor_fault_aborts_cycle_and_recovers() {
    use roomsense::error::SensorError;

    let (mut lp, mut board, clock, mut sink) = make_loop();

    board.analog_fault = Some(SensorError::AnalogReadFailed);
    lp.run_for(1, &mut board, &clock, &mut sink);
    assert!(board.last_text().is_none(), "aborted cycle must not display");

    board.analog_fault = None;
    lp.run_for(1, &mut board, &clock, &mut sink);
    assert_eq!(board.last_text(), Some("sensitive"));
}
