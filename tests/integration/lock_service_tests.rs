//! End-to-end scenarios through the LockService pipeline.
//!
//! Raw scan codes are used exactly as the scanner produces them:
//! digits 1–9 are codes {1,2,3, 5,6,7, 9,10,11}, digit 0 is 14,
//! clear is 13, confirm is 15.

use std::sync::Arc;

use keylatch::app::events::AppEvent;
use keylatch::app::service::LockService;
use keylatch::config::LockConfig;
use keylatch::fsm::StateId;
use keylatch::shared::{PanelState, ScreenId};

use crate::mock_hw::{MockHardware, RecordingSink};

const CONFIRM: u8 = 15;
const CLEAR: u8 = 13;

fn make(config: LockConfig) -> (LockService, RecordingSink, Arc<PanelState>) {
    let panel = Arc::new(PanelState::new());
    let mut svc = LockService::new(config, panel.clone());
    let mut sink = RecordingSink::new();
    svc.start(&mut sink);
    (svc, sink, panel)
}

fn run(svc: &mut LockService, hw: &mut MockHardware, sink: &mut RecordingSink, ticks: u64) {
    for _ in 0..ticks {
        svc.tick(hw, sink);
    }
}

// ── Correct code: unlock, hold, relock ───────────────────────

#[test]
fn correct_code_unlocks_then_relocks_after_hold() {
    let config = LockConfig::default();
    let hold_ticks = config.ms_to_input_ticks(config.success_hold_ms);
    let (mut svc, mut sink, panel) = make(config);

    // Digits 1..=6 then confirm.
    let mut hw = MockHardware::from_presses(&[1, 2, 3, 5, 6, 7, CONFIRM]);
    run(&mut svc, &mut hw, &mut sink, 14);

    assert_eq!(svc.state(), StateId::Unlocking);
    assert_eq!(hw.unlocks(), 1, "exactly one unlock call");
    assert_eq!(hw.locks(), 0, "no relock before the hold elapses");
    assert_eq!(svc.entry_len(), 0, "buffer empty right after confirm");
    assert_eq!(panel.load().0, ScreenId::Success);

    // Let the success hold elapse, plus the relock tick.
    run(&mut svc, &mut hw, &mut sink, hold_ticks + 2);

    assert_eq!(svc.state(), StateId::Idle);
    assert_eq!(hw.unlocks(), 1);
    assert_eq!(hw.locks(), 1, "exactly one re-lock call");
    assert_eq!(panel.load().0, ScreenId::Idle);

    // The relock happened the tick the hold elapsed: ~5000 ms later.
    let unlock_tick = hw.latch_calls[0].at_tick;
    let relock_tick = hw.latch_calls[1].at_tick;
    assert_eq!(relock_tick - unlock_tick, hold_ticks);

    assert!(sink.contains(&AppEvent::AccessGranted));
    assert!(!sink.contains(&AppEvent::AccessDenied));
}

// ── Wrong code: defensive lock only ──────────────────────────

#[test]
fn wrong_code_locks_and_never_unlocks() {
    let config = LockConfig::default();
    let hold_ticks = config.ms_to_input_ticks(config.fail_hold_ms);
    let (mut svc, mut sink, panel) = make(config);

    // Digit 9 six times, then confirm.
    let mut hw = MockHardware::from_presses(&[11, 11, 11, 11, 11, 11, CONFIRM]);
    run(&mut svc, &mut hw, &mut sink, 14);

    assert_eq!(svc.state(), StateId::ShowingOutcome);
    assert_eq!(hw.unlocks(), 0, "no unlock on a mismatch");
    assert_eq!(hw.locks(), 1, "exactly one defensive lock call");
    assert_eq!(svc.entry_len(), 0);
    assert_eq!(panel.load().0, ScreenId::Failure);

    run(&mut svc, &mut hw, &mut sink, hold_ticks + 1);
    assert_eq!(svc.state(), StateId::Idle);
    assert_eq!(hw.unlocks(), 0);
    assert_eq!(hw.locks(), 1, "the hold expiry adds no extra latch motion");

    assert!(sink.contains(&AppEvent::AccessDenied));
    assert!(!sink.contains(&AppEvent::AccessGranted));
}

// ── Overflow: only the first six digits count ────────────────

#[test]
fn digits_past_six_are_dropped_before_confirm() {
    let (mut svc, mut sink, _panel) = make(LockConfig::default());

    // 1,2,3,4,5,6 then 7,8 (ignored), then confirm.
    let mut hw = MockHardware::from_presses(&[1, 2, 3, 5, 6, 7, 9, 10, CONFIRM]);
    run(&mut svc, &mut hw, &mut sink, 18);

    // The retained {1,2,3,4,5,6} matches the default code.
    assert_eq!(svc.state(), StateId::Unlocking);
    assert_eq!(hw.unlocks(), 1);
}

// ── Clear mid-entry restarts the buffer ──────────────────────

#[test]
fn clear_mid_entry_evaluates_only_later_digits() {
    // Code {3,4,5,6,7,0}: what remains after the clear, zero-padded.
    let config = LockConfig {
        password: [3, 4, 5, 6, 7, 0],
        ..LockConfig::default()
    };
    let (mut svc, mut sink, _panel) = make(config);

    // 1,2, clear, then 3,4,5,6,7, confirm.
    let mut hw = MockHardware::from_presses(&[1, 2, CLEAR, 3, 5, 6, 7, 9, CONFIRM]);
    run(&mut svc, &mut hw, &mut sink, 18);

    assert_eq!(
        svc.state(),
        StateId::Unlocking,
        "entries after clear evaluate as {{3,4,5,6,7,0}}"
    );
    assert!(sink.contains(&AppEvent::EntryCleared));
}

// ── Panel publication ─────────────────────────────────────────

#[test]
fn panel_word_tracks_entry_digit_by_digit() {
    let (mut svc, mut sink, panel) = make(LockConfig::default());

    let mut hw = MockHardware::from_presses(&[1, 2, 3]);
    let mut lens = Vec::new();
    for _ in 0..6 {
        svc.tick(&mut hw, &mut sink);
        lens.push(panel.load().1.len);
    }
    // Press/release pairs: length grows on the press ticks only.
    assert_eq!(lens, vec![1, 1, 2, 2, 3, 3]);
    assert_eq!(panel.load().1.entered(), &[1, 2, 3]);
}

#[test]
fn outcome_screens_publish_with_empty_entry() {
    let (mut svc, mut sink, panel) = make(LockConfig::default());

    let mut hw = MockHardware::from_presses(&[1, CONFIRM]);
    run(&mut svc, &mut hw, &mut sink, 4);

    let (screen, entry) = panel.load();
    assert_eq!(screen, ScreenId::Failure);
    assert_eq!(entry.len, 0, "digits never linger on an outcome screen");
}

// ── Event stream ──────────────────────────────────────────────

#[test]
fn digit_events_carry_growing_lengths() {
    let (mut svc, mut sink, _panel) = make(LockConfig::default());

    let mut hw = MockHardware::from_presses(&[1, 2, 3, 5]);
    run(&mut svc, &mut hw, &mut sink, 8);

    let lens: Vec<u8> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::DigitAccepted { len } => Some(*len),
            _ => None,
        })
        .collect();
    assert_eq!(lens, vec![1, 2, 3, 4]);
}

#[test]
fn keys_during_outcome_hold_are_ignored() {
    let config = LockConfig::default();
    let (mut svc, mut sink, _panel) = make(config);

    // Wrong entry, then frantic keying during the failure hold.
    let mut samples = Vec::new();
    for &code in &[11u8, CONFIRM] {
        samples.push(code);
        samples.push(0);
    }
    for _ in 0..20 {
        samples.push(5);
        samples.push(0);
    }
    let mut hw = MockHardware::from_samples(samples);
    run(&mut svc, &mut hw, &mut sink, 30);

    assert_eq!(svc.state(), StateId::ShowingOutcome);
    assert_eq!(svc.entry_len(), 0, "keys mid-sequence must not enter digits");
}

#[test]
fn held_confirm_does_not_retrigger() {
    let config = LockConfig::default();
    let fail_hold = config.ms_to_input_ticks(config.fail_hold_ms);
    let (mut svc, mut sink, _panel) = make(config);

    // Confirm held down across the entire failure hold and beyond: the
    // edge detector must deliver exactly one confirm event.
    let mut hw = MockHardware::from_samples(vec![CONFIRM; (fail_hold + 20) as usize]);
    run(&mut svc, &mut hw, &mut sink, fail_hold + 20);

    assert_eq!(hw.locks(), 1, "one evaluation, one defensive lock");
    assert_eq!(svc.state(), StateId::Idle);
}
