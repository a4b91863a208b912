//! End-to-end redemption sessions on a paused clock.

use std::time::Duration;

use tokio::time::Instant;

use redeem_core::KeyType;
use redeem_sim::{
    RedemptionRuntime, SimulationConfig, SimulationEvent, SimulationStage, DEFAULT_PROTOCOL_PREFIX,
};
use redeem_state::{Field, FormEvent, Prefill, StepId, SubmitOutcome, Transition};

fn input(rt: &mut RedemptionRuntime, field: Field, value: &str) {
    let t = rt
        .handle(FormEvent::Input {
            field,
            value: value.to_string(),
        })
        .unwrap();
    assert_eq!(t, Transition::FieldUpdated { field, valid: true });
}

/// A runtime on the consent step with terms accepted.
fn ready_runtime() -> RedemptionRuntime {
    let mut rt = RedemptionRuntime::start(
        SimulationConfig::default(),
        Prefill {
            display_name: Some("Ana Lima".to_string()),
            ..Prefill::default()
        },
    );
    input(&mut rt, Field::DocumentId, "529.982.247-25");
    input(&mut rt, Field::Phone, "(11) 99999-9999");
    input(&mut rt, Field::Email, "ana@mail.com");
    rt.handle(FormEvent::Advance).unwrap();
    rt.handle(FormEvent::SelectKeyType {
        key_type: KeyType::Phone,
    })
    .unwrap();
    input(&mut rt, Field::PaymentKey, "(11) 98765-4321");
    rt.handle(FormEvent::Advance).unwrap();
    rt.handle(FormEvent::SetTerms { accepted: true }).unwrap();
    assert_eq!(rt.handle(FormEvent::Advance).unwrap(), Transition::ConfirmRequested);
    rt
}

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<SimulationEvent>) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn stages(events: &[SimulationEvent]) -> Vec<SimulationStage> {
    events
        .iter()
        .filter_map(|e| match e {
            SimulationEvent::Status { stage, .. } => Some(*stage),
            _ => None,
        })
        .collect()
}

// ── Completion ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_confirmation_runs_stages_in_order() {
    let mut rt = ready_runtime();
    let mut rx = rt.subscribe_simulation();
    let start = Instant::now();

    let outcome = rt.confirm().await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(7));

    let SubmitOutcome::Completed(record) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(record.prize_amount, "R$ 2.500,00");
    assert_eq!(record.masked_key, "11*****4321");
    assert!(record.protocol_code.starts_with(DEFAULT_PROTOCOL_PREFIX));

    let events = drain(&mut rx);
    assert_eq!(
        stages(&events),
        vec![SimulationStage::Stage1, SimulationStage::Stage2, SimulationStage::Stage3]
    );
    assert_eq!(events.last(), Some(&SimulationEvent::Completed(record.clone())));

    assert_eq!(rt.machine().step(), StepId::Success);
    assert_eq!(rt.simulator().stage(), SimulationStage::Done);
    assert_eq!(rt.view().completion, Some(record));
}

#[tokio::test(start_paused = true)]
async fn test_second_confirm_does_not_rerun() {
    let mut rt = ready_runtime();
    let first = rt.confirm().await.unwrap();
    let code = rt.machine().session().protocol_code().map(str::to_string);

    let mut rx = rt.subscribe_simulation();
    let start = Instant::now();
    let again = rt.confirm().await.unwrap();
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(matches!(again, SubmitOutcome::AlreadyCompleted(_)));
    assert!(matches!(first, SubmitOutcome::Completed(_)));
    assert!(drain(&mut rx).is_empty());
    assert_eq!(rt.machine().session().protocol_code().map(str::to_string), code);
}

#[tokio::test(start_paused = true)]
async fn test_completion_stops_session_timers() {
    let mut rt = ready_runtime();
    rt.confirm().await.unwrap();
    assert!(rt.timers().is_stopped());
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(rt.timers().is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_frozen_after_completion() {
    let mut rt = ready_runtime();
    rt.confirm().await.unwrap();
    assert!(rt.handle(FormEvent::Back).is_err());
    assert!(rt.handle(FormEvent::SetTerms { accepted: false }).is_err());
}

// ── Teardown ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_teardown_mid_run_cancels() {
    let mut rt = ready_runtime();
    let mut rx = rt.subscribe_simulation();
    let handle = rt.teardown_handle();

    let (outcome, _) = tokio::join!(rt.confirm(), async move {
        tokio::time::sleep(Duration::from_secs(4)).await;
        handle.cancel();
    });

    assert_eq!(outcome.unwrap(), SubmitOutcome::Cancelled);
    assert_eq!(rt.machine().step(), StepId::Step3);
    assert!(rt.machine().session().completion().is_none());

    let events = drain(&mut rx);
    assert_eq!(
        stages(&events),
        vec![SimulationStage::Stage1, SimulationStage::Stage2]
    );
    assert_eq!(
        events.last(),
        Some(&SimulationEvent::Cancelled {
            stage: SimulationStage::Stage2
        })
    );
    assert!(rt.timers().is_stopped());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_before_confirm() {
    let mut rt = ready_runtime();
    rt.teardown();
    rt.teardown();
    let outcome = rt.confirm().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Cancelled);
}

// ── Countdowns ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_payment_window_wraps_after_fifteen_minutes() {
    let rt = RedemptionRuntime::start(SimulationConfig::default(), Prefill::default());
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(rt.timers().snapshot().payment_window, "14:59");

    tokio::time::sleep(Duration::from_secs(15 * 60 - 1)).await;
    let snap = rt.timers().snapshot();
    assert_eq!(snap.payment_window, "15:00");
    assert_eq!(snap.urgency, "00:00");
    assert!(snap.urgency_expired);
}
