use super::*;

const H: HostId = HostId(1);

fn drain(s: &mut Scheduler, until: f64) -> Vec<(TaskKind, f64)> {
    let mut out = Vec::new();
    while let Some(d) = s.pop_due(until) {
        out.push((d.kind, d.at_ms));
    }
    s.advance_clock(until);
    out
}

#[test]
fn timeouts_fire_in_due_then_schedule_order() {
    let mut s = Scheduler::new(1000.0 / 60.0);
    s.set_timeout(H, TaskKind::Clear, 20.0);
    s.set_timeout(H, TaskKind::Tick, 10.0);
    s.set_timeout(HostId(2), TaskKind::Frame, 10.0);

    let fired = drain(&mut s, 100.0);
    assert_eq!(
        fired,
        vec![
            (TaskKind::Tick, 10.0),
            (TaskKind::Frame, 10.0),
            (TaskKind::Clear, 20.0)
        ]
    );
    assert_eq!(s.pending(), 0);
    assert_eq!(s.now_ms(), 100.0);
}

#[test]
fn intervals_rearm_until_cancelled() {
    let mut s = Scheduler::new(16.0);
    let h = s.set_interval(H, TaskKind::Tick, 80.0);
    let fired = drain(&mut s, 250.0);
    assert_eq!(fired.len(), 3);
    assert_eq!(fired[2].1, 240.0);
    assert!(s.is_pending(h));

    assert!(s.cancel(h));
    assert!(!s.cancel(h));
    assert!(drain(&mut s, 1000.0).is_empty());
}

#[test]
fn interval_cancelled_during_dispatch_stops() {
    let mut s = Scheduler::new(16.0);
    let h = s.set_interval(H, TaskKind::Tick, 10.0);
    let d = s.pop_due(100.0).unwrap();
    assert_eq!(d.handle, h);
    s.cancel(d.handle);
    assert!(s.pop_due(100.0).is_none());
}

#[test]
fn frames_align_to_refresh_boundaries() {
    let mut s = Scheduler::new(16.0);
    s.request_frame(H);
    let d = s.pop_due(100.0).unwrap();
    assert_eq!(d.at_ms, 16.0);
    assert_eq!(d.kind, TaskKind::Frame);

    // Requested mid-interval: next boundary, never "now".
    s.advance_clock(20.0);
    s.request_frame(H);
    assert_eq!(s.pop_due(100.0).unwrap().at_ms, 32.0);

    // Requested exactly on a boundary: the following one.
    s.request_frame(H);
    assert_eq!(s.next_due_ms(), Some(48.0));
}

#[test]
fn cancel_owner_only_touches_owner() {
    let mut s = Scheduler::new(16.0);
    s.set_timeout(H, TaskKind::Clear, 5.0);
    s.set_interval(H, TaskKind::Tick, 5.0);
    s.request_frame(HostId(9));
    assert_eq!(s.pending_for(H), 2);
    assert_eq!(s.cancel_owner(H), 2);
    assert_eq!(s.cancel_owner(H), 0);
    assert_eq!(s.pending(), 1);
}

#[test]
fn clock_never_moves_backwards() {
    let mut s = Scheduler::new(16.0);
    s.advance_clock(50.0);
    s.advance_clock(10.0);
    assert_eq!(s.now_ms(), 50.0);
    s.set_timeout(H, TaskKind::Clear, 0.0);
    assert_eq!(s.pop_due(0.0).map(|d| d.at_ms), None);
    assert_eq!(s.pop_due(50.0).map(|d| d.at_ms), Some(50.0));
}
