use super::*;

#[test]
fn finish_without_start_is_empty() {
    assert!(!StateRecorder::is_active());
    assert!(StateRecorder::finish().is_empty());
}

#[test]
fn read_outside_session_is_ignored() {
    let s = State::new();
    s.record_read(Some("foo"));
    StateRecorder::start();
    let log = StateRecorder::finish();
    assert!(log.is_empty());
}

#[test]
fn targeted_reads_are_unioned() {
    let s = State::new();
    StateRecorder::start();
    s.record_read(Some("a"));
    s.record_read(Some("b"));
    s.record_read(Some("a"));
    let log = StateRecorder::finish();
    assert_eq!(log.len(), 1);
    assert_eq!(log.get(&s), Some(&StateKeys::from(["a", "b"])));
    assert!(!StateRecorder::is_active());
}

#[test]
fn untargeted_read_subsumes_keys() {
    let s = State::new();
    StateRecorder::start();
    s.record_read(Some("a"));
    s.record_read(None);
    s.record_read(Some("b"));
    let log = StateRecorder::finish();
    assert_eq!(log.get(&s), Some(&StateKeys::All));
}

#[test]
fn entries_are_in_first_read_order() {
    let s0 = State::new();
    let s1 = State::new();
    StateRecorder::start();
    s1.record_read(Some("x"));
    s0.record_read(None);
    s1.record_read(Some("y"));
    let log: Vec<_> = StateRecorder::finish().into_iter().collect();
    assert_eq!(
        log,
        vec![
            (s1.clone(), StateKeys::from(["x", "y"])),
            (s0.clone(), StateKeys::All)
        ]
    );
}

#[test]
fn restart_discards_partial_log() {
    let s0 = State::new();
    let s1 = State::new();
    StateRecorder::start();
    s0.record_read(Some("a"));
    StateRecorder::start();
    s1.record_read(Some("b"));
    let log = StateRecorder::finish();
    assert_eq!(log.get(&s0), None);
    assert_eq!(log.get(&s1), Some(&StateKeys::from("b")));
}

#[test]
fn try_start_refuses_nested_session() {
    StateRecorder::try_start().unwrap();
    let e = StateRecorder::try_start().unwrap_err();
    assert_eq!(e.to_string(), "a recording session is already active");
    StateRecorder::finish();
    assert!(StateRecorder::try_start().is_ok());
    StateRecorder::finish();
}
