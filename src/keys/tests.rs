use rstest::rstest;

use super::*;

#[rstest]
#[case(StateKeys::All, Some("foo"), true)]
#[case(StateKeys::All, None, true)]
#[case(StateKeys::from("foo"), Some("foo"), true)]
#[case(StateKeys::from("foo"), Some("fool"), false)]
#[case(StateKeys::from("foo"), None, true)]
#[case(StateKeys::from(["a", "b"]), Some("b"), true)]
#[case(StateKeys::from(["a", "b"]), Some("c"), false)]
#[case(StateKeys::none(), Some("a"), false)]
#[case(StateKeys::none(), None, true)]
fn matches(#[case] keys: StateKeys, #[case] key: Option<&str>, #[case] expected: bool) {
    assert_eq!(keys.matches(key), expected);
}

#[test]
fn insert_unions_keys() {
    let mut keys = StateKeys::none();
    keys.insert(Some("a"));
    keys.insert(Some("b"));
    keys.insert(Some("a"));
    assert_eq!(keys, StateKeys::from(["a", "b"]));
}

#[test]
fn insert_untargeted_widens_to_all() {
    let mut keys = StateKeys::from("a");
    keys.insert(None);
    assert_eq!(keys, StateKeys::All);
}

#[test]
fn insert_after_all_stays_all() {
    let mut keys = StateKeys::All;
    keys.insert(Some("a"));
    assert!(keys.is_all());
}

#[test]
fn from_option() {
    assert_eq!(StateKeys::from(None), StateKeys::All);
    assert_eq!(StateKeys::from(Some("x")), StateKeys::from("x".to_string()));
}
