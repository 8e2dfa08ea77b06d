use statemut::{State, StateKeys, StateRecorder, Stateful};

#[derive(Stateful)]
struct Token {
    #[state]
    state: State,
    #[property]
    r#type: String,
}

fn main() {
    let mut token = Token {
        state: State::new(),
        r#type: "ident".into(),
    };
    token.set_type("literal".into());
    StateRecorder::start();
    assert_eq!(token.r#type(), "literal");
    let log = StateRecorder::finish();
    assert_eq!(log.get(token.state()), Some(&StateKeys::from("type")));
}
