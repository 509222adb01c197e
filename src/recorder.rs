//! An in-memory [`Tester`] for checking assertion helpers themselves.
//!
//! [`Recorder`] keeps the last logged message and the resulting [`State`]. It
//! never unwinds, so a `fail_now` is observable as [`State::FailNow`] and the
//! code after the assertion keeps running.

use std::cell::{Cell, RefCell};

use crate::{tester::Tester, Assertion};

/// Outcome recorded by a [`Recorder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Pass,
    Fail,
    FailNow,
}

#[derive(Debug, Default)]
pub struct Recorder {
    state: Cell<State>,
    output: RefCell<String>,
    helpers: Cell<usize>,
    logs: Cell<usize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assert(&self) -> Assertion<'_, Self> {
        Assertion::new(self)
    }

    pub fn state(&self) -> State {
        self.state.get()
    }

    /// The last logged message, or an empty string.
    pub fn output(&self) -> String {
        self.output.borrow().clone()
    }

    /// How many times a message was logged.
    pub fn log_count(&self) -> usize {
        self.logs.get()
    }

    /// How many times an assertion marked itself as a helper.
    pub fn helper_count(&self) -> usize {
        self.helpers.get()
    }

    /// Panics unless both the state and the last output match.
    #[track_caller]
    pub fn assert_state(&self, state: State, output: &str) {
        let actual = (self.state(), self.output());
        assert_eq!(actual, (state, output.to_string()), "recorded state and output");
    }
}

impl Tester for Recorder {
    fn helper(&self) {
        self.helpers.set(self.helpers.get() + 1);
    }

    fn log(&self, message: &str) {
        self.logs.set(self.logs.get() + 1);
        *self.output.borrow_mut() = message.to_string();
    }

    fn fail(&self) {
        self.state.set(State::Fail);
    }

    fn fail_now(&self) {
        self.state.set(State::FailNow);
    }
}
