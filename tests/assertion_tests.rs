//! Table tests for every assertion, checked through a `Recorder`.

use std::{error::Error, fmt};

use testr::{with_fail_now, with_message, Assertion, Nil, Recorder, State};

#[derive(Debug, Clone, PartialEq)]
struct Sentinel(&'static str);

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Error for Sentinel {}

#[derive(Debug)]
struct Wrap(Sentinel);

impl fmt::Display for Wrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wrap {}", self.0)
    }
}

impl Error for Wrap {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

#[derive(Debug, PartialEq)]
struct CustomError(String);

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for CustomError {}

/// Only `Code` 404 and 410 are considered the same "gone" condition.
#[derive(Debug)]
struct Code(u16);

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}", self.0)
    }
}

impl Error for Code {}

impl PartialEq for Code {
    fn eq(&self, other: &Self) -> bool {
        let gone = |code: u16| code == 404 || code == 410;
        self.0 == other.0 || (gone(self.0) && gone(other.0))
    }
}

/// An error whose `PartialEq` never holds, not even against itself.
#[derive(Debug)]
struct NeverEq;

impl fmt::Display for NeverEq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("never")
    }
}

impl Error for NeverEq {}

impl PartialEq for NeverEq {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

const FOO: Sentinel = Sentinel("foo");
const BAR: Sentinel = Sentinel("bar");

#[derive(Debug)]
struct Layer(Wrap);

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {}", self.0)
    }
}

impl Error for Layer {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

fn wrap_foo() -> Wrap {
    Wrap(FOO)
}

fn pass() -> (State, &'static str) {
    (State::Pass, "")
}

fn fail(output: &'static str) -> (State, &'static str) {
    (State::Fail, output)
}

#[cfg(test)]
mod equal_tests {
    use super::*;

    fn check(case: &str, run: impl FnOnce(Assertion<'_, Recorder>), expected: (State, &str)) {
        let t = Recorder::new();
        run(Assertion::new(&t));
        assert_eq!((t.state(), t.output().as_str()), expected, "case: {case}");
    }

    #[test]
    fn test_equal_table() {
        check("eq: nil", |a| a.equal(Nil, Nil, ()), pass());
        check("eq: not nil", |a| a.equal(false, false, ()), pass());
        check(
            "ne: diff val",
            |a| a.equal(false, true, ()),
            fail("bool(false) != expected:bool(true)"),
        );
        check(
            "ne: diff type",
            |a| a.equal(Nil, "nil", ()),
            fail("nil() != expected:&str(\"nil\")"),
        );
        check(
            "ne: diff width",
            |a| a.equal(0i32, 0i64, ()),
            fail("i32(0) != expected:i64(0)"),
        );
    }

    #[test]
    fn test_equal_composites() {
        check("eq: vec", |a| a.equal(vec![1, 2], vec![1, 2], ()), pass());
        check(
            "ne: vec length",
            |a| a.equal(vec![1, 2], vec![1, 2, 3], ()),
            fail("Vec<i32>([1, 2]) != expected:Vec<i32>([1, 2, 3])"),
        );
        check(
            "ne: vec vs array",
            |a| a.equal([1, 2], vec![1, 2], ()),
            fail("[i32; 2]([1, 2]) != expected:Vec<i32>([1, 2])"),
        );
        check(
            "ne: nested option",
            |a| a.equal(Some(vec!["a"]), None::<Vec<&str>>, ()),
            fail("Option<Vec<&str>>(Some([\"a\"])) != expected:Option<Vec<&str>>(None)"),
        );
        check(
            "ne: str vs String",
            |a| a.equal("x", String::from("x"), ()),
            fail("&str(\"x\") != expected:String(\"x\")"),
        );
    }

    #[test]
    fn test_equal_renders_error_values_as_errors() {
        check(
            "ne: boxed error",
            |a| a.equal(Box::<dyn Error>::from("foo"), Nil, ()),
            fail("error(foo) != expected:nil()"),
        );
        check(
            "ne: io error",
            |a| a.equal(std::io::Error::other("refused"), Nil, ()),
            fail("error(refused) != expected:nil()"),
        );
        check("eq: fmt error", |a| a.equal(fmt::Error, fmt::Error, ()), pass());
        check(
            "ne: user error type",
            |a| a.equal(FOO, BAR, ()),
            fail("Sentinel(Sentinel(\"foo\")) != expected:Sentinel(Sentinel(\"bar\"))"),
        );
    }

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        check(
            "ne: nan",
            |a| a.equal(f64::NAN, f64::NAN, ()),
            fail("f64(NaN) != expected:f64(NaN)"),
        );
    }
}

#[cfg(test)]
mod error_is_tests {
    use super::*;

    fn check(
        case: &str,
        actual: Option<&(dyn Error + 'static)>,
        expected: Option<&Sentinel>,
        state: (State, &str),
    ) {
        let t = Recorder::new();
        Assertion::new(&t).error_is(actual, expected, ());
        assert_eq!((t.state(), t.output().as_str()), state, "case: {case}");
    }

    #[test]
    fn test_error_is_table() {
        let wrapped = wrap_foo();
        check("eq: nil", None, None, pass());
        check("eq: not nil", Some(&FOO), Some(&FOO), pass());
        check("eq: wrap", Some(&wrapped), Some(&FOO), pass());
        check("ne: nil", Some(&FOO), None, fail("error(foo) != expected:nil()"));
        check("ne: nil actual", None, Some(&FOO), fail("nil() != expected:error(foo)"));
        check(
            "ne: not nil",
            Some(&FOO),
            Some(&BAR),
            fail("error(foo) != expected:error(bar)"),
        );
        check(
            "ne: wrap",
            Some(&wrapped),
            Some(&BAR),
            fail("error(wrap foo) != expected:error(bar)"),
        );
    }

    #[test]
    fn test_error_is_uses_partial_eq_hook() {
        let t = Recorder::new();
        let assert = Assertion::new(&t);
        assert.error_is(Some(&Code(410)), Some(&Code(404)), ());
        t.assert_state(State::Pass, "");

        assert.error_is(Some(&Code(500)), Some(&Code(404)), ());
        t.assert_state(State::Fail, "error(code 500) != expected:error(code 404)");
    }

    #[test]
    fn test_error_is_matches_same_object() {
        let t = Recorder::new();
        let assert = Assertion::new(&t);
        let never = NeverEq;
        assert.error_is(Some(&never), Some(&never), ());
        t.assert_state(State::Pass, "");

        let other = NeverEq;
        assert.error_is(Some(&never), Some(&other), ());
        t.assert_state(State::Fail, "error(never) != expected:error(never)");
    }

    #[test]
    fn test_error_is_walks_multiple_links() {
        let t = Recorder::new();
        let inner = wrap_foo();
        let outer: Box<dyn Error> = Box::new(Layer(inner));
        Assertion::new(&t).error_is(Some(&*outer), Some(&FOO), ());
        t.assert_state(State::Pass, "");
    }

    #[test]
    fn test_error_is_requires_matching_type() {
        let t = Recorder::new();
        let custom = CustomError("foo".to_string());
        Assertion::new(&t).error_is(Some(&custom), Some(&FOO), ());
        t.assert_state(State::Fail, "error(foo) != expected:error(foo)");
    }
}

#[cfg(test)]
mod error_as_tests {
    use super::*;

    #[test]
    fn test_error_as_returns_match() {
        let t = Recorder::new();
        let custom = CustomError("err".to_string());
        let found = Assertion::new(&t).error_as::<CustomError>(Some(&custom), ());
        assert_eq!(found, Some(&custom));
        t.assert_state(State::Pass, "");
    }

    #[test]
    fn test_error_as_walks_chain() {
        let t = Recorder::new();
        let wrapped = wrap_foo();
        let found = Assertion::new(&t).error_as::<Sentinel>(Some(&wrapped), ());
        assert_eq!(found, Some(&FOO));
        t.assert_state(State::Pass, "");
    }

    #[test]
    fn test_error_as_mismatch() {
        let t = Recorder::new();
        let found = Assertion::new(&t).error_as::<CustomError>(Some(&FOO), ());
        assert_eq!(found, None);
        t.assert_state(State::Fail, "error(foo) != expected:as(CustomError)");
    }

    #[test]
    fn test_error_as_nil() {
        let t = Recorder::new();
        let found = Assertion::new(&t).error_as::<CustomError>(None, ());
        assert!(found.is_none());
        t.assert_state(State::Fail, "nil() != expected:as(CustomError)");
    }
}

#[cfg(test)]
mod panic_tests {
    use super::*;

    #[test]
    fn test_panic_passes_and_swallows_payload() {
        let t = Recorder::new();
        let message = Assertion::new(&t).panic(|| panic!("kaboom"), ());
        assert_eq!(message.as_deref(), Some("kaboom"));
        t.assert_state(State::Pass, "");
    }

    #[test]
    fn test_panic_with_formatted_payload() {
        let t = Recorder::new();
        let index = 7;
        let message = Assertion::new(&t).panic(|| panic!("index {index} out of range"), ());
        assert_eq!(message.as_deref(), Some("index 7 out of range"));
    }

    #[test]
    fn test_no_panic_fails() {
        let t = Recorder::new();
        let message = Assertion::new(&t).panic(|| {}, ());
        assert!(message.is_none());
        t.assert_state(State::Fail, "func() != expected:panic()");
    }

    #[test]
    fn test_panic_closure_may_borrow_mutably() {
        let t = Recorder::new();
        let mut calls = 0;
        Assertion::new(&t).panic(|| calls += 1, ());
        assert_eq!(calls, 1);
        t.assert_state(State::Fail, "func() != expected:panic()");
    }
}

#[cfg(test)]
mod option_tests {
    use super::*;

    #[test]
    fn test_message_suffix_on_every_operation() {
        let t = Recorder::new();
        let assert = Assertion::new(&t);

        assert.equal(0i32, 0i64, with_message("assert different type"));
        t.assert_state(
            State::Fail,
            "i32(0) != expected:i64(0) // assert different type",
        );

        assert.error_is(Some(&FOO), None::<&Sentinel>, with_message("assert err is nil"));
        assert_eq!(t.output(), "error(foo) != expected:nil() // assert err is nil");

        assert.error_as::<CustomError>(Some(&FOO), with_message("assert err as CustomError"));
        assert_eq!(
            t.output(),
            "error(foo) != expected:as(CustomError) // assert err as CustomError"
        );

        assert.panic(|| {}, with_message("assert function is panic"));
        assert_eq!(t.output(), "func() != expected:panic() // assert function is panic");
    }

    #[test]
    fn test_empty_message_adds_nothing() {
        let t = Recorder::new();
        Assertion::new(&t).equal(1u8, 2u8, with_message(""));
        t.assert_state(State::Fail, "u8(1) != expected:u8(2)");
    }

    #[test]
    fn test_fail_now_keeps_text() {
        let t = Recorder::new();
        Assertion::new(&t).error_is(
            Some(&FOO),
            None::<&Sentinel>,
            with_fail_now().with_message("using fail_now"),
        );
        t.assert_state(State::FailNow, "error(foo) != expected:nil() // using fail_now");
    }

    #[test]
    fn test_pass_with_options_is_silent() {
        let t = Recorder::new();
        Assertion::new(&t).equal(3, 3, with_fail_now().with_message("never shown"));
        t.assert_state(State::Pass, "");
        assert_eq!(t.log_count(), 0);
        assert_eq!(t.helper_count(), 0);
    }

    #[test]
    fn test_each_failure_logs_once() {
        let t = Recorder::new();
        let assert = Assertion::new(&t);
        assert.equal(1, 2, ());
        assert.error_is(Some(&FOO), Some(&BAR), ());
        assert.error_as::<CustomError>(None, ());
        assert.panic(|| {}, ());
        assert_eq!(t.log_count(), 4);
        assert_eq!(t.helper_count(), 4);
    }
}

#[cfg(test)]
mod missing_tester_tests {
    use std::panic;

    use super::*;

    fn missing() -> Assertion<'static, Recorder> {
        Assertion::from(None)
    }

    #[test]
    fn test_every_operation_panics_without_tester() {
        let operations: Vec<(&str, Box<dyn Fn()>)> = vec![
            ("equal", Box::new(|| missing().equal(Nil, Nil, ()))),
            ("error_is", Box::new(|| missing().error_is(None, None::<&Sentinel>, ()))),
            ("error_as", Box::new(|| {
                missing().error_as::<CustomError>(None, ());
            })),
            ("panic", Box::new(|| {
                missing().panic(|| {}, ());
            })),
        ];

        for (name, operation) in operations {
            let result = panic::catch_unwind(panic::AssertUnwindSafe(operation));
            let payload = result.expect_err(name);
            assert_eq!(
                testr::render::panic_message(payload.as_ref()),
                "testr: tester is missing",
                "operation: {name}"
            );
        }
    }

    #[test]
    fn test_missing_tester_panics_before_running_closure() {
        let ran = std::cell::Cell::new(false);
        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            missing().panic(|| ran.set(true), ());
        }));
        assert!(result.is_err());
        assert!(!ran.get());
    }
}

#[test]
fn test_must_returns_value() {
    let n: u16 = testr::must("8080".parse());
    assert_eq!(n, 8080);
}

#[test]
#[should_panic(expected = "testr: must")]
fn test_must_panics_on_error() {
    let _: u16 = testr::must("port".parse());
}
