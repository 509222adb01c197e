//! # Assertion Engine
//!
//! [`Assertion`] wraps a [`Tester`] and exposes the comparison operations. Each
//! operation evaluates its predicate once. On success it returns without side
//! effects; on failure it runs the shared failure protocol:
//!
//! 1. `tester.helper()`
//! 2. build `render_mismatch(actual, expected)` plus the optional ` // annotation`
//! 3. `tester.log(message)`, exactly once
//! 4. `tester.fail()`, or `tester.fail_now()` when the options ask for it
//!
//! Every operation is `#[track_caller]`, so a tester that records its caller
//! location sees the line of the assertion in the test body.

use std::{
    any::Any,
    error::Error,
    fmt::Debug,
    iter,
    panic::{self, AssertUnwindSafe},
    ptr,
};

use crate::{
    options::Options,
    render::{panic_message, render_mismatch, Shape},
    tester::Tester,
};

/// Assertion methods around a [`Tester`].
///
/// The handle is immutable and borrows its tester for the lifetime of a test.
pub struct Assertion<'a, T: ?Sized> {
    tester: Option<&'a T>,
}

impl<'a, T: ?Sized> Clone for Assertion<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: ?Sized> Copy for Assertion<'a, T> {}

impl<'a, T: ?Sized> From<Option<&'a T>> for Assertion<'a, T> {
    fn from(tester: Option<&'a T>) -> Self {
        Self { tester }
    }
}

impl<'a, T: Tester + ?Sized> Assertion<'a, T> {
    pub fn new(tester: &'a T) -> Self {
        Self {
            tester: Some(tester),
        }
    }

    /// Returns the tester, panicking when the handle was built without one.
    #[track_caller]
    fn tester(&self) -> &'a T {
        match self.tester {
            Some(tester) => tester,
            None => panic!("testr: tester is missing"),
        }
    }

    /// Asserts that `actual` equals `expected`.
    ///
    /// Values of different types are never equal, so `0i32` and `0i64` mismatch.
    #[track_caller]
    pub fn equal<A, E>(&self, actual: A, expected: E, options: impl Into<Options>)
    where
        A: Debug + Any,
        E: Debug + PartialEq + Any,
    {
        let tester = self.tester();
        let options = options.into();

        let equal = (&actual as &dyn Any)
            .downcast_ref::<E>()
            .is_some_and(|actual| *actual == expected);
        if equal {
            return;
        }
        Self::report(tester, &Shape::of(&actual), &Shape::of(&expected), &options);
    }

    /// Asserts that the error chain of `actual` contains `expected`.
    ///
    /// A link matches when it is the `expected` object itself, or an `E` equal
    /// to `expected` under `E`'s `PartialEq`. Two absent errors match; one absent error never does.
    #[track_caller]
    pub fn error_is<E>(
        &self,
        actual: Option<&(dyn Error + 'static)>,
        expected: Option<&E>,
        options: impl Into<Options>,
    ) where
        E: Error + PartialEq + 'static,
    {
        let tester = self.tester();
        let options = options.into();

        let matched = match (actual, expected) {
            (None, None) => true,
            (Some(actual), Some(expected)) => chain(actual).any(|link| {
                ptr::addr_eq(link, expected)
                    || link.downcast_ref::<E>().is_some_and(|link| link == expected)
            }),
            _ => false,
        };
        if matched {
            return;
        }
        let expected = expected.map(|e| e as &(dyn Error + 'static));
        Self::report(
            tester,
            &Shape::of_error(actual),
            &Shape::of_error(expected),
            &options,
        );
    }

    /// Asserts that the error chain of `actual` contains an `E`, and returns it.
    #[track_caller]
    pub fn error_as<'e, E>(
        &self,
        actual: Option<&'e (dyn Error + 'static)>,
        options: impl Into<Options>,
    ) -> Option<&'e E>
    where
        E: Error + 'static,
    {
        let tester = self.tester();
        let options = options.into();

        let found =
            actual.and_then(|actual| chain(actual).find_map(|link| link.downcast_ref::<E>()));
        if found.is_none() {
            Self::report(
                tester,
                &Shape::of_error(actual),
                &Shape::pattern::<E>(),
                &options,
            );
        }
        found
    }

    /// Asserts that `f` panics. The panic is caught and its message returned.
    #[track_caller]
    pub fn panic<F: FnOnce()>(&self, f: F, options: impl Into<Options>) -> Option<String> {
        let tester = self.tester();
        let options = options.into();

        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Err(payload) => Some(panic_message(payload.as_ref())),
            Ok(()) => {
                Self::report(
                    tester,
                    &Shape::Raw("func()"),
                    &Shape::Raw("panic()"),
                    &options,
                );
                None
            }
        }
    }

    #[track_caller]
    fn report(tester: &T, actual: &Shape<'_>, expected: &Shape<'_>, options: &Options) {
        tester.helper();
        let message = format!("{}{}", render_mismatch(actual, expected), options.suffix());
        tester.log(&message);
        if options.fail_now {
            tester.fail_now();
        } else {
            tester.fail();
        }
    }
}

/// Walks an error and its `source()` links, outermost first.
fn chain<'e>(
    error: &'e (dyn Error + 'static),
) -> impl Iterator<Item = &'e (dyn Error + 'static)> {
    iter::successors(Some(error), |&error| error.source())
}
