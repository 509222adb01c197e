//! # Value Rendering
//!
//! Turns arbitrary values into their canonical, type-qualified display form and
//! composes the mismatch line every assertion reports.
//!
//! ## Rendering Rules
//!
//! Applied in priority order:
//!
//! 1. **Absence** ([`Nil`], or an absent error slot) → `nil()`
//! 2. **Errors** → `error(<message>)`, using the error's `Display` text
//! 3. **Type patterns** ([`As`]) → `as(<type name>)`
//! 4. **Raw text** ([`Raw`]) → the text unchanged
//! 5. **Everything else** → `<type name>(<debug>)`, e.g. `i32(0)` or `Vec<u8>([1, 2])`
//!
//! Type names are the short form of [`std::any::type_name`], with module paths
//! stripped from every segment. The exact spelling of `type_name` is decided by the
//! compiler, so rendered messages are only guaranteed stable for a given toolchain.
//!
//! Error values are recognised through their common carriers: `Box<dyn Error>`,
//! `Box<dyn Error + Send + Sync>`, `io::Error` and `fmt::Error`. Any other error
//! type handed to `equal` renders as a typed value; the error slots of
//! `error_is` and `error_as` always use the `error(..)` form.
//!
//! Only the outermost value is classified. Nested elements are rendered by the
//! value's own `Debug`, so `vec![Nil]` renders as `Vec<Nil>([Nil])`.
//!
//! Values whose `Debug` output is unordered (`HashMap`, `HashSet`) render in
//! iteration order. Prefer `BTreeMap` and `BTreeSet` when the message must be stable.
//!
//! A `Debug` or `Display` impl that panics is caught and replaced by
//! [`UNRENDERABLE`], but the process panic hook is left alone: its
//! "panicked at" line still reaches stderr while the failure is reported.

use std::{
    any::{type_name, Any},
    error::Error,
    fmt::{self, Debug, Write},
    io,
    panic::{self, AssertUnwindSafe},
};

use crate::errors::RenderError;

/// Text used in place of a value whose `Debug` impl fails or panics.
pub const UNRENDERABLE: &str = "<unrenderable>";

/// Separator between the actual and expected side of a mismatch.
pub const MISMATCH_SEPARATOR: &str = " != expected:";

// ============================================================================
// SENTINELS
// ============================================================================

/// The absence value. Renders as `nil()` and is equal only to itself.
///
/// # Examples
///
/// ```rust
/// use testr::render::{render, Shape};
/// use testr::Nil;
/// assert_eq!(render(&Shape::of(&Nil)), "nil()");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nil;

/// Text that is rendered verbatim, without a type prefix.
///
/// Used by assertions that compare symbolic states rather than data values.
#[derive(Debug, Clone)]
pub struct Raw(String);

impl Raw {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A type pattern describing what an `error_as` assertion looked for.
///
/// # Examples
///
/// ```rust
/// use testr::render::{render, As, Shape};
/// assert_eq!(render(&Shape::of(&As::of::<std::io::Error>())), "as(Error)");
/// ```
#[derive(Debug, Clone)]
pub struct As(String);

impl As {
    pub fn of<T: ?Sized>() -> Self {
        Self(short_type_name(type_name::<T>()))
    }

    /// Short name of the target type.
    pub fn type_name(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SHAPE: the rendering category of a value
// ============================================================================

/// The rendering category of a value, in rule priority order.
pub enum Shape<'a> {
    Nil,
    Error(&'a (dyn Error + 'static)),
    Pattern(String),
    Raw(&'a str),
    Typed {
        type_name: String,
        value: &'a dyn Debug,
    },
}

impl<'a> Shape<'a> {
    /// Classifies an arbitrary value.
    ///
    /// Sentinels are recognised by their runtime type; every other value falls back
    /// to the typed rendering.
    pub fn of<T: Debug + Any>(value: &'a T) -> Self {
        let any = value as &dyn Any;
        if any.is::<Nil>() {
            return Shape::Nil;
        }
        if let Some(raw) = any.downcast_ref::<Raw>() {
            return Shape::Raw(raw.as_str());
        }
        if let Some(pattern) = any.downcast_ref::<As>() {
            return Shape::Pattern(pattern.type_name().to_string());
        }
        if let Some(error) = as_error(any) {
            return Shape::Error(error);
        }
        Shape::Typed {
            type_name: short_type_name(type_name::<T>()),
            value,
        }
    }

    /// Classifies an error slot, where `None` is the absence value.
    pub fn of_error(error: Option<&'a (dyn Error + 'static)>) -> Self {
        match error {
            Some(error) => Shape::Error(error),
            None => Shape::Nil,
        }
    }

    pub fn pattern<T: ?Sized>() -> Self {
        Shape::Pattern(As::of::<T>().type_name().to_string())
    }
}

/// Views a value as an error when its type is one of the standard carriers.
fn as_error(any: &dyn Any) -> Option<&(dyn Error + 'static)> {
    if let Some(error) = any.downcast_ref::<Box<dyn Error>>() {
        return Some(&**error);
    }
    if let Some(error) = any.downcast_ref::<Box<dyn Error + Send + Sync>>() {
        return Some(&**error);
    }
    if let Some(error) = any.downcast_ref::<io::Error>() {
        return Some(error);
    }
    if let Some(error) = any.downcast_ref::<fmt::Error>() {
        return Some(error);
    }
    None
}

// ============================================================================
// RENDERING
// ============================================================================

/// Renders a single value into its canonical form.
pub fn render(shape: &Shape<'_>) -> String {
    match shape {
        Shape::Nil => "nil()".to_string(),
        Shape::Error(error) => format!("error({})", display_or_placeholder(*error)),
        Shape::Pattern(name) => format!("as({name})"),
        Shape::Raw(text) => (*text).to_string(),
        Shape::Typed { type_name, value } => {
            let debug = try_debug(*value).unwrap_or_else(|_| UNRENDERABLE.to_string());
            format!("{type_name}({debug})")
        }
    }
}

/// Renders the mismatch between an actual and an expected value.
///
/// # Examples
///
/// ```rust
/// use testr::render::{render_mismatch, Shape};
/// let line = render_mismatch(&Shape::of(&0i32), &Shape::of(&0i64));
/// assert_eq!(line, "i32(0) != expected:i64(0)");
/// ```
pub fn render_mismatch(actual: &Shape<'_>, expected: &Shape<'_>) -> String {
    format!("{}{MISMATCH_SEPARATOR}{}", render(actual), render(expected))
}

/// Runs a value's `Debug` impl, absorbing both `fmt::Error` and panics.
pub fn try_debug(value: &dyn Debug) -> Result<String, RenderError> {
    let mut out = String::new();
    match panic::catch_unwind(AssertUnwindSafe(|| write!(out, "{value:?}"))) {
        Ok(Ok(())) => Ok(out),
        Ok(Err(fmt::Error)) => Err(RenderError::Format),
        Err(payload) => Err(RenderError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn display_or_placeholder(error: &dyn Error) -> String {
    let mut out = String::new();
    match panic::catch_unwind(AssertUnwindSafe(|| write!(out, "{error}"))) {
        Ok(Ok(())) => out,
        _ => UNRENDERABLE.to_string(),
    }
}

/// Extracts the message of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

/// Strips module paths from every path segment of a type name.
///
/// # Examples
///
/// ```rust
/// use testr::render::short_type_name;
/// assert_eq!(
///     short_type_name("alloc::vec::Vec<alloc::string::String>"),
///     "Vec<String>"
/// );
/// assert_eq!(short_type_name("&str"), "&str");
/// ```
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
            continue;
        }
        push_last_segment(&mut out, &path);
        path.clear();
        out.push(c);
    }
    push_last_segment(&mut out, &path);
    out
}

fn push_last_segment(out: &mut String, path: &str) {
    out.push_str(path.rsplit("::").next().unwrap_or(path));
}
