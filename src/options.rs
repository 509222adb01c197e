//! Per-call assertion options.
//!
//! Every assertion takes `impl Into<Options>`. Pass `()` for the defaults, or
//! build options with [`with_message`] and [`with_fail_now`]:
//!
//! ```rust
//! use testr::{with_message, Options};
//! let options = with_message("parsing header").with_fail_now();
//! assert_eq!(options.suffix(), " // parsing header");
//! assert!(options.fail_now);
//! assert_eq!(Options::from(()), Options::default());
//! ```

/// Configuration for a single assertion call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Annotation appended to the failure message. Never empty when set.
    pub message: Option<String>,
    /// Abort the current test on failure instead of only marking it failed.
    pub fail_now: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the annotation. Empty text leaves the options unchanged.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.is_empty() {
            self.message = Some(message);
        }
        self
    }

    pub fn with_fail_now(mut self) -> Self {
        self.fail_now = true;
        self
    }

    /// The text appended to a failure message: ` // <annotation>` or nothing.
    pub fn suffix(&self) -> String {
        match &self.message {
            Some(message) => format!(" // {message}"),
            None => String::new(),
        }
    }
}

impl From<()> for Options {
    fn from((): ()) -> Self {
        Self::default()
    }
}

/// Options carrying an annotation for the failure message.
pub fn with_message(message: impl Into<String>) -> Options {
    Options::new().with_message(message)
}

/// Options that abort the test on failure.
pub fn with_fail_now() -> Options {
    Options::new().with_fail_now()
}
