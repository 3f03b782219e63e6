//! GL error kinds and the sinks they are reported through.

use log::warn;

/// Recoverable errors raised by matrix operations.
///
/// An operation that raises one of these leaves all state untouched.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlError {
    /// An unrecognized enum value, e.g. an unknown matrix mode.
    #[error("invalid enum")]
    InvalidEnum,

    /// A numeric argument out of range, e.g. a zero-length rotation axis.
    #[error("invalid value")]
    InvalidValue,

    /// Push beyond the configured stack capacity.
    #[error("stack overflow")]
    StackOverflow,

    /// Pop below depth zero.
    #[error("stack underflow")]
    StackUnderflow,
}

impl GlError {
    /// The numeric GL error code.
    pub fn code(self) -> u32 {
        match self {
            GlError::InvalidEnum => 0x0500,
            GlError::InvalidValue => 0x0501,
            GlError::StackOverflow => 0x0503,
            GlError::StackUnderflow => 0x0504,
        }
    }
}

/// Report-and-continue destination for [`GlError`]s.
pub trait ErrorSink {
    fn report(&mut self, error: GlError);
}

/// Latches the first reported error until it is taken, like `glGetError`.
///
/// Errors reported while one is already pending are dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ErrorFlag {
    pending: Option<GlError>,
}

impl ErrorFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pending error and clear the flag.
    pub fn take(&mut self) -> Option<GlError> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<GlError> {
        self.pending
    }
}

impl ErrorSink for ErrorFlag {
    fn report(&mut self, error: GlError) {
        if self.pending.is_none() {
            self.pending = Some(error);
        }
    }
}

/// Sends every reported error to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&mut self, error: GlError) {
        warn!("GL error 0x{:04X}: {}", error.code(), error);
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for &mut S {
    fn report(&mut self, error: GlError) {
        (**self).report(error);
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// A stack was configured with no room for even the root matrix
    #[error("Invalid depth for {stack} stack: {depth}")]
    InvalidDepth { stack: &'static str, depth: usize },
}
