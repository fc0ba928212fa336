use core::error::Error;
use core::fmt;
use core::panic::Location;

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// Frame

/// One call-stack frame of a [`Fault`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Frame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            symbol: None,
            file: file.into(),
            line,
            column: 0,
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// The source location of the caller.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            symbol: None,
            file: location.file().into(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = &self.symbol {
            write!(f, "{symbol} at ")?;
        }
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

// -----------------------------------------------------------------------------
// Fault

/// A serializable error chain.
///
/// Each link has a kind, an optional message, the frames recorded where it was
/// raised, and an optional cause.
///
/// # Examples
///
/// ```
/// use og_serial::{Fault, Frame};
///
/// let root = Fault::new("io", "disk full").with_frame(Frame::new("store.rs", 12));
/// let top = Fault::capture("save", "could not save").caused_by(root);
///
/// assert_eq!(top.depth(), 2);
/// assert_eq!(top.chain().map(|f| f.frames.len()).collect::<Vec<_>>(), [1, 1]);
/// assert_eq!(top.to_string(), "save: could not save");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub frames: Vec<Frame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<Fault>>,
}

impl Fault {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: Some(message.into()),
            frames: Vec::new(),
            cause: None,
        }
    }

    /// A fault without a message.
    pub fn bare(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: None,
            frames: Vec::new(),
            cause: None,
        }
    }

    /// Like [`new`](Self::new), recording the caller as the only frame.
    #[track_caller]
    pub fn capture(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(kind, message).with_frame(Frame::caller())
    }

    /// Converts a Rust error and its `source()` chain.
    ///
    /// The outer link is named after `E`, the sources are named `cause`.
    pub fn from_error<E: Error + ?Sized>(error: &E) -> Self {
        let mut links = vec![Fault::new(core::any::type_name::<E>(), error.to_string())];
        let mut source = error.source();
        while let Some(err) = source {
            links.push(Fault::new("cause", err.to_string()));
            source = err.source();
        }
        let mut fault = links.pop().map(Box::new);
        while let Some(mut outer) = links.pop() {
            outer.cause = fault;
            fault = Some(Box::new(outer));
        }
        fault.map_or_else(|| Fault::bare("error"), |f| *f)
    }

    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    #[must_use]
    pub fn caused_by(mut self, cause: Fault) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Iterates over this fault followed by its causes.
    pub fn chain(&self) -> impl Iterator<Item = &Fault> {
        core::iter::successors(Some(self), |f| f.cause.as_deref())
    }

    /// Number of links in the chain, this one included.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.kind),
            None => f.write_str(&self.kind),
        }
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn Error + 'static))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Fault, Frame};

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, thiserror::Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn caller_points_here() {
        let frame = Frame::caller();
        assert!(frame.file.ends_with("fault.rs"));
        assert!(frame.line > 0);
    }

    #[test]
    fn from_error_walks_sources() {
        let fault = Fault::from_error(&Outer(Inner));
        let messages: Vec<_> = fault.chain().map(|f| f.message.as_deref()).collect();
        assert_eq!(messages, [Some("outer"), Some("inner")]);
        assert!(fault.kind.ends_with("Outer"));
        assert_eq!(fault.cause.as_ref().unwrap().kind, "cause");
    }

    #[test]
    fn source_follows_cause() {
        use core::error::Error;

        let fault = Fault::bare("top").caused_by(Fault::new("low", "boom"));
        assert_eq!(fault.to_string(), "top");
        assert_eq!(fault.source().unwrap().to_string(), "low: boom");
    }
}
