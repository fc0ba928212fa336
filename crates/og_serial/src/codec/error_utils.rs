use alloc::vec::Vec;
use core::fmt::{self, Debug, Display, Formatter};

/// The labels of the objects being traversed, outermost first.
///
/// Composites push their type path, other objects their shape name.
#[derive(Default, Clone)]
pub(super) struct TypeStack {
    stack: Vec<&'static str>,
}

impl TypeStack {
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, label: &'static str) {
        self.stack.push(label);
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

impl Debug for TypeStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut iter = self.stack.iter();

        if let Some(first) = iter.next() {
            write!(f, "`{first}`")?;
        }

        for label in iter {
            write!(f, " -> `{label}`")?;
        }

        Ok(())
    }
}

/// Formats a codec error message.
///
/// Prefer this over a bare message: in debug builds with the `debug` feature
/// it appends the [`TypeStack`].
#[cfg(all(debug_assertions, feature = "debug"))]
pub(super) fn describe(msg: impl Display, stack: &TypeStack) -> String {
    if stack.is_empty() {
        msg.to_string()
    } else {
        format!("{msg} (stack: {stack:?})")
    }
}

#[cfg(not(all(debug_assertions, feature = "debug")))]
#[inline]
pub(super) fn describe(msg: impl Display, _stack: &TypeStack) -> String {
    msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::TypeStack;

    #[test]
    fn stack_debug() {
        let mut stack = TypeStack::new();
        stack.push("demo::Car");
        stack.push("sequence");
        assert_eq!(format!("{stack:?}"), "`demo::Car` -> `sequence`");
        stack.pop();
        stack.pop();
        assert!(stack.is_empty());
    }
}
