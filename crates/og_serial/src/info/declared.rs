use core::fmt;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// ScalarKind

/// The scalar shapes a [`Value`](crate::Value) can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Text,
    /// A UTC timestamp, written as RFC 3339 text.
    Date,
}

impl ScalarKind {
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Text => "text",
            ScalarKind::Date => "date",
        }
    }
}

// -----------------------------------------------------------------------------
// Declared

/// The type declared at a use site: a field, a container element or the root.
///
/// `Exact` names a concrete composite type; values of exactly that type are
/// written without a discriminator. `Abstract` and `Any` are polymorphic:
/// composites placed there carry the discriminator tag of their runtime type.
///
/// Container declarations describe their elements, map keys are always scalars.
#[derive(Clone, Copy)]
pub enum Declared {
    /// Anything, scalars included.
    Any,
    Scalar(ScalarKind),
    /// A concrete composite type.
    Exact(&'static TypeInfo),
    /// An interface-like type, named for diagnostics only.
    Abstract(&'static str),
    /// An ordered sequence (array, list) of elements.
    Sequence(&'static Declared),
    /// A keyed collection (set, bag) of elements.
    Collection(&'static Declared),
    /// A map from scalar keys to values.
    Map(&'static Declared),
    Markup,
    Fault,
}

impl Declared {
    pub const BOOL: Declared = Declared::Scalar(ScalarKind::Bool);
    pub const INT: Declared = Declared::Scalar(ScalarKind::Int);
    pub const FLOAT: Declared = Declared::Scalar(ScalarKind::Float);
    pub const TEXT: Declared = Declared::Scalar(ScalarKind::Text);
    pub const DATE: Declared = Declared::Scalar(ScalarKind::Date);

    /// Returns `true` for `Any` and `Abstract`, where the runtime type decides.
    #[inline]
    pub const fn is_polymorphic(&self) -> bool {
        matches!(self, Declared::Any | Declared::Abstract(_))
    }

    /// Returns `true` if a composite of type `ty` needs no discriminator here.
    #[inline]
    pub fn is_exactly(&self, ty: &TypeInfo) -> bool {
        matches!(self, Declared::Exact(expected) if expected.is(ty))
    }

    /// Returns `true` if this is the given scalar kind.
    #[inline]
    pub fn is_scalar(&self, kind: ScalarKind) -> bool {
        matches!(self, Declared::Scalar(k) if *k == kind)
    }

    /// The declared element type of a container declaration, or `Any`.
    pub const fn element(&self) -> Declared {
        match self {
            Declared::Sequence(item) | Declared::Collection(item) | Declared::Map(item) => **item,
            _ => Declared::Any,
        }
    }

    /// A human readable name used in diagnostics.
    pub fn describe(&self) -> DeclaredName<'_> {
        DeclaredName(self)
    }
}

impl fmt::Debug for Declared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.describe(), f)
    }
}

/// [`Display`](fmt::Display) helper returned by [`Declared::describe`].
pub struct DeclaredName<'a>(&'a Declared);

impl fmt::Display for DeclaredName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Declared::Any => f.write_str("any"),
            Declared::Scalar(kind) => f.write_str(kind.name()),
            Declared::Exact(info) => f.write_str(info.type_path()),
            Declared::Abstract(name) => write!(f, "dyn {name}"),
            Declared::Sequence(item) => write!(f, "[{}]", item.describe()),
            Declared::Collection(item) => write!(f, "{{{}}}", item.describe()),
            Declared::Map(item) => write!(f, "map<{}>", item.describe()),
            Declared::Markup => f.write_str("markup"),
            Declared::Fault => f.write_str("fault"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
