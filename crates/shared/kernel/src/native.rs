//! Identity of the native failure types the registry maps from.

use std::any::{Any, TypeId};
use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Identity {
    Type(TypeId),
    Io(io::ErrorKind),
}

/// A native failure type, compared by identity only.
///
/// Standard I/O failures share one Rust type, so they are told apart by
/// [`io::ErrorKind`] instead.
#[derive(Clone, Copy)]
pub struct NativeType {
    identity: Identity,
    name: &'static str,
}

impl NativeType {
    /// Identity of the concrete type `E`.
    #[must_use]
    pub fn of<E: ?Sized + 'static>() -> Self {
        Self { identity: Identity::Type(TypeId::of::<E>()), name: std::any::type_name::<E>() }
    }

    /// Identity of an I/O failure of the given kind.
    #[must_use]
    pub fn io(kind: io::ErrorKind) -> Self {
        Self { identity: Identity::Io(kind), name: "std::io::Error" }
    }

    /// Identity of a live error value; [`io::Error`] values map to their kind.
    #[must_use]
    pub fn of_error<E: StdError + 'static>(error: &E) -> Self {
        match (error as &dyn Any).downcast_ref::<io::Error>() {
            Some(io_error) => Self::io(io_error.kind()),
            None => Self::of::<E>(),
        }
    }

    /// Fully qualified type name, for diagnostics only.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The I/O kind, when this is an I/O identity.
    #[must_use]
    pub const fn io_kind(&self) -> Option<io::ErrorKind> {
        match self.identity {
            Identity::Io(kind) => Some(kind),
            Identity::Type(_) => None,
        }
    }

    /// Last path segment of [`NativeType::name`], e.g. `ParseIntError`.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for NativeType {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for NativeType {}

impl Hash for NativeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Debug for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity {
            Identity::Io(kind) => write!(f, "NativeType(io::{kind:?})"),
            Identity::Type(_) => write!(f, "NativeType({})", self.name),
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity {
            Identity::Io(kind) => write!(f, "io::{kind:?}"),
            Identity::Type(_) => f.write_str(self.name),
        }
    }
}
