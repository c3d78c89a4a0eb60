//! Write-once value used for fields that must never be replaced after being set.

use serde::{Serialize, Serializer};

/// Two-state tag: `Unset` until the first write, then `Set` forever.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Latch<T> {
    #[default]
    Unset,
    Set(T),
}

impl<T> Latch<T> {
    /// Store `value` if nothing is stored yet.
    ///
    /// Returns `true` when the transition happened, `false` if the latch was already set
    /// (the stored value is left untouched).
    pub fn set_once(&mut self, value: T) -> bool {
        match self {
            Latch::Unset => {
                *self = Latch::Set(value);
                true
            }
            Latch::Set(_) => false,
        }
    }

    /// Like [`set_once`](Self::set_once) but only evaluates `make` on the Unset path.
    pub fn set_once_with(&mut self, make: impl FnOnce() -> Option<T>) -> bool {
        if self.is_set() {
            return false;
        }
        match make() {
            Some(value) => self.set_once(value),
            None => false,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Latch::Set(_))
    }

    pub fn is_unset(&self) -> bool {
        !self.is_set()
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Latch::Unset => None,
            Latch::Set(value) => Some(value),
        }
    }

    /// Overwrite regardless of state. Only for explicit administrative corrections.
    pub(crate) fn replace(&mut self, value: T) {
        *self = Latch::Set(value);
    }
}

impl<T: Serialize> Serialize for Latch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}
