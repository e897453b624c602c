use std::fmt;

use crate::core::value::Value;

/// A nested update descriptor. A patch at depth 0 is a bare operation;
/// containers wrap a child's patch with [`Patch::Key`] or [`Patch::Index`]
/// while it bubbles toward the root, so the root always applies one fully
/// composed update.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Replace the addressed value in place.
    Set(Value),
    /// Remove `delete` elements at `index` of the addressed list and insert
    /// `insert` in their place.
    Splice {
        index: usize,
        delete: usize,
        insert: Vec<Value>,
    },
    /// Descend into an object key.
    Key { key: String, patch: Box<Patch> },
    /// Descend into a list index.
    Index { index: usize, patch: Box<Patch> },
}

impl Patch {
    pub fn set(value: Value) -> Self {
        Self::Set(value)
    }

    pub fn insert(index: usize, value: Value) -> Self {
        Self::Splice {
            index,
            delete: 0,
            insert: vec![value],
        }
    }

    pub fn at_key(self, key: impl Into<String>) -> Self {
        Self::Key {
            key: key.into(),
            patch: Box::new(self),
        }
    }

    pub fn at_index(self, index: usize) -> Self {
        Self::Index {
            index,
            patch: Box::new(self),
        }
    }

    /// Apply the patch to `target`, mutating only the addressed path.
    /// Untouched siblings are never rewritten.
    pub fn apply(&self, target: &mut Value) -> Result<(), PatchError> {
        match self {
            Self::Set(value) => {
                *target = value.clone();
                Ok(())
            }
            Self::Splice {
                index,
                delete,
                insert,
            } => {
                let Value::List(items) = target else {
                    return Err(PatchError::KindMismatch {
                        expected: "array",
                        found: target.kind_name(),
                    });
                };
                if index + delete > items.len() {
                    return Err(PatchError::IndexOutOfBounds {
                        index: *index,
                        len: items.len(),
                    });
                }
                items.splice(*index..*index + *delete, insert.iter().cloned());
                Ok(())
            }
            Self::Key { key, patch } => {
                let Value::Object(map) = target else {
                    return Err(PatchError::KindMismatch {
                        expected: "object",
                        found: target.kind_name(),
                    });
                };
                if !map.contains_key(key) {
                    // A set at a missing final key creates the entry; this
                    // is how an object add lands. Descending through a
                    // missing key is still an error.
                    if let Self::Set(value) = patch.as_ref() {
                        map.insert(key.clone(), value.clone());
                        return Ok(());
                    }
                    return Err(PatchError::MissingKey(key.clone()));
                }
                let Some(child) = map.get_mut(key) else {
                    return Err(PatchError::MissingKey(key.clone()));
                };
                patch.apply(child)
            }
            Self::Index { index, patch } => {
                let Value::List(items) = target else {
                    return Err(PatchError::KindMismatch {
                        expected: "array",
                        found: target.kind_name(),
                    });
                };
                let len = items.len();
                let Some(child) = items.get_mut(*index) else {
                    return Err(PatchError::IndexOutOfBounds { index: *index, len });
                };
                patch.apply(child)
            }
        }
    }

    /// Clone-then-apply convenience for hosts holding immutable snapshots.
    pub fn applied(&self, base: &Value) -> Result<Value, PatchError> {
        let mut next = base.clone();
        self.apply(&mut next)?;
        Ok(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },
    MissingKey(String),
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KindMismatch { expected, found } => {
                write!(f, "patch expects {expected}, value is {found}")
            }
            Self::MissingKey(key) => write!(f, "no such key: {key}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
        }
    }
}

impl std::error::Error for PatchError {}
