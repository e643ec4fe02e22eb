use enumflags2::BitFlags;
use thiserror::Error;

use super::{Slot, ValueType};

#[derive(Debug, Error, PartialEq)]
pub enum TryGetError {
    #[error("slot {0} is out of range")]
    MissingSlot(Slot),
    #[error("slot {slot} holds {found:?}, expected one of {expected:?}")]
    IncompatibleType {
        slot: Slot,
        expected: BitFlags<ValueType>,
        found: ValueType,
    },
    #[error("the value in slot {slot} does not fit in a {target}")]
    Unrepresentable { slot: Slot, target: &'static str },
}

pub type TryGetResult<T> = std::result::Result<T, TryGetError>;

#[derive(Debug, Error, PartialEq)]
pub enum CallError {
    /// A foreign method aborted with this message
    #[error("{0}")]
    Runtime(String),
    #[error("{signature} takes {expected} arguments but {found} were passed")]
    IncorrectNumberOfArgsPassed {
        signature: String,
        expected: usize,
        found: usize,
    },
    #[error("{module}.{class} has no foreign method {signature}")]
    UnboundMethod {
        module: String,
        class: String,
        signature: String,
    },
    #[error("module {module} has no class {class}")]
    UnknownClass { module: String, class: String },
    #[error("{0} is not a foreign class and cannot be constructed")]
    NotConstructible(String),
    #[error("{0:?} values cannot receive calls")]
    InvalidSubject(ValueType),
    #[error("instance of {class} is not a {expected}")]
    ForeignTypeMismatch {
        class: String,
        expected: &'static str,
    },
    #[error("instance of {0} is already in use")]
    AlreadyBorrowed(String),
    #[error(transparent)]
    TryGet(#[from] TryGetError),
}
