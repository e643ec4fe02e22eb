mod foreign;
mod numeric;

use std::{fmt::Display, rc::Rc};

use enumflags2::{bitflags, make_bitflags, BitFlags};

use crate::{
    context::{Context, Location},
    ClassObject, ForeignObject, Handle, Slot, TryGetError, TryGetResult,
};

pub use foreign::Foreign;

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueType {
    Null = 0b0000_0001,
    Bool = 0b0000_0010,
    Num = 0b0000_0100,
    Str = 0b0000_1000,
    Class = 0b0001_0000,
    Foreign = 0b0010_0000,
}

const ANY: BitFlags<ValueType> = make_bitflags!(ValueType::{Null | Bool | Num | Str | Class | Foreign});

/// Everything a slot can hold. Numbers are always doubles, the same way
/// they are for a dynamically typed caller.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Class(Rc<ClassObject>),
    Foreign(Rc<ForeignObject>),
}

impl Value {
    #[must_use]
    pub const fn get_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Bool(_) => ValueType::Bool,
            Self::Num(_) => ValueType::Num,
            Self::Str(_) => ValueType::Str,
            Self::Class(_) => ValueType::Class,
            Self::Foreign(_) => ValueType::Foreign,
        }
    }
}

/// Reads a Rust value out of a slot
pub trait GetValue: Sized {
    /// Slot types that `try_from_value` knows how to convert
    const COMPATIBLE_TYPES: BitFlags<ValueType>;

    /// Convert a value whose type is one of `COMPATIBLE_TYPES`.
    /// Returns `None` when the value can't be represented as `Self`.
    fn try_from_value(value: &Value) -> Option<Self>;

    fn try_get_slot<V, L: Location>(
        context: &Context<'_, V, L>,
        slot: Slot,
    ) -> TryGetResult<Self> {
        let value = context
            .get_slot_value(slot)
            .ok_or(TryGetError::MissingSlot(slot))?;
        let found = value.get_type();

        if !Self::COMPATIBLE_TYPES.contains(found) {
            return Err(TryGetError::IncompatibleType {
                slot,
                expected: Self::COMPATIBLE_TYPES,
                found,
            });
        }

        Self::try_from_value(value).ok_or(TryGetError::Unrepresentable {
            slot,
            target: std::any::type_name::<Self>(),
        })
    }
}

/// Writes a Rust value into a slot
pub trait SetValue {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot);
}

/// A group of values read from consecutive slots
pub trait GetArgs: Sized {
    const COUNT: usize;

    fn try_get_slots<V, L: Location>(
        context: &Context<'_, V, L>,
        start: Slot,
    ) -> TryGetResult<Self>;
}

/// A group of values written to consecutive slots
pub trait SetArgs {
    const COUNT: usize;

    fn set_slots<V, L: Location>(&self, context: &mut Context<'_, V, L>, start: Slot);
}

// () is implemented to allow skipping slots
// and to send null to the caller
impl GetValue for () {
    const COMPATIBLE_TYPES: BitFlags<ValueType> = ANY;

    fn try_from_value(_: &Value) -> Option<Self> {
        Some(())
    }
}

impl SetValue for () {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        context.set_slot_value(slot, Value::Null);
    }
}

impl<T: SetValue + ?Sized> SetValue for &T {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        (*self).set_slot(context, slot);
    }
}

impl GetValue for bool {
    const COMPATIBLE_TYPES: BitFlags<ValueType> = make_bitflags!(ValueType::{Bool});

    fn try_from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl SetValue for bool {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        context.set_slot_value(slot, Value::Bool(*self));
    }
}

impl GetValue for String {
    const COMPATIBLE_TYPES: BitFlags<ValueType> = make_bitflags!(ValueType::{Str});

    fn try_from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl SetValue for String {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        self.as_str().set_slot(context, slot);
    }
}

impl SetValue for str {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        context.set_slot_value(slot, Value::Str(self.to_string()));
    }
}

impl GetValue for Handle {
    // We are always able to get a handle
    const COMPATIBLE_TYPES: BitFlags<ValueType> = ANY;

    fn try_from_value(value: &Value) -> Option<Self> {
        Some(Self::new(value.clone()))
    }
}

impl SetValue for Handle {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        context.set_slot_value(slot, self.value().clone());
    }
}

impl<T: GetValue> GetValue for Option<T> {
    const COMPATIBLE_TYPES: BitFlags<ValueType> =
        T::COMPATIBLE_TYPES.union_c(make_bitflags!(ValueType::{Null}));

    fn try_from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            value => T::try_from_value(value).map(Some),
        }
    }
}

impl<T: SetValue> SetValue for Option<T> {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        match self {
            Some(value) => value.set_slot(context, slot),
            None => ().set_slot(context, slot),
        }
    }
}

// Returning an error from a foreign function aborts the call
impl<T: SetValue, E: Display> SetValue for Result<T, E> {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        match self {
            Ok(value) => value.set_slot(context, slot),
            Err(error) => context.raise(error.to_string()),
        }
    }
}

impl GetArgs for () {
    const COUNT: usize = 0;

    fn try_get_slots<V, L: Location>(_: &Context<'_, V, L>, _: Slot) -> TryGetResult<Self> {
        Ok(())
    }
}

impl SetArgs for () {
    const COUNT: usize = 0;

    fn set_slots<V, L: Location>(&self, _: &mut Context<'_, V, L>, _: Slot) {}
}

macro_rules! impl_args {
    ($count:literal; $($name:ident: $index:tt),+) => {
        impl<$($name: GetValue),+> GetArgs for ($($name,)+) {
            const COUNT: usize = $count;

            fn try_get_slots<V, L: Location>(
                context: &Context<'_, V, L>,
                start: Slot,
            ) -> TryGetResult<Self> {
                Ok(($($name::try_get_slot(context, start + $index)?,)+))
            }
        }

        impl<$($name: SetValue),+> SetArgs for ($($name,)+) {
            const COUNT: usize = $count;

            fn set_slots<V, L: Location>(&self, context: &mut Context<'_, V, L>, start: Slot) {
                $(self.$index.set_slot(context, start + $index);)+
            }
        }
    };
}

impl_args!(1; A: 0);
impl_args!(2; A: 0, B: 1);
impl_args!(3; A: 0, B: 1, C: 2);
impl_args!(4; A: 0, B: 1, C: 2, D: 3);
impl_args!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
impl_args!(6; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
