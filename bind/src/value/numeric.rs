use enumflags2::{make_bitflags, BitFlags};
use num_traits::{NumCast, ToPrimitive};

use super::{GetValue, SetValue, Value, ValueType};
use crate::{context::Context, context::Location, Slot};

const NUM: BitFlags<ValueType> = make_bitflags!(ValueType::{Num});

impl GetValue for f64 {
    const COMPATIBLE_TYPES: BitFlags<ValueType> = NUM;

    fn try_from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Num(num) => Some(*num),
            _ => None,
        }
    }
}

impl SetValue for f64 {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        context.set_slot_value(slot, Value::Num(*self));
    }
}

impl GetValue for f32 {
    const COMPATIBLE_TYPES: BitFlags<ValueType> = NUM;

    fn try_from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Num(num) if num.is_finite() => <Self as NumCast>::from(*num),
            Value::Num(num) => Some(*num as Self),
            _ => None,
        }
    }
}

impl SetValue for f32 {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        <f64 as From<f32>>::from(*self).set_slot(context, slot);
    }
}

// Integers only accept whole numbers that fit, anything else is
// reported as unrepresentable instead of being truncated
macro_rules! integral {
    ($($ty:ty),+) => {$(
        impl GetValue for $ty {
            const COMPATIBLE_TYPES: BitFlags<ValueType> = NUM;

            fn try_from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Num(num) if num.fract() == 0.0 => <$ty as NumCast>::from(*num),
                    _ => None,
                }
            }
        }

        impl SetValue for $ty {
            fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
                let num = self.to_f64().unwrap_or(f64::NAN);
                context.set_slot_value(slot, Value::Num(num));
            }
        }
    )+};
}

integral!(i32, i64, u32, usize);
