#![allow(clippy::module_name_repetitions)]

use std::borrow::Cow;

use super::{Value, ValueType};

/// A value the host holds on to between calls, usually a class or an
/// instance. The underlying object lives for as long as any handle or slot
/// still refers to it.
#[derive(Clone, Debug)]
pub struct Handle {
    value: Value,
}

impl Handle {
    pub(crate) const fn new(value: Value) -> Self {
        Self { value }
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub const fn get_type(&self) -> ValueType {
        self.value.get_type()
    }
}

/// A method signature paired with the number of arguments it expects
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallHandle {
    signature: Cow<'static, str>,
    argument_count: usize,
}

impl CallHandle {
    /// The argument count is the number of `_` placeholders after the
    /// opening parenthesis, so `title=(_)` takes one and `title` none.
    pub fn new<S>(signature: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        let signature = signature.into();
        let argument_count = signature
            .bytes()
            .skip_while(|byte| *byte != b'(')
            .filter(|byte| *byte == b'_')
            .count();

        Self {
            signature,
            argument_count,
        }
    }

    #[must_use]
    pub const fn get_argument_count(&self) -> usize {
        self.argument_count
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

#[cfg(test)]
mod test {
    use super::CallHandle;
    use bind_macros::{call_signature, setter_signature, to_signature};

    #[test]
    fn test_new_from_signature() {
        assert_eq!(CallHandle::new(call_signature!(Test)).get_argument_count(), 0);
        assert_eq!(CallHandle::new(call_signature!(Test, 0)).get_argument_count(), 0);
        assert_eq!(CallHandle::new(call_signature!(Test, 1)).get_argument_count(), 1);
        assert_eq!(CallHandle::new(call_signature!(Test, 2)).get_argument_count(), 2);
        assert_eq!(CallHandle::new(call_signature!(Test, 3)).get_argument_count(), 3);
    }

    #[test]
    fn setters_and_getters() {
        let setter = CallHandle::new(setter_signature!(title));
        assert_eq!(setter.signature(), "title=(_)");
        assert_eq!(setter.get_argument_count(), 1);

        let getter = CallHandle::new(to_signature!(title));
        assert_eq!(getter.signature(), "title");
        assert_eq!(getter.get_argument_count(), 0);
    }

    #[test]
    fn owned_signatures() {
        let handle = CallHandle::new(format!("{}(_,_)", "addTwo"));
        assert_eq!(handle.get_argument_count(), 2);
    }
}
