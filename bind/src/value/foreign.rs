use std::{
    cell::{Ref, RefMut},
    marker::PhantomData,
    rc::Rc,
};

use crate::{CallError, ForeignObject, Result};

/// A typed view of a foreign object.
/// Holding one keeps the object alive, the data itself is only reachable
/// through the guards returned by `borrow` and `borrow_mut`.
pub struct Foreign<T> {
    object: Rc<ForeignObject>,
    phantom: PhantomData<T>,
}

impl<T: 'static> Foreign<T> {
    pub(crate) fn new(object: Rc<ForeignObject>) -> Result<Self> {
        if object.is::<T>() {
            Ok(Self {
                object,
                phantom: PhantomData,
            })
        } else {
            Err(CallError::ForeignTypeMismatch {
                class: object.class_name().to_string(),
                expected: std::any::type_name::<T>(),
            })
        }
    }

    pub fn borrow(&self) -> Result<Ref<'_, T>> {
        let data = self
            .object
            .data
            .try_borrow()
            .map_err(|_| self.already_borrowed())?;
        Ref::filter_map(data, |data| data.downcast_ref::<T>()).map_err(|_| self.mismatch())
    }

    pub fn borrow_mut(&self) -> Result<RefMut<'_, T>> {
        let data = self
            .object
            .data
            .try_borrow_mut()
            .map_err(|_| self.already_borrowed())?;
        RefMut::filter_map(data, |data| data.downcast_mut::<T>()).map_err(|_| self.mismatch())
    }

    fn already_borrowed(&self) -> CallError {
        CallError::AlreadyBorrowed(self.object.class_name().to_string())
    }

    fn mismatch(&self) -> CallError {
        CallError::ForeignTypeMismatch {
            class: self.object.class_name().to_string(),
            expected: std::any::type_name::<T>(),
        }
    }
}
