#![deny(clippy::all)]
#![warn(clippy::pedantic, clippy::nursery)]
#![forbid(unsafe_code)]

pub mod context;
mod error;
mod foreign;
mod handle;
pub mod user_data;
mod value;

pub use context::Context;
pub use error::{CallError, TryGetError, TryGetResult};
pub use foreign::{ClassObject, ForeignClassMethods, ForeignObject};
pub use handle::{CallHandle, Handle};
pub use user_data::UserData as VmUserData;
pub use value::{Foreign, GetArgs, GetValue, SetArgs, SetValue, Value, ValueType};

// Used by `call_test_case!` so callers don't need their own dependency on the macros
#[doc(hidden)]
pub use bind_macros as macros;

use std::{collections::HashMap, rc::Rc};

pub type Slot = usize;
pub type Result<T> = std::result::Result<T, CallError>;

/// A function the host exposes to callers through a class.
/// Slot 0 holds the receiver (class or instance), the arguments follow it
/// and whatever is left in slot 0 afterwards is the return value.
pub type ForeignMethod<V> = for<'a, 'vm> fn(&'a mut Context<'vm, V, context::Foreign>);

#[derive(Debug)]
pub struct ErrorContext<'s> {
    pub module: &'s str,
    pub class: &'s str,
    pub signature: &'s str,
}

#[derive(Debug)]
pub enum ErrorKind<'s> {
    Runtime(&'s str),
    UnboundMethod(ErrorContext<'s>),
}

pub(crate) struct State<V> {
    pub(crate) slots: Vec<Value>,
    pub(crate) classes: HashMap<(String, String), Rc<ClassObject>>,
    pub(crate) abort: Option<String>,
    pub(crate) user_data: V,
}

pub struct Vm<V: VmUserData> {
    state: State<V>,
}

impl<V: VmUserData> Vm<V> {
    pub fn new(user_data: V) -> Self {
        Self {
            state: State {
                slots: Vec::new(),
                classes: HashMap::new(),
                abort: None,
                user_data,
            },
        }
    }

    pub fn get_context(&mut self) -> Context<'_, V, context::Native> {
        Context::new(&mut self.state)
    }

    pub const fn get_user_data(&self) -> &V {
        &self.state.user_data
    }

    pub fn into_user_data(self) -> V {
        self.state.user_data
    }
}
