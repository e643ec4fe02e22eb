use std::{marker::PhantomData, rc::Rc};

use log::{debug, trace, warn};

use super::{
    foreign::ClassObject, value, CallError, CallHandle, ErrorContext, ErrorKind, GetArgs,
    GetValue, Handle, Result, SetArgs, SetValue, Slot, State, TryGetError, TryGetResult, Value,
    ValueType, VmUserData,
};

/// Access to the VM from either the host (`Native`) or from inside a
/// foreign method (`Foreign`). The location decides which operations are
/// available: only the host can start calls, only a foreign method can
/// abort one.
pub struct Context<'vm, V, L: Location> {
    state: &'vm mut State<V>,
    location: PhantomData<L>,
}

impl<'vm, V, L: Location> Context<'vm, V, L> {
    pub(crate) fn new(state: &'vm mut State<V>) -> Self {
        Self {
            state,
            location: PhantomData,
        }
    }

    // Foreign is more restrictive than native so this is always a downcast
    fn as_foreign(&mut self) -> Context<'_, V, Foreign> {
        Context::new(&mut *self.state)
    }

    pub fn get_user_data(&self) -> &V {
        &self.state.user_data
    }

    pub fn get_user_data_mut(&mut self) -> &mut V {
        &mut self.state.user_data
    }

    pub fn ensure_slots(&mut self, num_slots: Slot) {
        if self.state.slots.len() < num_slots {
            self.state.slots.resize(num_slots, Value::Null);
        }
    }

    pub fn get_slot_count(&self) -> Slot {
        self.state.slots.len()
    }

    #[must_use]
    pub fn get_slot_value(&self, slot: Slot) -> Option<&Value> {
        self.state.slots.get(slot)
    }

    pub fn set_slot_value(&mut self, slot: Slot, value: Value) {
        self.ensure_slots(slot + 1);
        self.state.slots[slot] = value;
    }

    // Note this is only valid till the next &mut call
    pub fn get_stack_types(&self) -> Vec<ValueType> {
        self.state.slots.iter().map(Value::get_type).collect()
    }

    pub fn get_slot<G: GetValue>(&self, slot: Slot) -> TryGetResult<G> {
        G::try_get_slot(self, slot)
    }

    pub fn get_stack<Args: GetArgs>(&self) -> TryGetResult<Args> {
        Args::try_get_slots(self, 0)
    }

    pub fn get_return_value<G: GetValue>(&self) -> TryGetResult<G> {
        G::try_get_slot(self, 0)
    }

    pub fn set_stack<Args: SetArgs + ?Sized>(&mut self, args: &Args) {
        args.set_slots(self, 0);
    }

    pub fn set_return_value<S: SetValue + ?Sized>(&mut self, value: &S) {
        value.set_slot(self, 0);
    }

    /// Typed access to the foreign object in `slot`
    pub fn get_foreign<T: 'static>(&self, slot: Slot) -> Result<value::Foreign<T>> {
        match self.get_slot_value(slot) {
            Some(Value::Foreign(object)) => value::Foreign::new(Rc::clone(object)),
            Some(value) => Err(CallError::InvalidSubject(value.get_type())),
            None => Err(TryGetError::MissingSlot(slot).into()),
        }
    }

    pub(crate) fn raise(&mut self, message: String) {
        self.set_slot_value(0, Value::Str(message.clone()));
        self.state.abort = Some(message);
    }

    pub(crate) fn take_abort(&mut self) -> Option<String> {
        self.state.abort.take()
    }

    fn reset_slots(&mut self, num_slots: Slot) {
        self.state.slots.clear();
        self.ensure_slots(num_slots);
    }
}

impl<'vm, V> Context<'vm, V, Foreign> {
    /// Stop the current call, the message is reported to the host as a
    /// runtime error
    pub fn abort<S>(&mut self, message: S)
    where
        S: AsRef<str>,
    {
        self.raise(message.as_ref().to_string());
    }

    /// Forward text to the host's `on_write`
    pub fn write<S>(&mut self, text: S)
    where
        S: AsRef<str>,
        V: VmUserData,
    {
        self.state.user_data.on_write(text.as_ref());
    }
}

// Calling can only happen from a native context
impl<'vm, V: VmUserData> Context<'vm, V, Native> {
    /// Look up a class the host has bound under `module`
    pub fn get_variable<M, N>(&mut self, module: M, name: N) -> Result<Handle>
    where
        M: AsRef<str>,
        N: AsRef<str>,
    {
        let (module, name) = (module.as_ref(), name.as_ref());
        let key = (module.to_string(), name.to_string());

        if let Some(class) = self.state.classes.get(&key) {
            return Ok(Handle::new(Value::Class(Rc::clone(class))));
        }

        let methods = self
            .state
            .user_data
            .bind_foreign_class(module, name)
            .ok_or_else(|| CallError::UnknownClass {
                module: module.to_string(),
                class: name.to_string(),
            })?;
        debug!("bound class {}.{}", module, name);

        let class = Rc::new(ClassObject::new(module, name, methods));
        self.state.classes.insert(key, Rc::clone(&class));
        Ok(Handle::new(Value::Class(class)))
    }

    /// Create a new instance of a foreign class
    pub fn construct(&mut self, class: &Handle) -> Result<Handle> {
        let Value::Class(class) = class.value() else {
            return Err(CallError::InvalidSubject(class.get_type()));
        };
        let object = class
            .allocate()
            .ok_or_else(|| CallError::NotConstructible(class.name().to_string()))?;
        trace!("constructed {}.{}", class.module(), class.name());

        let instance = Value::Foreign(Rc::new(object));
        self.reset_slots(1);
        self.set_slot_value(0, instance.clone());
        Ok(Handle::new(instance))
    }

    /// Call [method] on a [subject] with [args]
    /// subject is a class for static methods and an instance otherwise
    pub fn call<G: GetValue, Args: SetArgs + ?Sized>(
        &mut self,
        subject: &Handle,
        method: &CallHandle,
        args: &Args,
    ) -> Result<G> {
        if method.get_argument_count() != Args::COUNT {
            return Err(CallError::IncorrectNumberOfArgsPassed {
                signature: method.signature().to_string(),
                expected: method.get_argument_count(),
                found: Args::COUNT,
            });
        }

        let (module, class, is_static) = match subject.value() {
            Value::Class(class) => (class.module(), class.name(), true),
            Value::Foreign(object) => (object.module_name(), object.class_name(), false),
            value => return Err(CallError::InvalidSubject(value.get_type())),
        };

        let foreign = self.state.user_data.bind_foreign_method(
            module,
            class,
            is_static,
            method.signature(),
        );
        let Some(foreign) = foreign else {
            self.state
                .user_data
                .on_error(ErrorKind::UnboundMethod(ErrorContext {
                    module,
                    class,
                    signature: method.signature(),
                }));
            return Err(CallError::UnboundMethod {
                module: module.to_string(),
                class: class.to_string(),
                signature: method.signature().to_string(),
            });
        };

        // Sending is always done the same way: the subject goes into
        // slot 0 and its arguments follow
        self.reset_slots(Args::COUNT + 1);
        subject.set_slot(self, 0);
        args.set_slots(self, 1);

        trace!("calling {}.{} {}", module, class, method.signature());
        self.state.abort = None;
        foreign(&mut self.as_foreign());

        if let Some(message) = self.take_abort() {
            warn!("{}.{} {} aborted: {}", module, class, method.signature(), message);
            self.state.user_data.on_error(ErrorKind::Runtime(&message));
            return Err(CallError::Runtime(message));
        }

        self.get_return_value().map_err(Into::into)
    }
}

mod sealed {
    use super::{Foreign, Native};

    pub trait Location {}
    impl Location for Foreign {}
    impl Location for Native {}
}

pub trait Location: sealed::Location {}
#[derive(Clone, Debug)]
pub struct Foreign;
impl Location for Foreign {}
#[derive(Clone, Debug)]
pub struct Native;
impl Location for Native {}

mod assert {
    use super::{Context, Native, State};

    // A context is only a borrow of the VM state, it should stay as cheap
    // to pass around as a pointer
    static_assertions::assert_eq_size!(Context<'static, (), Native>, &'static mut State<()>);
}
