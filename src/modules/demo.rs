use bind::{
    context::{Foreign, Location},
    Context, GetValue, SetValue, Slot, Value, ValueType, VmUserData,
};
use bind_macros::{call_signature, foreign_method, foreign_static_method, setter_signature};
use enumflags2::BitFlags;
use log::info;

use super::{Class, Module};

pub const MODULE: &str = "demo";
pub const TEST_CLASS: &str = "Test";

pub fn init_module() -> Module {
    let mut test_class = Class::foreign::<Test>();
    test_class
        .static_methods
        .insert(call_signature!(staticMethod, 0), static_method);
    test_class
        .static_methods
        .insert(call_signature!(pickDrink, 0), pick_drink);

    test_class
        .methods
        .insert(call_signature!(increment, 0), increment);
    test_class
        .methods
        .insert(call_signature!(addNumber, 1), add_number);
    test_class.methods.insert(call_signature!(echo, 1), echo);
    test_class
        .methods
        .insert(call_signature!(makeUpper, 1), make_upper);
    test_class.methods.insert(call_signature!(title), title);
    test_class
        .methods
        .insert(setter_signature!(title), set_title);
    test_class
        .methods
        .insert(call_signature!(getValue, 0), get_value);
    test_class
        .methods
        .insert(call_signature!(getDoubleValue, 0), get_double_value);

    let mut module = Module::new();
    module.classes.insert(TEST_CLASS, test_class);
    module
}

/// State behind every `Test` instance
#[derive(Debug, Default)]
pub struct Test {
    counter: i32,
    title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drink {
    Water,
    Juice,
    Soda,
}

impl TryFrom<i32> for Drink {
    type Error = i32;

    fn try_from(ordinal: i32) -> Result<Self, Self::Error> {
        match ordinal {
            0 => Ok(Self::Water),
            1 => Ok(Self::Juice),
            2 => Ok(Self::Soda),
            unknown => Err(unknown),
        }
    }
}

// Drinks cross the boundary as their ordinal
impl GetValue for Drink {
    const COMPATIBLE_TYPES: BitFlags<ValueType> = <i32 as GetValue>::COMPATIBLE_TYPES;

    fn try_from_value(value: &Value) -> Option<Self> {
        i32::try_from_value(value).and_then(|ordinal| Self::try_from(ordinal).ok())
    }
}

impl SetValue for Drink {
    fn set_slot<V, L: Location>(&self, context: &mut Context<'_, V, L>, slot: Slot) {
        (*self as i32).set_slot(context, slot);
    }
}

#[foreign_static_method]
fn static_method() {
    info!("static method called");
}

#[foreign_static_method]
const fn pick_drink() -> Drink {
    Drink::Water
}

impl Test {
    fn add(&mut self, n: i32) -> Result<(), String> {
        self.counter = self
            .counter
            .checked_add(n)
            .ok_or_else(|| format!("adding {} to {} overflows the counter", n, self.counter))?;
        Ok(())
    }
}

#[foreign_method]
fn increment(test: &mut Test) -> Result<(), String> {
    test.add(1)
}

#[foreign_method]
fn add_number(test: &mut Test, n: i32) -> Result<(), String> {
    test.add(n)
}

// Goes through the host's writer so the text never reaches stdout directly
fn echo<V: VmUserData>(context: &mut Context<'_, V, Foreign>) {
    let text = context
        .get_foreign::<Test>(0)
        .and_then(|_| Ok(context.get_slot::<String>(1)?));
    match text {
        Ok(text) => {
            context.write(text + "\n");
            context.set_return_value(&());
        }
        Err(error) => context.abort(error.to_string()),
    }
}

#[foreign_method]
fn make_upper(_test: &Test, text: String) -> String {
    text.to_uppercase()
}

#[foreign_method]
fn title(test: &Test) -> String {
    test.title.clone()
}

#[foreign_method]
fn set_title(test: &mut Test, title: String) {
    test.title = title;
}

#[foreign_method]
const fn get_value(test: &Test) -> i32 {
    test.counter
}

#[foreign_method]
fn get_double_value(test: &Test) -> f64 {
    f64::from(test.counter)
}

#[cfg(test)]
mod test {
    use bind::{test::create_test_vm, CallError, CallHandle, Handle, Vm};

    use super::{echo, Drink, MODULE, TEST_CLASS};
    use crate::DemoUserData;

    fn create_vm() -> (Vm<DemoUserData>, Handle) {
        let mut vm = Vm::new(DemoUserData::default());
        let class = vm.get_context().get_variable(MODULE, TEST_CLASS).unwrap();
        (vm, class)
    }

    #[test]
    fn counter_starts_at_zero() {
        let (mut vm, class) = create_vm();
        let mut context = vm.get_context();
        let test = context.construct(&class).unwrap();

        let value = context.call::<i32, _>(&test, &CallHandle::new("getValue()"), &());
        assert_eq!(value, Ok(0));
    }

    #[test]
    fn increment_and_add() {
        let (mut vm, class) = create_vm();
        let mut context = vm.get_context();
        let test = context.construct(&class).unwrap();

        context
            .call::<(), _>(&test, &CallHandle::new("increment()"), &())
            .unwrap();
        context
            .call::<(), _>(&test, &CallHandle::new("addNumber(_)"), &(41,))
            .unwrap();

        let value = context.call::<f64, _>(&test, &CallHandle::new("getDoubleValue()"), &());
        assert_eq!(value, Ok(42.0));
    }

    #[test]
    fn add_number_rejects_fractions() {
        let (mut vm, class) = create_vm();
        let mut context = vm.get_context();
        let test = context.construct(&class).unwrap();

        let result = context.call::<(), _>(&test, &CallHandle::new("addNumber(_)"), &(0.5,));
        assert!(matches!(result, Err(CallError::Runtime(_))));

        // A failed call leaves the counter alone
        let value = context.call::<i32, _>(&test, &CallHandle::new("getValue()"), &());
        assert_eq!(value, Ok(0));
    }

    #[test]
    fn counter_overflow_aborts() {
        let (mut vm, class) = create_vm();
        let mut context = vm.get_context();
        let test = context.construct(&class).unwrap();

        context
            .call::<(), _>(&test, &CallHandle::new("increment()"), &())
            .unwrap();
        let result = context.call::<(), _>(&test, &CallHandle::new("addNumber(_)"), &(i32::MAX,));
        assert!(matches!(result, Err(CallError::Runtime(_))));

        let value = context.call::<i32, _>(&test, &CallHandle::new("getValue()"), &());
        assert_eq!(value, Ok(1));
    }

    #[test]
    fn echo_needs_a_test_instance() {
        #[derive(Default)]
        struct NotATest;

        let (mut vm, class) = create_test_vm(|f| {
            f.set_foreign_class::<NotATest>();
            f.set_foreign_method("echo(_)", echo);
        });
        let mut context = vm.get_context();
        let other = context.construct(&class).unwrap();

        let result = context.call::<(), _>(&other, &CallHandle::new("echo(_)"), &("hi",));
        assert!(matches!(result, Err(CallError::Runtime(_))));
        assert_eq!(vm.get_user_data().get_output(), "");
    }

    #[test]
    fn title_is_a_property() {
        let (mut vm, class) = create_vm();
        let mut context = vm.get_context();
        let test = context.construct(&class).unwrap();

        context
            .call::<(), _>(&test, &CallHandle::new("title=(_)"), &("a title",))
            .unwrap();
        let title = context.call::<String, _>(&test, &CallHandle::new("title"), &());
        assert_eq!(title, Ok("a title".to_string()));
    }

    #[test]
    fn make_upper_and_echo() {
        let (mut vm, class) = create_vm();
        let mut context = vm.get_context();
        let test = context.construct(&class).unwrap();

        let upper = context.call::<String, _>(&test, &CallHandle::new("makeUpper(_)"), &("abc",));
        assert_eq!(upper, Ok("ABC".to_string()));

        let echoed = context.call::<(), _>(&test, &CallHandle::new("echo(_)"), &("hi",));
        assert_eq!(echoed, Ok(()));
    }

    #[test]
    fn static_methods() {
        let (mut vm, class) = create_vm();
        let mut context = vm.get_context();

        let result = context.call::<(), _>(&class, &CallHandle::new("staticMethod()"), &());
        assert_eq!(result, Ok(()));

        let drink = context.call::<Drink, _>(&class, &CallHandle::new("pickDrink()"), &());
        assert_eq!(drink, Ok(Drink::Water));
    }

    #[test]
    fn instance_methods_are_not_static() {
        let (mut vm, class) = create_vm();
        let mut context = vm.get_context();

        let result = context.call::<i32, _>(&class, &CallHandle::new("getValue()"), &());
        assert!(matches!(result, Err(CallError::UnboundMethod { .. })));
    }

    #[test]
    fn drinks_are_ordinals() {
        assert_eq!(Drink::try_from(2), Ok(Drink::Soda));
        assert_eq!(Drink::try_from(3), Err(3));
    }
}
