//! Instance methods borrow the foreign object they were called on

use bind::test::{call_test_case, create_test_vm};
use bind_macros::{foreign_method, foreign_static_method};

#[derive(Default)]
struct Counter {
    value: i32,
}

#[foreign_method]
fn add(counter: &mut Counter, n: i32) {
    counter.value += n;
}

#[foreign_method]
fn value(counter: &Counter) -> i32 {
    counter.value
}

#[foreign_method]
fn describe(counter: &Counter, prefix: String) -> String {
    format!("{}{}", prefix, counter.value)
}

#[foreign_static_method]
fn zero() -> i32 {
    0
}

fn main() {
    let (mut vm, test) = create_test_vm(|f| {
        f.set_foreign_class::<Counter>();
        f.set_foreign_method("add(_)", add);
        f.set_foreign_method("value()", value);
        f.set_foreign_method("describe(_)", describe);
        f.set_static_foreign_method("zero()", zero);
    });

    let mut context = vm.get_context();
    let counter = context.construct(&test).unwrap();

    call_test_case!(context {
        test.zero() == Ok(0)
        counter.add(2) == Ok(())
        counter.add(3) == Ok(())
        counter.value() == Ok(5)
        counter.describe("count: ") == Ok("count: 5".to_string())
    });
}
