//! This is the simplest happy path

use bind::test::{call_test_case, create_test_vm};
use bind::CallError;
use bind_macros::foreign_static_method;

#[foreign_static_method]
fn foreign_test(a: f64, b: f64, c: f64) -> f64 {
    a + b + c
}

#[foreign_static_method]
fn foreign_test2(a: String, b: String, c: String) -> String {
    a + &b + &c
}

#[foreign_static_method]
fn foreign_test3() -> Result<f64, String> {
    Err("This thing failed or something".to_string())
}

#[foreign_static_method]
fn foreign_test4<'a>() -> &'a str {
    "This is a test str"
}

fn main() {
    let (mut vm, test) = create_test_vm(|f| {
        f.set_static_foreign_method("foreignTest(_,_,_)", foreign_test);
        f.set_static_foreign_method("foreignTest2(_,_,_)", foreign_test2);
        f.set_static_foreign_method("foreignTest3()", foreign_test3);
        f.set_static_foreign_method("foreignTest4()", foreign_test4);
    });

    let mut context = vm.get_context();

    call_test_case!(context {
        test.foreignTest(1.0, 2.0, 3.0) == Ok(6.0)
        test.foreignTest2("One", "Two", "Three") == Ok("OneTwoThree".to_string())
        test.foreignTest3() == Err::<f64, _>(CallError::Runtime("This thing failed or something".to_string()))
        test.foreignTest4() == Ok("This is a test str".to_string())
    });

    // A wrong argument type aborts the call instead of panicking
    let foreign_test = bind::CallHandle::new("foreignTest(_,_,_)");
    let result = context.call::<f64, _>(&test, &foreign_test, &(1.0, "two", 3.0));
    assert!(matches!(result, Err(CallError::Runtime(_))));
}
