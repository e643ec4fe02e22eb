use std::io::Write;

use anyhow::Context as _;
use bind::{context::Native, Context, VmUserData};

use crate::bindings::Demo;

/// Drive the `Test` class through every binding and print the results.
/// Nothing is written to `out` for calls whose result isn't shown, and
/// the first failing call stops the run.
pub fn run<V, W>(context: &mut Context<'_, V, Native>, out: &mut W) -> anyhow::Result<()>
where
    V: VmUserData,
    W: Write,
{
    let demo = Demo::bind(context).context("binding the Test class")?;

    demo.static_method(context).context("calling Test.staticMethod()")?;
    let test = demo.new_test(context).context("calling Test.new()")?;

    test.increment(context).context("calling increment()")?;
    test.add_number(context, 2).context("calling addNumber(_)")?;
    test.echo(context, "hello from c").context("calling echo(_)")?;

    let upper = test
        .make_upper(context, "lower to upper")
        .context("calling makeUpper(_)")?;
    writeln!(out, "Lower to upper: {}", upper)?;

    test.set_title(context, "set property from c").context("setting title")?;
    let title = test.title(context).context("getting title")?;
    writeln!(out, "Title property: {}", title)?;

    let value = test.get_value(context).context("calling getValue()")?;
    writeln!(out, "The counter's value is {}", value)?;

    let double_value = test
        .get_double_value(context)
        .context("calling getDoubleValue()")?;
    writeln!(out, "The counter's double value is {:.16}", double_value)?;

    let _drink = demo.pick_drink(context).context("calling Test.pickDrink()")?;

    Ok(())
}

#[cfg(test)]
mod test {
    use bind::{CallError, Vm, VmUserData};

    use super::run;
    use crate::DemoUserData;

    const EXPECTED: &str = "Lower to upper: LOWER TO UPPER
Title property: set property from c
The counter's value is 3
The counter's double value is 3.0000000000000000
";

    #[test]
    fn prints_the_four_results() {
        let mut vm = Vm::new(DemoUserData::default());
        let mut out = Vec::new();

        run(&mut vm.get_context(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), EXPECTED);
    }

    #[test]
    fn each_run_uses_a_fresh_instance() {
        let mut vm = Vm::new(DemoUserData::default());

        for _ in 0..2 {
            let mut out = Vec::new();
            run(&mut vm.get_context(), &mut out).unwrap();
            assert_eq!(String::from_utf8(out).unwrap(), EXPECTED);
        }
    }

    struct Unbound;

    impl VmUserData for Unbound {}

    #[test]
    fn fails_without_bindings() {
        let mut vm = Vm::new(Unbound);
        let mut out = Vec::new();

        let error = run(&mut vm.get_context(), &mut out).unwrap_err();

        assert!(out.is_empty());
        assert!(matches!(
            error.downcast_ref::<CallError>(),
            Some(CallError::UnknownClass { .. })
        ));
    }
}
