//! Typed wrappers over the `Test` class of the `demo` module. Call handles
//! are built once when the class is bound and reused for every call.

use bind::{context::Native, CallHandle, Context, Handle, Result, VmUserData};
use bind_macros::{call_signature, setter_signature};

use crate::modules::demo::{Drink, MODULE, TEST_CLASS};

pub struct Demo {
    class: Handle,
    static_method: CallHandle,
    pick_drink: CallHandle,
    increment: CallHandle,
    add_number: CallHandle,
    echo: CallHandle,
    make_upper: CallHandle,
    title: CallHandle,
    set_title: CallHandle,
    get_value: CallHandle,
    get_double_value: CallHandle,
}

impl Demo {
    pub fn bind<V: VmUserData>(context: &mut Context<'_, V, Native>) -> Result<Self> {
        Ok(Self {
            class: context.get_variable(MODULE, TEST_CLASS)?,
            static_method: CallHandle::new(call_signature!(staticMethod, 0)),
            pick_drink: CallHandle::new(call_signature!(pickDrink, 0)),
            increment: CallHandle::new(call_signature!(increment, 0)),
            add_number: CallHandle::new(call_signature!(addNumber, 1)),
            echo: CallHandle::new(call_signature!(echo, 1)),
            make_upper: CallHandle::new(call_signature!(makeUpper, 1)),
            title: CallHandle::new(call_signature!(title)),
            set_title: CallHandle::new(setter_signature!(title)),
            get_value: CallHandle::new(call_signature!(getValue, 0)),
            get_double_value: CallHandle::new(call_signature!(getDoubleValue, 0)),
        })
    }

    pub fn static_method<V: VmUserData>(&self, context: &mut Context<'_, V, Native>) -> Result<()> {
        context.call(&self.class, &self.static_method, &())
    }

    pub fn pick_drink<V: VmUserData>(&self, context: &mut Context<'_, V, Native>) -> Result<Drink> {
        context.call(&self.class, &self.pick_drink, &())
    }

    /// `Test.new()`
    pub fn new_test<V: VmUserData>(&self, context: &mut Context<'_, V, Native>) -> Result<Test<'_>> {
        Ok(Test {
            demo: self,
            handle: context.construct(&self.class)?,
        })
    }
}

/// One instance of `Test`
pub struct Test<'d> {
    demo: &'d Demo,
    handle: Handle,
}

impl Test<'_> {
    pub fn increment<V: VmUserData>(&self, context: &mut Context<'_, V, Native>) -> Result<()> {
        context.call(&self.handle, &self.demo.increment, &())
    }

    pub fn add_number<V: VmUserData>(
        &self,
        context: &mut Context<'_, V, Native>,
        n: i32,
    ) -> Result<()> {
        context.call(&self.handle, &self.demo.add_number, &(n,))
    }

    pub fn echo<V: VmUserData>(&self, context: &mut Context<'_, V, Native>, text: &str) -> Result<()> {
        context.call(&self.handle, &self.demo.echo, &(text,))
    }

    pub fn make_upper<V: VmUserData>(
        &self,
        context: &mut Context<'_, V, Native>,
        text: &str,
    ) -> Result<String> {
        context.call(&self.handle, &self.demo.make_upper, &(text,))
    }

    pub fn title<V: VmUserData>(&self, context: &mut Context<'_, V, Native>) -> Result<String> {
        context.call(&self.handle, &self.demo.title, &())
    }

    pub fn set_title<V: VmUserData>(
        &self,
        context: &mut Context<'_, V, Native>,
        title: &str,
    ) -> Result<()> {
        context.call(&self.handle, &self.demo.set_title, &(title,))
    }

    pub fn get_value<V: VmUserData>(&self, context: &mut Context<'_, V, Native>) -> Result<i32> {
        context.call(&self.handle, &self.demo.get_value, &())
    }

    pub fn get_double_value<V: VmUserData>(
        &self,
        context: &mut Context<'_, V, Native>,
    ) -> Result<f64> {
        context.call(&self.handle, &self.demo.get_double_value, &())
    }
}
