#![deny(clippy::all)]
#![warn(clippy::pedantic, clippy::nursery)]
#![forbid(unsafe_code)]

use std::{collections::HashMap, io};

use bind::{ErrorKind, ForeignClassMethods, ForeignMethod, Vm, VmUserData};

use modules::{Class, Module};

mod bindings;
mod modules;
mod runner;

pub struct DemoUserData {
    modules: HashMap<&'static str, Module>,
}

impl Default for DemoUserData {
    fn default() -> Self {
        Self {
            modules: modules::init_modules(),
        }
    }
}

impl DemoUserData {
    fn get_class(&self, module: &str, class_name: &str) -> Option<&Class> {
        self.modules.get(module)?.get_class(class_name)
    }
}

impl VmUserData for DemoUserData {
    fn bind_foreign_class(&mut self, module: &str, class_name: &str) -> Option<ForeignClassMethods> {
        self.get_class(module, class_name).map(|class| class.foreign)
    }
    fn bind_foreign_method(
        &mut self,
        module: &str,
        class_name: &str,
        is_static: bool,
        signature: &str,
    ) -> Option<ForeignMethod<Self>> {
        let class = self.get_class(module, class_name)?;
        if is_static {
            class.static_methods.get(signature).copied()
        } else {
            class.methods.get(signature).copied()
        }
    }
    // Stdout only carries the results, anything the module writes is logged
    fn on_write(&mut self, text: &str) {
        bind::user_data::on_write(text);
    }
    fn on_error(&mut self, kind: ErrorKind) {
        bind::user_data::on_error(kind);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut vm = Vm::new(DemoUserData::default());
    let stdout = io::stdout();
    runner::run(&mut vm.get_context(), &mut stdout.lock())
}
