pub mod demo;

use std::collections::HashMap;

use bind::{ForeignClassMethods, ForeignMethod};

use crate::DemoUserData;

/// The foreign methods of one class, the default has no allocator and
/// describes a class that only has static methods
#[derive(Default)]
pub struct Class {
    pub foreign: ForeignClassMethods,
    pub static_methods: HashMap<&'static str, ForeignMethod<DemoUserData>>,
    pub methods: HashMap<&'static str, ForeignMethod<DemoUserData>>,
}

impl Class {
    /// A class whose instances hold a `T`
    pub fn foreign<T: 'static + Default>() -> Self {
        Self {
            foreign: ForeignClassMethods::new::<T>(),
            ..Self::default()
        }
    }
}

#[derive(Default)]
pub struct Module {
    pub classes: HashMap<&'static str, Class>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_class(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }
}

pub fn init_modules() -> HashMap<&'static str, Module> {
    let mut modules = HashMap::new();
    modules.insert(demo::MODULE, demo::init_module());
    modules
}
