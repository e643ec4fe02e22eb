use std::{
    any::{Any, TypeId},
    cell::RefCell,
    fmt::Debug,
    rc::Rc,
};

type Allocate = fn() -> Box<dyn Any>;

/// How instances of a class are created.
/// The default has no allocator, which describes a class that only has
/// static methods.
#[derive(Copy, Clone, Debug, Default)]
pub struct ForeignClassMethods {
    allocate: Option<Allocate>,
}

impl ForeignClassMethods {
    #[must_use]
    pub const fn new<T: 'static + Default>() -> Self {
        Self {
            allocate: Some(allocate::<T>),
        }
    }

    #[must_use]
    pub const fn is_constructible(&self) -> bool {
        self.allocate.is_some()
    }
}

// We defer to T::default for initialization
// TODO: Allow constructors with arguments once a class needs one
fn allocate<T: 'static + Default>() -> Box<dyn Any> {
    Box::new(T::default())
}

#[derive(Debug)]
pub struct ClassObject {
    pub(crate) module: String,
    pub(crate) name: String,
    pub(crate) methods: ForeignClassMethods,
}

impl ClassObject {
    pub(crate) fn new(module: &str, name: &str, methods: ForeignClassMethods) -> Self {
        Self {
            module: module.to_string(),
            name: name.to_string(),
            methods,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    pub(crate) fn allocate(self: &Rc<Self>) -> Option<ForeignObject> {
        let data = (self.methods.allocate?)();
        Some(ForeignObject {
            class: Rc::clone(self),
            type_id: Any::type_id(&*data),
            data: RefCell::new(data),
        })
    }
}

/// An instance of a foreign class. The data lives behind a `RefCell` so a
/// foreign method can borrow its receiver while the VM keeps other handles
/// to the same object.
pub struct ForeignObject {
    class: Rc<ClassObject>,
    type_id: TypeId,
    pub(crate) data: RefCell<Box<dyn Any>>,
}

impl ForeignObject {
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class.name
    }

    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.class.module
    }

    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl Debug for ForeignObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ForeignObject")
            .field(&self.class.name)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::{ClassObject, ForeignClassMethods};

    #[derive(Default)]
    struct Counter(u32);

    #[test]
    fn static_only_classes_cannot_allocate() {
        let class = Rc::new(ClassObject::new(
            "<test>",
            "Static",
            ForeignClassMethods::default(),
        ));

        assert!(!class.methods.is_constructible());
        assert!(class.allocate().is_none());
    }

    #[test]
    fn allocation_remembers_the_rust_type() {
        let class = Rc::new(ClassObject::new(
            "<test>",
            "Counter",
            ForeignClassMethods::new::<Counter>(),
        ));
        let object = class.allocate().unwrap();

        assert!(object.is::<Counter>());
        assert!(!object.is::<String>());
        assert_eq!(object.class_name(), "Counter");
        assert_eq!(object.module_name(), "<test>");
        assert_eq!(object.data.borrow().downcast_ref::<Counter>().unwrap().0, 0);
    }
}
