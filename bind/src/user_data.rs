use log::{error, info};

use super::{ErrorKind, ForeignClassMethods, ForeignMethod};

/// Host side configuration of a VM.
/// Every hook has an empty default so an implementation only has to
/// provide what it actually binds.
#[allow(unused_variables)]
pub trait UserData: Sized {
    /// Called the first time a class is looked up.
    /// Returning `None` means the class doesn't exist.
    fn bind_foreign_class(&mut self, module: &str, classname: &str) -> Option<ForeignClassMethods> {
        None
    }
    /// Called on every call, `is_static` is true when the subject is the
    /// class itself rather than one of its instances
    fn bind_foreign_method(
        &mut self,
        module: &str,
        classname: &str,
        is_static: bool,
        signature: &str,
    ) -> Option<ForeignMethod<Self>> {
        None
    }
    fn on_write(&mut self, text: &str) {}
    fn on_error(&mut self, kind: ErrorKind) {}
}

/// Log an error the way most hosts want to see it
pub fn on_error(kind: ErrorKind) {
    match kind {
        ErrorKind::Runtime(msg) => error!("[Runtime Error] {}", msg),
        ErrorKind::UnboundMethod(ctx) => {
            error!("[{}.{}] no foreign method bound for {}", ctx.module, ctx.class, ctx.signature);
        }
    }
}

/// Log written text line by line
pub fn on_write(text: &str) {
    for line in text.lines() {
        info!("{}", line);
    }
}
