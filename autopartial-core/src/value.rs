use core::fmt;

use downcast_rs::{impl_downcast, Downcast};

/// A dynamically typed argument value.
///
/// Any `'static` type
/// that is `Clone`, `Debug`, `Send`, and `Sync`
/// can be passed as an argument.
pub trait AnyArg: 'static + Downcast + fmt::Debug + Send + Sync {
    fn boxed_clone(&self) -> Box<dyn AnyArg>;
}
impl_downcast!(AnyArg);
impl<T> AnyArg for T
where
    T: 'static + Clone + fmt::Debug + Send + Sync,
{
    fn boxed_clone(&self) -> Box<dyn AnyArg> {
        Box::new(self.clone())
    }
}
impl Clone for Box<dyn AnyArg> {
    fn clone(&self) -> Self {
        // Calling `boxed_clone` without `as_ref`
        // will result in a stack overflow.
        self.as_ref().boxed_clone()
    }
}
