use core::fmt;
use std::sync::Arc;

use autopartial_core::{ArgVals, Args, BindError};
use tracing::trace;

type Target<R> = dyn Fn(ArgVals) -> R + Send + Sync;

/// A function
/// that can be called with placeholders
/// to defer the call.
///
/// Calling with no placeholders
/// calls the function.
/// Calling with any placeholder
/// returns a new `AutoPartial`
/// that fills the placeholders
/// from the arguments of its own call.
///
/// Cloning is cheap.
pub struct AutoPartial<R> {
    inner: Inner<R>,
    name: Option<&'static str>,
    doc: Option<&'static str>,
}

enum Inner<R> {
    Target(Arc<Target<R>>),
    Pending(Arc<PendingCall<R>>),
}

/// A call waiting on values for its placeholders.
pub struct PendingCall<R> {
    target: AutoPartial<R>,
    args: Args,
}

/// The result of calling an [`AutoPartial`].
#[derive(Debug)]
pub enum Called<R> {
    /// The function ran and returned this.
    Done(R),
    /// The call had placeholders.
    Partial(AutoPartial<R>),
}

/// Wrap `f` for partial application.
pub fn wrap<R, F>(f: F) -> AutoPartial<R>
where
    F: Fn(ArgVals) -> R + Send + Sync + 'static,
{
    AutoPartial::new(f)
}

/// Wrap `f` for partial application,
/// keeping `name` for introspection.
pub fn wrap_named<R, F>(name: &'static str, f: F) -> AutoPartial<R>
where
    F: Fn(ArgVals) -> R + Send + Sync + 'static,
{
    AutoPartial::named(name, f)
}

impl<R> AutoPartial<R> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(ArgVals) -> R + Send + Sync + 'static,
    {
        AutoPartial {
            inner: Inner::Target(Arc::new(f)),
            name: None,
            doc: None,
        }
    }

    pub fn named<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(ArgVals) -> R + Send + Sync + 'static,
    {
        AutoPartial {
            name: Some(name),
            ..Self::new(f)
        }
    }

    pub fn with_doc(mut self, doc: &'static str) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Name of the wrapped function.
    ///
    /// Deferred calls have no name.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn doc(&self) -> Option<&'static str> {
        self.doc
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.inner, Inner::Pending(_))
    }

    pub fn pending(&self) -> Option<&PendingCall<R>> {
        match &self.inner {
            Inner::Target(_) => None,
            Inner::Pending(pending) => Some(pending),
        }
    }

    /// Call with `args`.
    ///
    /// If `args` has no placeholders,
    /// the call runs now.
    /// Otherwise,
    /// the call waits
    /// and a new `AutoPartial` is returned.
    ///
    /// An error is only possible
    /// when this is a deferred call
    /// and `args` lacks a value for one of its placeholders.
    pub fn call(&self, args: Args) -> Result<Called<R>, BindError> {
        match args.into_concrete() {
            Ok(vals) => self.dispatch(vals).map(Called::Done),
            Err(args) => {
                trace!(
                    function = self.name,
                    placeholders = args.placeholders().count(),
                    "deferring call"
                );
                Ok(Called::Partial(AutoPartial {
                    inner: Inner::Pending(Arc::new(PendingCall {
                        target: self.clone(),
                        args,
                    })),
                    name: None,
                    doc: None,
                }))
            }
        }
    }

    fn dispatch(&self, vals: ArgVals) -> Result<R, BindError> {
        match &self.inner {
            Inner::Target(f) => Ok(f(vals)),
            Inner::Pending(pending) => pending.run(vals),
        }
    }
}

impl<R> Clone for AutoPartial<R> {
    fn clone(&self) -> Self {
        AutoPartial {
            inner: match &self.inner {
                Inner::Target(f) => Inner::Target(Arc::clone(f)),
                Inner::Pending(pending) => Inner::Pending(Arc::clone(pending)),
            },
            name: self.name,
            doc: self.doc,
        }
    }
}

impl<R> fmt::Debug for AutoPartial<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoPartial")
            .field("name", &self.name)
            .field("pending", &self.pending())
            .finish()
    }
}

impl<R> fmt::Display for AutoPartial<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Target(_) => write!(f, "{}", self.name.unwrap_or("<anonymous>")),
            Inner::Pending(pending) => write!(f, "{pending}"),
        }
    }
}

impl<R> PendingCall<R> {
    /// Callable receiving the arguments
    /// once placeholders are filled.
    pub fn target(&self) -> &AutoPartial<R> {
        &self.target
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Fill placeholders from `vals`
    /// and call the target.
    pub fn run(&self, vals: ArgVals) -> Result<R, BindError> {
        let bindings = vals.into_bindings();
        let resolved = self.args.resolve(&bindings)?;
        trace!(bound = bindings.len(), "resolved pending call");
        self.target.dispatch(resolved)
    }
}

impl<R> fmt::Debug for PendingCall<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCall")
            .field("target", &self.target)
            .field("args", &self.args)
            .finish()
    }
}

impl<R> fmt::Display for PendingCall<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.target, self.args)
    }
}

impl<R> Called<R> {
    pub fn is_partial(&self) -> bool {
        matches!(self, Called::Partial(_))
    }

    pub fn done(self) -> Option<R> {
        match self {
            Called::Done(x) => Some(x),
            Called::Partial(_) => None,
        }
    }

    pub fn partial(self) -> Option<AutoPartial<R>> {
        match self {
            Called::Done(_) => None,
            Called::Partial(f) => Some(f),
        }
    }

    /// Apply `f` to the result
    /// if the function ran.
    pub fn map_done<T, F>(self, f: F) -> Result<T, AutoPartial<R>>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Called::Done(x) => Ok(f(x)),
            Called::Partial(partial) => Err(partial),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::BTreeMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use autopartial_core::{args, kw, GetErr, Key, Name, P0, P1};
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    type Raw = Result<(Vec<i32>, BTreeMap<Name, i32>), GetErr>;

    fn raw() -> AutoPartial<Raw> {
        wrap(|vals: ArgVals| vals.into_typed::<i32>())
    }

    fn power() -> AutoPartial<Result<i32, GetErr>> {
        wrap_named("power", |vals: ArgVals| -> Result<i32, GetErr> {
            let base = vals.positional::<i32>(0)?;
            let exponent = vals.positional::<i32>(1)?;
            Ok(base.pow(*exponent as u32))
        })
    }

    fn expected(positional: &[i32], keyword: &[(&'static str, i32)]) -> Raw {
        Ok((
            positional.to_vec(),
            keyword
                .iter()
                .map(|(name, x)| (Name::from(*name), *x))
                .collect(),
        ))
    }

    fn done<R>(f: &AutoPartial<R>, args: Args) -> R {
        f.call(args).unwrap().done().unwrap()
    }

    fn partial<R>(f: &AutoPartial<R>, args: Args) -> AutoPartial<R> {
        f.call(args).unwrap().partial().unwrap()
    }

    #[proptest]
    fn call_without_placeholders_should_call_function(a: i32, b: i32, c: i32) {
        prop_assert_eq!(
            done(&raw(), args![a, b; c = c]),
            (|vals: ArgVals| vals.into_typed::<i32>())(args![a, b; c = c].into_concrete().unwrap())
        );
    }

    #[test]
    fn normal_call_should_return_arguments() {
        assert_eq!(
            done(&raw(), args![1, 2; a = 3, b = 4]),
            expected(&[1, 2], &[("a", 3), ("b", 4)])
        );
    }

    #[test]
    fn call_with_placeholder_should_return_function() {
        assert!(raw().call(args![P0, 2; a = 3, b = 4]).unwrap().is_partial());
        assert!(raw().call(args![1, 2; a = P0, b = 4]).unwrap().is_partial());
    }

    #[test]
    fn arg_to_arg() {
        let nf = partial(&raw(), args![1, P0; a = 3, b = 4]);
        assert_eq!(done(&nf, args![145]), expected(&[1, 145], &[("a", 3), ("b", 4)]));
    }

    #[test]
    fn arg_to_kwarg() {
        let nf = partial(&raw(), args![1, 2; a = 3, b = P0]);
        assert_eq!(done(&nf, args![145]), expected(&[1, 2], &[("a", 3), ("b", 145)]));
    }

    #[test]
    fn kwarg_to_kwarg() {
        let nf = partial(&raw(), args![1, 2; a = 3, b = kw("q")]);
        assert_eq!(
            done(&nf, args![; q = 145]),
            expected(&[1, 2], &[("a", 3), ("b", 145)])
        );
    }

    #[test]
    fn kwarg_to_arg() {
        let nf = partial(&raw(), args![kw("d"), 2; a = 3, b = 4]);
        assert_eq!(
            done(&nf, args![; d = 145]),
            expected(&[145, 2], &[("a", 3), ("b", 4)])
        );
    }

    #[test]
    fn multiple_args() {
        let nf = partial(&raw(), args![kw("s"), P1, 3; a = P0, b = 4]);
        assert_eq!(
            done(&nf, args![145, 543; s = 444]),
            expected(&[444, 543, 3], &[("a", 145), ("b", 4)])
        );
    }

    #[test]
    fn same_arg_reused() {
        let nf = partial(&raw(), args![P0, 2; a = P0, b = P0]);
        assert_eq!(
            done(&nf, args![145]),
            expected(&[145, 2], &[("a", 145), ("b", 145)])
        );
    }

    #[test]
    fn chain_partials() {
        let nf = partial(&raw(), args![P0, 2; a = P1, b = 4]);
        let nnf = partial(&nf, args![P0, 3]);
        assert_eq!(done(&nnf, args![145]), expected(&[145, 2], &[("a", 3), ("b", 4)]));
    }

    #[test]
    fn power_should_rebind_positions_and_keywords() {
        let power = power();
        assert_eq!(done(&power, args![3, 2]), Ok(9));

        let square = partial(&power, args![P0, 2]);
        assert_eq!(done(&square, args![3]), Ok(9));

        let verbose_power = partial(&power, args![kw("base"), kw("exponent")]);
        assert_eq!(done(&verbose_power, args![; base = 3, exponent = 2]), Ok(9));

        let power_again = partial(&verbose_power, args![; base = P0, exponent = P1]);
        assert_eq!(done(&power_again, args![3, 2]), Ok(9));
    }

    #[test]
    fn missing_binding_should_fail() {
        let nf = partial(&raw(), args![1, 2; a = 3, b = kw("q")]);
        assert_eq!(
            nf.call(args![; r = 145]).unwrap_err(),
            BindError::Missing(Key::name("q"))
        );
        let nf = partial(&raw(), args![P1]);
        assert_eq!(
            nf.call(args![145]).unwrap_err(),
            BindError::Missing(Key::Position(1))
        );
    }

    #[test]
    fn missing_binding_should_fail_through_chain() {
        let nf = partial(&raw(), args![kw("q")]);
        let nnf = partial(&nf, args![; r = P0]);
        assert_eq!(
            nnf.call(args![1]).unwrap_err(),
            BindError::Missing(Key::name("q"))
        );
    }

    #[test]
    fn function_errors_should_pass_through_unchanged() {
        let power = power();
        assert_eq!(
            done(&power, args![3]),
            Err(GetErr::Missing(Key::Position(1)))
        );
        let square = partial(&power, args![P0, 2]);
        assert_eq!(
            done(&square, args![3.0]),
            Err(GetErr::WrongType {
                key: Key::Position(0),
                ty: "i32"
            })
        );
    }

    #[test]
    fn extra_bindings_should_be_ignored() {
        let nf = partial(&raw(), args![P0]);
        assert_eq!(done(&nf, args![1, 2; z = 3]), expected(&[1], &[]));
    }

    #[test]
    fn partial_call_should_not_run_function() {
        let count = Arc::new(AtomicUsize::new(0));
        let f = {
            let count = Arc::clone(&count);
            wrap(move |vals: ArgVals| {
                count.fetch_add(1, Ordering::SeqCst);
                vals.len_positional()
            })
        };
        let nf = partial(&f, args![P0, P1, 3]);
        let nnf = partial(&nf, args![P1, P0]);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(done(&nnf, args![1, 2]), 3);
        assert_eq!(done(&nnf, args![1, 2]), 3);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn deferred_calls_should_not_change_captured_arguments() {
        let nf = partial(&raw(), args![P0; a = P0]);
        assert_eq!(done(&nf, args![1]), expected(&[1], &[("a", 1)]));
        assert_eq!(done(&nf, args![2]), expected(&[2], &[("a", 2)]));
        assert_eq!(nf.pending().unwrap().args().required_keys().len(), 1);
    }

    #[test]
    fn deferred_calls_should_be_callable_from_many_threads() {
        let nf = partial(&power(), args![P0, 2]);
        std::thread::scope(|s| {
            let handles = (0..8)
                .map(|x| {
                    let nf = nf.clone();
                    s.spawn(move || done(&nf, args![x]))
                })
                .collect::<Vec<_>>();
            for (x, handle) in handles.into_iter().enumerate() {
                assert_eq!(handle.join().unwrap(), Ok((x as i32).pow(2)));
            }
        });
    }

    #[test]
    fn only_outermost_should_keep_name_and_doc() {
        let power = power().with_doc("Raise a number to a power.");
        assert_eq!(power.name(), Some("power"));
        assert_eq!(power.doc(), Some("Raise a number to a power."));
        assert!(!power.is_pending());

        let square = partial(&power, args![P0, 2]);
        assert_eq!(square.name(), None);
        assert_eq!(square.doc(), None);
        assert!(square.is_pending());
        assert_eq!(square.pending().unwrap().target().name(), Some("power"));
    }

    #[test]
    fn display_should_show_pending_calls() {
        let power = power();
        assert_eq!(power.to_string(), "power");
        let verbose_power = partial(&power, args![kw("base"), kw("exponent")]);
        assert_eq!(verbose_power.to_string(), "power({base}, {exponent})");
        let power_again = partial(&verbose_power, args![; base = P0, exponent = P1]);
        assert_eq!(
            power_again.to_string(),
            "power({base}, {exponent})(base = {0}, exponent = {1})"
        );
        assert_eq!(raw().to_string(), "<anonymous>");
    }

    #[test]
    fn map_done_should_return_partial_unchanged() {
        assert_eq!(
            power()
                .call(args![2, 3])
                .unwrap()
                .map_done(|x| x.map(|x| x + 1))
                .ok(),
            Some(Ok(9))
        );
        assert!(power().call(args![P0, 3]).unwrap().map_done(|_| ()).is_err());
    }

    #[test]
    fn auto_partial_should_be_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AutoPartial<i32>>();
        assert_send_sync::<Called<Raw>>();
    }
}
