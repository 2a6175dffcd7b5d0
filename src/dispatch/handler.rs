//! Handler values and chain conversion.

use std::sync::Arc;

use crate::dispatch::context::Context;

/// A middleware or terminal handler.
///
/// Handlers run synchronously; calling [`Context::next`] hands control to the
/// next handler in the chain (or the next matching route) and returns once
/// that part of the chain has finished.
pub type Handler = Arc<dyn Fn(&mut Context) + Send + Sync>;

/// Wrap a closure as a [`Handler`].
///
/// Useful where the closure's argument type cannot be inferred otherwise.
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut Context) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Anything accepted where a handler chain is expected.
///
/// Implemented for a single closure, tuples of up to six closures,
/// `Vec<Handler>`, arrays of handlers, and `()` for an empty chain.
pub trait IntoChain {
    fn into_chain(self) -> Vec<Handler>;
}

impl<F> IntoChain for F
where
    F: Fn(&mut Context) + Send + Sync + 'static,
{
    fn into_chain(self) -> Vec<Handler> {
        vec![Arc::new(self)]
    }
}

impl IntoChain for () {
    fn into_chain(self) -> Vec<Handler> {
        Vec::new()
    }
}

impl IntoChain for Vec<Handler> {
    fn into_chain(self) -> Vec<Handler> {
        self
    }
}

impl<const N: usize> IntoChain for [Handler; N] {
    fn into_chain(self) -> Vec<Handler> {
        self.into()
    }
}

macro_rules! impl_into_chain_for_tuple {
    ($($name:ident),+) => {
        impl<$($name),+> IntoChain for ($($name,)+)
        where
            $($name: Fn(&mut Context) + Send + Sync + 'static,)+
        {
            #[allow(non_snake_case)]
            fn into_chain(self) -> Vec<Handler> {
                let ($($name,)+) = self;
                vec![$(Arc::new($name) as Handler),+]
            }
        }
    };
}

impl_into_chain_for_tuple!(H1);
impl_into_chain_for_tuple!(H1, H2);
impl_into_chain_for_tuple!(H1, H2, H3);
impl_into_chain_for_tuple!(H1, H2, H3, H4);
impl_into_chain_for_tuple!(H1, H2, H3, H4, H5);
impl_into_chain_for_tuple!(H1, H2, H3, H4, H5, H6);
