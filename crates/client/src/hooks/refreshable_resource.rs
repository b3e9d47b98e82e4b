use std::{future::Future, marker::PhantomData};

use dioxus::{
    hooks::{use_context, use_context_provider, use_resource, Resource},
    signals::{ReadableExt, Signal, WritableExt},
};

/// Context entry that re-runs the resource of type `T` when written.
pub struct RefreshSignal<T> {
    signal: Signal<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for RefreshSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RefreshSignal<T> {}

impl<T> RefreshSignal<T> {
    /// Re-run the resource this signal belongs to.
    pub fn refresh(mut self) {
        self.signal.set(());
    }
}

/// A `use_resource` that descendants can re-run through
/// [`use_refresh_resource`], keyed by the resource's output type.
///
/// ```rust,ignore
/// let servers = use_refreshable_resource(move || async move { client.list_servers().await });
///
/// // Later, in a child component (after creating a server):
/// use_refresh_resource::<Result<Vec<Server>, ApiError>>().refresh();
/// ```
pub fn use_refreshable_resource<T, F>(mut future: impl FnMut() -> F + 'static) -> Resource<T>
where
    T: 'static,
    F: Future<Output = T> + 'static,
{
    let context = use_context_provider(|| RefreshSignal::<T> {
        signal: Signal::new(()),
        _marker: PhantomData,
    });
    use_resource(move || {
        context.signal.read();
        future()
    })
}

/// See [`use_refreshable_resource`].
pub fn use_refresh_resource<T: 'static>() -> RefreshSignal<T> {
    use_context::<RefreshSignal<T>>()
}
