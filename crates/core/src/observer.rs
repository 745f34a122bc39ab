/// Receives events emitted by a running simulation.
///
/// An observer sees every event in order and may answer with an action of
/// type `A` (for example, a request to stop early). Returning `None` lets the
/// simulation continue unchanged.
///
/// The unit type `()` implements `Observer` for any event and action type,
/// which makes it the natural "no observation" argument. Closures of the form
/// `FnMut(&E) -> Option<A>` are observers too.
pub trait Observer<E, A> {
    /// Inspects an event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
