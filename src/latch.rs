/// Handler that runs at most once.
///
/// The handler is stored until the first `fire`, which takes and invokes it. Later calls return
/// `None` without doing anything.
pub struct OneShot<F> {
    handler: Option<F>,
}

impl<F, T> OneShot<F>
where
    F: FnOnce() -> T,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler: Some(handler),
        }
    }

    pub fn fire(&mut self) -> Option<T> {
        self.handler.take().map(|handler| handler())
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.handler.is_some()
    }
}
