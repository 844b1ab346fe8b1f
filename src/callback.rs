use std::fmt::{self, Debug};
use std::rc::Rc;

/// A Rust event listener compared by pointer identity, like a JS function.
pub struct Callback<E>(Rc<dyn Fn(&E)>);

impl<E> Callback<E> {
    pub fn new(f: impl Fn(&E) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &E) {
        (self.0)(event)
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl<E> Clone for Callback<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E> PartialEq for Callback<E> {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<E> Eq for Callback<E> {}

impl<E> Debug for Callback<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", self.addr())
    }
}

impl<E, F: Fn(&E) + 'static> From<F> for Callback<E> {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}
