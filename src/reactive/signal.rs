use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Something with a current value and a counter that moves whenever the
/// value may have changed.
pub trait Source<T> {
    fn get(&self) -> T;
    fn version(&self) -> u64;
}

struct State<T> {
    value: T,
    version: u64,
}

/// Shared mutable value. Clones observe the same value.
pub struct Signal<T> {
    state: Rc<RefCell<State<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Signal")
            .field("value", &state.value)
            .field("version", &state.version)
            .finish()
    }
}

impl<T: Clone + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            state: Rc::new(RefCell::new(State { value, version: 0 })),
        }
    }

    pub fn get(&self) -> T {
        self.state.borrow().value.clone()
    }

    pub fn set(&self, value: T) {
        let mut state = self.state.borrow_mut();
        state.value = value;
        state.version += 1;
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut state = self.state.borrow_mut();
        f(&mut state.value);
        state.version += 1;
    }

    pub fn version(&self) -> u64 {
        self.state.borrow().version
    }

    /// Value computed from this signal on every read.
    pub fn map<U>(&self, f: impl Fn(&T) -> U + 'static) -> Derived<U> {
        let source = self.clone();
        let versions = self.clone();
        Derived {
            compute: Rc::new(move || f(&source.state.borrow().value)),
            version: Rc::new(move || versions.version()),
        }
    }
}

impl<T: Clone + 'static> Source<T> for Signal<T> {
    fn get(&self) -> T {
        Signal::get(self)
    }

    fn version(&self) -> u64 {
        Signal::version(self)
    }
}

/// Read-only value derived from a [`Signal`].
pub struct Derived<U> {
    compute: Rc<dyn Fn() -> U>,
    version: Rc<dyn Fn() -> u64>,
}

impl<U> Clone for Derived<U> {
    fn clone(&self) -> Self {
        Self {
            compute: Rc::clone(&self.compute),
            version: Rc::clone(&self.version),
        }
    }
}

impl<U> Source<U> for Derived<U> {
    fn get(&self) -> U {
        (self.compute)()
    }

    fn version(&self) -> u64 {
        (self.version)()
    }
}

/// Either a plain value or a source to follow.
pub enum MaybeSignal<T> {
    Value(T),
    Reactive(Rc<dyn Source<T>>),
}

impl<T: Clone> MaybeSignal<T> {
    pub fn get(&self) -> T {
        match self {
            MaybeSignal::Value(value) => value.clone(),
            MaybeSignal::Reactive(source) => source.get(),
        }
    }

    pub fn is_reactive(&self) -> bool {
        matches!(self, MaybeSignal::Reactive(_))
    }
}

impl<T: Clone + 'static> From<Signal<T>> for MaybeSignal<T> {
    fn from(signal: Signal<T>) -> Self {
        MaybeSignal::Reactive(Rc::new(signal))
    }
}

impl<T: 'static> From<Derived<T>> for MaybeSignal<T> {
    fn from(derived: Derived<T>) -> Self {
        MaybeSignal::Reactive(Rc::new(derived))
    }
}

impl<T: fmt::Debug> fmt::Debug for MaybeSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaybeSignal::Value(value) => f.debug_tuple("Value").field(value).finish(),
            MaybeSignal::Reactive(_) => f.write_str("Reactive(..)"),
        }
    }
}
