//! A minimal single-threaded application store with middleware.
//!
//! The store holds one state tree, changed only by its root reducer. Every
//! dispatched action passes through the registered middleware in
//! registration order before reaching the reducer. Middleware may dispatch
//! new actions from inside `handle`; those re-enter the chain from the top
//! and complete before the outer dispatch returns.
//!
//! # Example
//!
//! ```rust
//! use mindset_bridge::core::Action;
//! use mindset_bridge::store::Store;
//!
//! let store = Store::new(0u32, |count: &u32, action: &Action| {
//!     if action.is("INCREMENT") { count + 1 } else { *count }
//! });
//!
//! store.dispatch(Action::new("INCREMENT")).unwrap();
//! assert_eq!(store.state(), 1);
//! ```

mod error;

pub use error::StoreError;

use crate::core::Action;
use std::cell::RefCell;
use std::rc::Rc;

/// Result of a dispatch: the action that reached the reducer.
pub type DispatchResult = Result<Action, StoreError>;

/// Root reducer of a store.
pub type Reducer<S> = Box<dyn Fn(&S, &Action) -> S>;

/// Callback run after every reduced action.
pub type Listener<S> = Box<dyn Fn(&S)>;

/// The store surface visible to middleware.
pub trait MiddlewareApi<S> {
    /// Snapshot of the current state tree.
    fn state(&self) -> S;

    /// Dispatch through the full middleware chain.
    fn dispatch(&self, action: Action) -> DispatchResult;
}

/// Intercepts actions on their way to the reducer.
pub trait Middleware<S> {
    /// Handle `action`. Call `next` to pass it on down the chain.
    fn handle(
        &self,
        api: &dyn MiddlewareApi<S>,
        action: Action,
        next: &dyn Fn(Action) -> DispatchResult,
    ) -> DispatchResult;
}

/// In-memory store.
pub struct Store<S> {
    state: RefCell<S>,
    reducer: Reducer<S>,
    middleware: Vec<Rc<dyn Middleware<S>>>,
    listeners: RefCell<Vec<Listener<S>>>,
}

impl<S: Clone + 'static> Store<S> {
    /// Create a store from its initial state and root reducer.
    pub fn new<R>(initial: S, reducer: R) -> Self
    where
        R: Fn(&S, &Action) -> S + 'static,
    {
        Self {
            state: RefCell::new(initial),
            reducer: Box::new(reducer),
            middleware: Vec::new(),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Append a middleware. The first one added sees actions first.
    pub fn with_middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<S> + 'static,
    {
        self.middleware.push(Rc::new(middleware));
        self
    }

    /// Register a callback run with the new state after each reduction.
    ///
    /// Listeners must not subscribe further listeners.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&S) + 'static,
    {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, action: Action) -> DispatchResult {
        self.run(0, action)
    }

    fn run(&self, stage: usize, action: Action) -> DispatchResult {
        match self.middleware.get(stage) {
            Some(middleware) => {
                let middleware = Rc::clone(middleware);
                middleware.handle(self, action, &|forwarded: Action| self.run(stage + 1, forwarded))
            }
            None => self.reduce(action),
        }
    }

    fn reduce(&self, action: Action) -> DispatchResult {
        let next = (self.reducer)(&self.state.borrow(), &action);
        *self.state.borrow_mut() = next;

        let snapshot = self.state();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }

        Ok(action)
    }
}

impl<S: Clone + 'static> MiddlewareApi<S> for Store<S> {
    fn state(&self) -> S {
        Store::state(self)
    }

    fn dispatch(&self, action: Action) -> DispatchResult {
        Store::dispatch(self, action)
    }
}
