//! Single-threaded observable values.
//!
//! An [`Observable`] is a shared cell whose listeners are notified after
//! each change. Handles are cheap to clone and share the same value.
//! Notification happens synchronously inside [`Observable::set`]; listeners
//! run against a snapshot of the listener list, so they may subscribe,
//! unsubscribe, or update other observables while being notified.

use std::{
    cell::{Cell, Ref, RefCell},
    fmt,
    rc::{Rc, Weak},
};

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Inner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_id: Cell<u64>,
}

/// A shared value that notifies subscribers when it changes.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl<T: Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: 'static> Observable<T> {
    /// Creates an observable holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Borrows the current value.
    ///
    /// # Panics
    ///
    /// Panics if the value is being replaced, i.e. when called from a
    /// listener of this observable that itself calls [`Observable::set`].
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.value.borrow()
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Registers `listener`, to be called after every change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let listener: Listener<T> = Rc::new(RefCell::new(listener));
        self.inner.listeners.borrow_mut().push((id, listener));

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .listeners
                        .borrow_mut()
                        .retain(|(listener_id, _)| *listener_id != id);
                }
            })),
        }
    }

    /// Registers `listener` and calls it once with the current value.
    pub fn subscribe_immediate<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let subscription = self.subscribe(listener);
        let current = self.inner.listeners.borrow().last().map(|(_, l)| Rc::clone(l));
        if let Some(listener) = current {
            let value = self.inner.value.borrow();
            (&mut *listener.borrow_mut())(&value);
        }
        subscription
    }

    fn notify(&self) {
        let snapshot = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect::<Vec<_>>();
        for (id, listener) in snapshot {
            // Skip listeners released by an earlier listener in this round.
            let still_active = self
                .inner
                .listeners
                .borrow()
                .iter()
                .any(|(listener_id, _)| *listener_id == id);
            if !still_active {
                continue;
            }
            let value = self.inner.value.borrow();
            (&mut *listener.borrow_mut())(&value);
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Returns a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: PartialEq + 'static> Observable<T> {
    /// Replaces the value, notifying listeners if it changed.
    ///
    /// Returns `true` if listeners were notified.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify();
        true
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Modifies the value in place, notifying listeners if it changed.
    ///
    /// Returns `true` if listeners were notified.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }
}

/// Handle to an [`Observable`] listener.
///
/// The listener stays registered until [`Subscription::unsubscribe`] is
/// called or the handle is dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Returns `true` until the subscription has been released.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Releases the listener. Calling this more than once has no effect.
    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::{Observable, Subscription};

    #[test]
    fn set_notifies_only_on_change() {
        let observable = Observable::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = observable.subscribe({
            let seen = Rc::clone(&seen);
            move |value: &i32| seen.borrow_mut().push(*value)
        });

        assert!(observable.set(2));
        assert!(!observable.set(2));
        assert!(observable.set(3));

        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn subscribe_immediate_fires_with_current_value() {
        let observable = Observable::new("a".to_owned());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = observable.subscribe_immediate({
            let seen = Rc::clone(&seen);
            move |value: &String| seen.borrow_mut().push(value.clone())
        });
        observable.set("b".to_owned());

        assert_eq!(*seen.borrow(), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn unsubscribe_is_idempotent_and_stops_notifications() {
        let observable = Observable::new(0);
        let count = Rc::new(RefCell::new(0));
        let mut sub = observable.subscribe({
            let count = Rc::clone(&count);
            move |_: &i32| *count.borrow_mut() += 1
        });

        observable.set(1);
        sub.unsubscribe();
        sub.unsubscribe();
        observable.set(2);

        assert!(!sub.is_active());
        assert_eq!(*count.borrow(), 1);
        assert_eq!(observable.subscriber_count(), 0);
    }

    #[test]
    fn dropping_subscription_releases_listener() {
        let observable = Observable::new(0);
        {
            let _sub = observable.subscribe(|_: &i32| {});
            assert_eq!(observable.subscriber_count(), 1);
        }
        assert_eq!(observable.subscriber_count(), 0);
    }

    #[test]
    fn clones_share_value_and_listeners() {
        let observable = Observable::new(0);
        let other = observable.clone();
        let count = Rc::new(RefCell::new(0));
        let _sub = observable.subscribe({
            let count = Rc::clone(&count);
            move |_: &i32| *count.borrow_mut() += 1
        });

        other.set(5);

        assert_eq!(observable.get(), 5);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn update_applies_in_place_edit() {
        let observable = Observable::new(vec![1]);
        assert!(observable.update(|v| v.push(2)));
        assert!(!observable.update(|_| {}));
        assert_eq!(observable.get(), vec![1, 2]);
    }

    #[test]
    fn listener_may_release_a_later_listener() {
        let observable = Observable::new(0);
        let later_calls = Rc::new(RefCell::new(0));
        let later = Rc::new(RefCell::new(None::<Subscription>));

        let _first = observable.subscribe({
            let later = Rc::clone(&later);
            move |_: &i32| {
                if let Some(mut sub) = later.borrow_mut().take() {
                    sub.unsubscribe();
                }
            }
        });
        *later.borrow_mut() = Some(observable.subscribe({
            let later_calls = Rc::clone(&later_calls);
            move |_: &i32| *later_calls.borrow_mut() += 1
        }));

        observable.set(1);

        assert_eq!(*later_calls.borrow(), 0);
        assert_eq!(observable.subscriber_count(), 1);
    }
}
