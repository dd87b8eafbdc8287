//! Latest-value keyed store with ordered synchronous fan-out

use std::collections::HashMap;
use tracing::debug;
use types::errors::DeskError;

/// A registered observer of one store
///
/// Listeners are boxed closures rather than trait objects with back
/// pointers: downstream services capture their own shared handle and the
/// store stays ignorant of who is listening.
pub type Listener<V> = Box<dyn FnMut(&V) -> Result<(), DeskError>>;

/// Map from string key to the latest value of one domain type
///
/// Reads never fail: a key that has not been written yet reads as
/// `V::default()`, so callers must treat "absent" and "zero" as the same
/// thing. Writes are unconditional overwrites; the store keeps no history.
pub struct KeyedStore<V> {
    name: &'static str,
    values: HashMap<String, V>,
    listeners: Vec<Listener<V>>,
}

impl<V: Clone + Default> KeyedStore<V> {
    /// Create an empty store; `name` tags log lines
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            values: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Latest value for a key, or `V::default()` when never written
    pub fn get(&self, key: &str) -> V {
        self.values.get(key).cloned().unwrap_or_default()
    }

    /// Unconditionally overwrite the value for a key
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.values.insert(key.into(), value);
    }

    /// Register a listener; invocation order is subscription order
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&V) -> Result<(), DeskError> + 'static,
    {
        self.listeners.push(Box::new(listener));
        debug!(store = self.name, listeners = self.listeners.len(), "listener subscribed");
    }

    /// Invoke every listener with `value`, in order, on this thread
    ///
    /// Fail-fast: the first listener error aborts the remaining chain and
    /// propagates to the caller. There is no listener isolation.
    pub fn notify(&mut self, value: &V) -> Result<(), DeskError> {
        for listener in &mut self.listeners {
            listener(value)?;
        }
        Ok(())
    }

    /// Store then notify, as one unit
    ///
    /// Listeners always observe a value that has already been stored, so a
    /// listener reading back through the store sees the update it is being
    /// told about.
    pub fn publish(&mut self, key: impl Into<String>, value: V) -> Result<(), DeskError> {
        self.set(key, value.clone());
        self.notify(&value)
    }

    /// Number of keys ever written
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_read_before_write_returns_default() {
        let store: KeyedStore<i64> = KeyedStore::new("test");
        assert_eq!(store.get("missing"), 0);
    }

    #[test]
    fn test_set_overwrites_unconditionally() {
        let mut store: KeyedStore<i64> = KeyedStore::new("test");
        store.set("k", 1);
        store.set("k", 7);
        assert_eq!(store.get("k"), 7);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_fan_out_invokes_each_listener_once_in_order() {
        let mut store: KeyedStore<i64> = KeyedStore::new("test");
        let seen: Rc<RefCell<Vec<(usize, i64)>>> = Rc::new(RefCell::new(Vec::new()));

        for tag in 0..3 {
            let seen = Rc::clone(&seen);
            store.subscribe(move |value| {
                seen.borrow_mut().push((tag, *value));
                Ok(())
            });
        }

        store.publish("k", 42).unwrap();
        assert_eq!(*seen.borrow(), vec![(0, 42), (1, 42), (2, 42)]);
    }

    #[test]
    fn test_failing_listener_aborts_remaining_chain() {
        let mut store: KeyedStore<i64> = KeyedStore::new("test");
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));

        {
            let seen = Rc::clone(&seen);
            store.subscribe(move |_| {
                seen.borrow_mut().push(0);
                Ok(())
            });
        }
        store.subscribe(|_| {
            Err(DeskError::UnknownProduct {
                id: "BAD".to_string(),
            })
        });
        {
            let seen = Rc::clone(&seen);
            store.subscribe(move |_| {
                seen.borrow_mut().push(2);
                Ok(())
            });
        }

        let result = store.publish("k", 1);
        assert!(matches!(result, Err(DeskError::UnknownProduct { .. })));
        // Third listener never ran.
        assert_eq!(*seen.borrow(), vec![0]);
        // The value was stored before notification began.
        assert_eq!(store.get("k"), 1);
    }

    #[test]
    fn test_listener_chains_through_shared_downstream_handle() {
        // The wiring pattern used throughout the pipeline: a listener on an
        // upstream store publishes into a downstream store it holds via
        // Rc<RefCell<_>>.
        let downstream = Rc::new(RefCell::new(KeyedStore::<i64>::new("downstream")));
        let mut upstream: KeyedStore<i64> = KeyedStore::new("upstream");

        let handle = Rc::clone(&downstream);
        upstream.subscribe(move |value| handle.borrow_mut().publish("k", value * 2));

        upstream.publish("k", 21).unwrap();
        assert_eq!(downstream.borrow().get("k"), 42);
    }
}
