// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous typed listeners.

use crate::types::NodeId;

/// Handle returned by [`Listeners::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Listener registry for events of type `E`.
///
/// Listeners run synchronously inside [`Listeners::emit`] in registration order.
pub struct Listeners<E> {
    next: u64,
    entries: Vec<(ListenerId, Callback<E>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> core::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<E> Listeners<E> {
    /// Register a callback.
    pub fn subscribe(&mut self, f: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push((id, Box::new(f)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    /// Invoke every callback with `event`.
    pub fn emit(&mut self, event: &E) {
        for (_, f) in &mut self.entries {
            f(event);
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Structural change notifications from a [`Scene`](crate::Scene).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    /// `child` was attached under `parent`.
    Added {
        /// New parent.
        parent: NodeId,
        /// Attached node.
        child: NodeId,
    },
    /// `child` was detached from `parent` (and possibly freed).
    Removed {
        /// Former parent.
        parent: NodeId,
        /// Detached node.
        child: NodeId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_runs_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut l: Listeners<u32> = Listeners::default();
        let a = {
            let log = log.clone();
            l.subscribe(move |e| log.borrow_mut().push(("a", *e)))
        };
        {
            let log = log.clone();
            l.subscribe(move |e| log.borrow_mut().push(("b", *e)));
        }
        l.emit(&1);
        assert!(l.unsubscribe(a));
        assert!(!l.unsubscribe(a));
        l.emit(&2);
        assert_eq!(*log.borrow(), vec![("a", 1), ("b", 1), ("b", 2)]);
        assert_eq!(l.len(), 1);
    }
}
