// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-handler classification.
//!
//! A prop is an event handler when its key is [`HANDLER_PREFIX`] followed by an
//! ASCII uppercase letter (`onClick`, `onKeyDown`, `onFocusVisible`). The check
//! is purely syntactic: a handler-shaped key holding a string is still
//! classified as a handler. Callers must not put non-callable values under
//! handler-shaped keys; the engine does not detect it.
//!
//! [`extract_handlers`] and [`omit_handlers`] partition a prop object: every
//! key lands in exactly one of the two results.

use core::fmt;

use crate::props::{Handler, PropKey, PropValue, Props};

/// Case-sensitive prefix shared by all handler keys.
pub const HANDLER_PREFIX: &str = "on";

/// Whether `key` names an event handler.
///
/// ```rust
/// use understory_slot_props::handlers::is_event_handler_key;
///
/// assert!(is_event_handler_key("onClick"));
/// assert!(!is_event_handler_key("onclick"));
/// assert!(!is_event_handler_key("on"));
/// assert!(!is_event_handler_key("tone"));
/// ```
pub fn is_event_handler_key(key: &str) -> bool {
    key.strip_prefix(HANDLER_PREFIX)
        .and_then(|rest| rest.bytes().next())
        .is_some_and(|b| b.is_ascii_uppercase())
}

/// The handler-shaped subset of a prop object.
///
/// This is what a behavior hook receives: the consumer's handlers, keyed by
/// event name, which the hook calls at the points its own logic decides.
pub struct EventHandlers<E, N> {
    props: Props<E, N>,
}

impl<E, N> EventHandlers<E, N> {
    /// Create an empty handler set.
    pub fn new() -> Self {
        Self {
            props: Props::new(),
        }
    }

    /// Number of handler entries.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Raw entry for `key`, which may be a non-callable value.
    pub fn get(&self, key: &str) -> Option<&PropValue<E, N>> {
        self.props.get(key)
    }

    /// The callable stored under `key`.
    pub fn handler(&self, key: &str) -> Option<&Handler<E>> {
        self.props.handler(key)
    }

    /// Invoke the handler stored under `key`.
    ///
    /// Returns `true` if a callable was found and invoked.
    pub fn call(&self, key: &str, event: &E) -> bool {
        match self.handler(key) {
            Some(h) => {
                h(event);
                true
            }
            None => false,
        }
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue<E, N>)> + '_ {
        self.props.iter()
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.props.keys()
    }

    /// Borrow the entries as a prop object.
    pub fn as_props(&self) -> &Props<E, N> {
        &self.props
    }

    /// Convert back into a prop object.
    pub fn into_props(self) -> Props<E, N> {
        self.props
    }

    fn insert(&mut self, key: PropKey, value: PropValue<E, N>) {
        debug_assert!(
            is_event_handler_key(&key),
            "only handler-shaped keys belong in an EventHandlers set"
        );
        self.props.set(key, value);
    }
}

impl<E, N> Default for EventHandlers<E, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, N> Clone for EventHandlers<E, N> {
    fn clone(&self) -> Self {
        Self {
            props: self.props.clone(),
        }
    }
}

impl<E, N> PartialEq for EventHandlers<E, N> {
    fn eq(&self, other: &Self) -> bool {
        self.props == other.props
    }
}

impl<E, N> fmt::Debug for EventHandlers<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventHandlers").field(&self.props).finish()
    }
}

/// Collect the handler-keyed entries of `props`.
///
/// An absent input yields an empty set.
pub fn extract_handlers<E, N>(props: Option<&Props<E, N>>) -> EventHandlers<E, N> {
    let mut out = EventHandlers::new();
    for (k, v) in props.into_iter().flat_map(Props::iter) {
        if is_event_handler_key(k) {
            out.insert(PropKey::Owned(k.into()), v.clone());
        }
    }
    out
}

/// Copy `props` without its handler-keyed entries, preserving order.
///
/// An absent input yields an empty prop object.
pub fn omit_handlers<E, N>(props: Option<&Props<E, N>>) -> Props<E, N> {
    let mut out = props.cloned().unwrap_or_default();
    out.retain(|k, _| !is_event_handler_key(k));
    out
}
