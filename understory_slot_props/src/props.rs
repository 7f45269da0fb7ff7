// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prop objects: ordered key/value maps attached to one rendered element.
//!
//! A [`Props`] value behaves like a plain object literal in a component tree:
//! keys are strings, values are loosely typed ([`PropValue`]), and writing a key
//! that already exists replaces the value in place without moving the key.
//! [`Props::spread`] gives the usual "later source wins" object spread.
//!
//! Props are generic over the event type `E` passed to handlers and the
//! instance handle `N` that refs point at. Both are chosen by the rendering
//! layer; the engine never inspects them.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;

use crate::refs::SlotRef;

/// Key of a prop entry.
pub type PropKey = Cow<'static, str>;

/// Shared event callback.
///
/// Handlers are reference counted so a behavior hook can capture the handlers it
/// was given and still hand copies of its own handlers back to the engine.
pub type Handler<E> = Rc<dyn Fn(&E)>;

/// Key holding the joined class-name string.
pub const CLASS_NAME: &str = "className";

/// Key holding the ref that should receive the rendered instance.
pub const REF: &str = "ref";

/// Key under which owner state is handed to non-host components.
pub const OWNER_STATE: &str = "ownerState";

/// A single prop value.
pub enum PropValue<E, N> {
    /// A string attribute.
    Str(String),
    /// A boolean attribute.
    Bool(bool),
    /// An integer attribute.
    Int(i64),
    /// A floating point attribute.
    Float(f64),
    /// An event callback.
    Handler(Handler<E>),
    /// A ref sink for the rendered instance.
    Ref(SlotRef<N>),
    /// A nested prop object (for example owner state or inline style).
    Props(Props<E, N>),
}

impl<E, N> PropValue<E, N> {
    /// Wrap a closure as a [`PropValue::Handler`].
    pub fn handler(f: impl Fn(&E) + 'static) -> Self {
        Self::Handler(Rc::new(f))
    }

    /// Returns the string value, if this is a [`PropValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the handler, if this is a [`PropValue::Handler`].
    pub fn as_handler(&self) -> Option<&Handler<E>> {
        match self {
            Self::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Returns the ref, if this is a [`PropValue::Ref`].
    pub fn as_ref_sink(&self) -> Option<&SlotRef<N>> {
        match self {
            Self::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the nested props, if this is a [`PropValue::Props`].
    pub fn as_props(&self) -> Option<&Props<E, N>> {
        match self {
            Self::Props(p) => Some(p),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Handler(_) => "handler",
            Self::Ref(_) => "ref",
            Self::Props(_) => "props",
        }
    }
}

impl<E, N> Clone for PropValue<E, N> {
    fn clone(&self) -> Self {
        match self {
            Self::Str(s) => Self::Str(s.clone()),
            Self::Bool(b) => Self::Bool(*b),
            Self::Int(i) => Self::Int(*i),
            Self::Float(f) => Self::Float(*f),
            Self::Handler(h) => Self::Handler(Rc::clone(h)),
            Self::Ref(r) => Self::Ref(r.clone()),
            Self::Props(p) => Self::Props(p.clone()),
        }
    }
}

/// Handlers compare by identity; everything else compares by value.
impl<E, N> PartialEq for PropValue<E, N> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Handler(a), Self::Handler(b)) => Rc::ptr_eq(a, b),
            (Self::Ref(a), Self::Ref(b)) => a.same_sink(b),
            (Self::Props(a), Self::Props(b)) => a == b,
            _ => false,
        }
    }
}

impl<E, N> fmt::Debug for PropValue<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Ref(r) => f.debug_tuple("Ref").field(r).finish(),
            Self::Props(p) => f.debug_tuple("Props").field(p).finish(),
        }
    }
}

impl<E, N> From<&str> for PropValue<E, N> {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl<E, N> From<String> for PropValue<E, N> {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<E, N> From<bool> for PropValue<E, N> {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<E, N> From<i64> for PropValue<E, N> {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl<E, N> From<i32> for PropValue<E, N> {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl<E, N> From<f64> for PropValue<E, N> {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl<E, N> From<SlotRef<N>> for PropValue<E, N> {
    fn from(r: SlotRef<N>) -> Self {
        Self::Ref(r)
    }
}

impl<E, N> From<Props<E, N>> for PropValue<E, N> {
    fn from(p: Props<E, N>) -> Self {
        Self::Props(p)
    }
}

/// An ordered prop object.
///
/// Entries keep insertion order. [`Props::set`] on an existing key replaces the
/// value in place, which matches object-spread semantics: a key keeps the
/// position of its first appearance and the value of its last.
///
/// ```rust
/// use understory_slot_props::Props;
///
/// let mut base: Props<(), ()> = Props::new().with("id", "a").with("role", "button");
/// base.spread(&Props::new().with("id", "b").with("tabIndex", 0));
///
/// let keys: Vec<_> = base.keys().collect();
/// assert_eq!(keys, ["id", "role", "tabIndex"]);
/// assert_eq!(base.get("id").and_then(|v| v.as_str()), Some("b"));
/// ```
pub struct Props<E, N> {
    entries: IndexMap<PropKey, PropValue<E, N>, DefaultHashBuilder>,
}

impl<E, N> Props<E, N> {
    /// Create an empty prop object.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::with_hasher(DefaultHashBuilder::default()),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&PropValue<E, N>> {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace an entry, returning the previous value.
    ///
    /// Replacing keeps the key at its original position.
    pub fn set(
        &mut self,
        key: impl Into<PropKey>,
        value: impl Into<PropValue<E, N>>,
    ) -> Option<PropValue<E, N>> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder form of [`Props::set`].
    pub fn with(mut self, key: impl Into<PropKey>, value: impl Into<PropValue<E, N>>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder that stores a closure as a handler.
    pub fn with_handler(mut self, key: impl Into<PropKey>, f: impl Fn(&E) + 'static) -> Self {
        self.set(key, PropValue::handler(f));
        self
    }

    /// Remove an entry, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<PropValue<E, N>> {
        self.entries.shift_remove(key)
    }

    /// Copy every entry of `other` into `self`, later entries winning.
    pub fn spread(&mut self, other: &Self) {
        self.entries.reserve(other.len());
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue<E, N>)> + '_ {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(|k| &**k)
    }

    /// Keep only entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &PropValue<E, N>) -> bool) {
        self.entries.retain(|k, v| keep(&**k, &*v));
    }

    /// The `className` entry, when it holds a string.
    pub fn class_name(&self) -> Option<&str> {
        self.get(CLASS_NAME).and_then(PropValue::as_str)
    }

    /// The handler stored under `key`, if any.
    pub fn handler(&self, key: &str) -> Option<&Handler<E>> {
        self.get(key).and_then(PropValue::as_handler)
    }
}

impl<E, N> Default for Props<E, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, N> Clone for Props<E, N> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

/// Order-sensitive equality.
impl<E, N> PartialEq for Props<E, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<E, N> fmt::Debug for Props<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<E, N, K, V> FromIterator<(K, V)> for Props<E, N>
where
    K: Into<PropKey>,
    V: Into<PropValue<E, N>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (k, v) in iter {
            props.set(k, v);
        }
        props
    }
}
