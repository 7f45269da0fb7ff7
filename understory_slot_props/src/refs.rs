// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Refs: sinks that receive the rendered instance of a slot.
//!
//! A [`SlotRef`] is either an object ref ([`InstanceRef`], a shared cell the
//! caller reads later) or a callback ref. Both expose a single operation,
//! [`SlotRef::set`], which the rendering layer calls with `Some(instance)` on
//! attach and `None` on detach.
//!
//! A component often needs the instance itself (for example to move focus)
//! while the consumer also wants it. [`merge_refs`] folds any number of refs
//! into one that sets every distinct sink, so exactly one ref reaches the
//! element.
//!
//! ```rust
//! use understory_slot_props::refs::{InstanceRef, SlotRef, merge_refs};
//!
//! let internal = InstanceRef::<u32>::new();
//! let external = InstanceRef::<u32>::new();
//! let merged = merge_refs([Some(internal.to_slot_ref()), None, Some(external.to_slot_ref())])
//!     .expect("two sinks");
//!
//! merged.set(Some(&7));
//! assert_eq!((internal.get(), external.get()), (Some(7), Some(7)));
//! merged.set(None);
//! assert_eq!((internal.get(), external.get()), (None, None));
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use smallvec::SmallVec;

use crate::props::{PropValue, Props, REF};

/// Shared cell holding the current instance of a slot, if mounted.
pub struct InstanceRef<N> {
    cell: Rc<RefCell<Option<N>>>,
}

impl<N> InstanceRef<N> {
    /// Create an empty (detached) cell.
    pub fn new() -> Self {
        Self {
            cell: Rc::new(RefCell::new(None)),
        }
    }

    /// Whether an instance is currently attached.
    pub fn is_attached(&self) -> bool {
        self.cell.borrow().is_some()
    }

    /// Wrap a handle to this cell as a [`SlotRef`].
    pub fn to_slot_ref(&self) -> SlotRef<N> {
        SlotRef::Object(self.clone())
    }

    /// Whether both handles point to the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<N: Clone> InstanceRef<N> {
    /// Copy of the attached instance.
    pub fn get(&self) -> Option<N> {
        self.cell.borrow().clone()
    }
}

impl<N> Default for InstanceRef<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for InstanceRef<N> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for InstanceRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InstanceRef").field(&self.cell.borrow()).finish()
    }
}

/// A sink for the rendered instance of a slot.
pub enum SlotRef<N> {
    /// Object ref: the instance is stored into a shared cell.
    Object(InstanceRef<N>),
    /// Callback ref: invoked with the instance on attach and `None` on detach.
    Callback(Rc<dyn Fn(Option<&N>)>),
    /// Several distinct sinks set together. Built by [`merge_refs`].
    Merged(Rc<[SlotRef<N>]>),
}

impl<N> SlotRef<N> {
    /// Wrap a closure as a callback ref.
    pub fn callback(f: impl Fn(Option<&N>) + 'static) -> Self {
        Self::Callback(Rc::new(f))
    }

    /// Whether both refs are the same sink.
    pub fn same_sink(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Callback(a), Self::Callback(b)) => Rc::ptr_eq(a, b),
            (Self::Merged(a), Self::Merged(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Number of leaf sinks this ref updates.
    pub fn sink_count(&self) -> usize {
        match self {
            Self::Merged(sinks) => sinks.len(),
            _ => 1,
        }
    }
}

impl<N: Clone> SlotRef<N> {
    /// Attach (`Some`) or detach (`None`) the instance on every sink.
    pub fn set(&self, instance: Option<&N>) {
        match self {
            Self::Object(r) => *r.cell.borrow_mut() = instance.cloned(),
            Self::Callback(f) => f(instance),
            Self::Merged(sinks) => {
                for sink in sinks.iter() {
                    sink.set(instance);
                }
            }
        }
    }
}

impl<N> Clone for SlotRef<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Object(r) => Self::Object(r.clone()),
            Self::Callback(f) => Self::Callback(Rc::clone(f)),
            Self::Merged(sinks) => Self::Merged(Rc::clone(sinks)),
        }
    }
}

impl<N> PartialEq for SlotRef<N> {
    fn eq(&self, other: &Self) -> bool {
        self.same_sink(other)
    }
}

impl<N> fmt::Debug for SlotRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(_) => f.write_str("SlotRef::Object(..)"),
            Self::Callback(_) => f.write_str("SlotRef::Callback(..)"),
            Self::Merged(sinks) => f.debug_tuple("SlotRef::Merged").field(&sinks.len()).finish(),
        }
    }
}

impl<N> From<InstanceRef<N>> for SlotRef<N> {
    fn from(r: InstanceRef<N>) -> Self {
        Self::Object(r)
    }
}

/// Fold refs into a single ref that sets every distinct sink.
///
/// Absent entries are skipped, nested merged refs are flattened, and a sink that
/// appears more than once is kept only at its first position so it is set once
/// per update. Returns `None` when no sink remains and the single sink itself
/// when only one does.
pub fn merge_refs<N>(refs: impl IntoIterator<Item = Option<SlotRef<N>>>) -> Option<SlotRef<N>> {
    let mut sinks: SmallVec<[SlotRef<N>; 4]> = SmallVec::new();
    for r in refs.into_iter().flatten() {
        push_sink(&mut sinks, r);
    }
    match sinks.len() {
        0 => None,
        1 => sinks.pop(),
        _ => Some(SlotRef::Merged(sinks.into_vec().into())),
    }
}

fn push_sink<N>(sinks: &mut SmallVec<[SlotRef<N>; 4]>, r: SlotRef<N>) {
    if let SlotRef::Merged(inner) = &r {
        for sink in inner.iter() {
            push_sink(sinks, sink.clone());
        }
        return;
    }
    if sinks.iter().any(|s| s.same_sink(&r)) {
        log::debug!("merge_refs: dropping duplicate ref sink {r:?}");
        return;
    }
    sinks.push(r);
}

/// Read the ref stored under [`REF`] in `props`.
///
/// A `ref` entry that does not hold a [`SlotRef`] cannot receive the instance;
/// it is reported with a warning naming `source` and ignored.
pub fn ref_entry<E, N>(props: Option<&Props<E, N>>, source: &str) -> Option<SlotRef<N>> {
    match props?.get(REF)? {
        PropValue::Ref(r) => Some(r.clone()),
        other => {
            log::warn!(
                "ignoring `{REF}` in {source} props: expected a ref, found a {} value",
                other.kind()
            );
            None
        }
    }
}
