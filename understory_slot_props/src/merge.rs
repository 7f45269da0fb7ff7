// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot-prop merging.
//!
//! ## Overview
//!
//! A slot can receive props from four places, lowest to highest precedence for
//! plain attributes:
//!
//! 1. the internal props returned by a behavior hook ([`InternalProps`]);
//! 2. additional props the component itself places on the slot;
//! 3. external props forwarded from the owner component (root slot only, usually);
//! 4. external props targeted at this slot.
//!
//! [`merge_slot_props`] combines them into one [`Props`] and reports the ref the
//! internal props carry, so the resolver can merge it with consumer refs.
//!
//! ## Handlers
//!
//! Without a behavior hook ([`InternalProps::Absent`]) nobody intercepts
//! events, so handlers follow the same "later wins" rule as every other key: a
//! slot handler replaces a forwarded one of the same name.
//!
//! With a hook ([`InternalProps::Getter`]) the hook is the only call site for
//! events. The consumer's handlers are pulled out of the external props and
//! handed to the getter, which calls them when its own logic allows (for
//! example not while disabled). The external props reach the element without
//! their handlers, so no handler is attached twice and interception cannot be
//! bypassed.
//!
//! ## Class names
//!
//! `className` values from every source are joined (see
//! [`join_class_names`]) in the order forwarded, slot, explicit
//! [`MergeParams::class_name`], additional, internal. An empty result removes the
//! key.

use alloc::string::String;
use core::fmt;

use crate::class_names::{ClassValue, join_class_names};
use crate::handlers::{EventHandlers, extract_handlers, omit_handlers};
use crate::props::{CLASS_NAME, Props};
use crate::refs::{SlotRef, ref_entry};

/// Getter a behavior hook exposes for one slot.
///
/// It receives the consumer's handlers, must call the ones it honors at the
/// right moment, and returns the props (including the handlers) to attach.
pub type SlotPropsGetter<'a, E, N> = &'a dyn Fn(EventHandlers<E, N>) -> Props<E, N>;

/// Whether a behavior hook supplies internal props for a slot.
pub enum InternalProps<'a, E, N> {
    /// No hook: external props are spread as-is, handlers included.
    Absent,
    /// A hook getter that owns event dispatch for the slot.
    Getter(SlotPropsGetter<'a, E, N>),
}

impl<E, N> Default for InternalProps<'_, E, N> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<E, N> Clone for InternalProps<'_, E, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, N> Copy for InternalProps<'_, E, N> {}

impl<E, N> fmt::Debug for InternalProps<'_, E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Getter(_) => f.write_str("Getter(..)"),
        }
    }
}

/// Inputs to [`merge_slot_props`].
pub struct MergeParams<'a, E, N> {
    /// Internal props from the behavior hook, if any.
    pub internal: InternalProps<'a, E, N>,
    /// Props the consumer placed on the owner component that should be
    /// forwarded to this slot.
    pub external_forwarded_props: Option<&'a Props<E, N>>,
    /// Props the consumer targeted at this slot.
    pub external_slot_props: Option<&'a Props<E, N>>,
    /// Props the component places on the slot itself.
    pub additional_props: Option<&'a Props<E, N>>,
    /// Extra class names for the slot (for example state classes).
    pub class_name: &'a [ClassValue<'a>],
}

impl<E, N> Default for MergeParams<'_, E, N> {
    fn default() -> Self {
        Self {
            internal: InternalProps::Absent,
            external_forwarded_props: None,
            external_slot_props: None,
            additional_props: None,
            class_name: &[],
        }
    }
}

impl<E, N> fmt::Debug for MergeParams<'_, E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeParams")
            .field("internal", &self.internal)
            .field("external_forwarded_props", &self.external_forwarded_props)
            .field("external_slot_props", &self.external_slot_props)
            .field("additional_props", &self.additional_props)
            .field("class_name", &self.class_name)
            .finish()
    }
}

/// Output of [`merge_slot_props`].
pub struct MergedSlotProps<E, N> {
    /// Final props for the slot.
    pub props: Props<E, N>,
    /// The ref found in the internal props. Always `None` without a getter.
    pub internal_ref: Option<SlotRef<N>>,
}

impl<E, N> fmt::Debug for MergedSlotProps<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergedSlotProps")
            .field("props", &self.props)
            .field("internal_ref", &self.internal_ref)
            .finish()
    }
}

impl<E, N> PartialEq for MergedSlotProps<E, N> {
    fn eq(&self, other: &Self) -> bool {
        self.props == other.props && self.internal_ref == other.internal_ref
    }
}

fn class_of<'p, E, N>(props: Option<&'p Props<E, N>>) -> ClassValue<'p> {
    props.and_then(Props::class_name).into()
}

fn apply_class_name<E, N>(props: &mut Props<E, N>, joined: Option<String>) {
    match joined {
        Some(joined) => {
            props.set(CLASS_NAME, joined);
        }
        None => {
            props.remove(CLASS_NAME);
        }
    }
}

/// Merge the prop sources of one slot.
///
/// Sources are only read; the result is a fresh [`Props`]. Panics raised by the
/// getter propagate to the caller.
///
/// ```rust
/// use understory_slot_props::class_names::ClassValue;
/// use understory_slot_props::merge::{InternalProps, MergeParams, merge_slot_props};
/// use understory_slot_props::{PropValue, Props};
///
/// let additional: Props<(), ()> = Props::new().with("a", 1);
/// let forwarded = Props::new().with("a", 2).with("b", 2).with("className", "y");
/// let slot = Props::new().with("a", 3).with("className", "z");
///
/// let merged = merge_slot_props(MergeParams {
///     internal: InternalProps::Absent,
///     external_forwarded_props: Some(&forwarded),
///     external_slot_props: Some(&slot),
///     additional_props: Some(&additional),
///     class_name: &[ClassValue::Name("x")],
/// });
///
/// assert_eq!(merged.props.get("a"), Some(&PropValue::Int(3)));
/// assert_eq!(merged.props.get("b"), Some(&PropValue::Int(2)));
/// assert_eq!(merged.props.class_name(), Some("y z x"));
/// assert!(merged.internal_ref.is_none());
/// ```
pub fn merge_slot_props<E, N>(params: MergeParams<'_, E, N>) -> MergedSlotProps<E, N> {
    let MergeParams {
        internal,
        external_forwarded_props: forwarded,
        external_slot_props: slot,
        additional_props: additional,
        class_name,
    } = params;

    let getter = match internal {
        InternalProps::Absent => {
            return merge_without_getter(forwarded, slot, additional, class_name);
        }
        InternalProps::Getter(getter) => getter,
    };

    // The getter owns dispatch: hand it the consumer's handlers and keep them
    // off the element.
    let mut external = forwarded.cloned().unwrap_or_default();
    if let Some(slot) = slot {
        external.spread(slot);
    }
    let handlers = extract_handlers(Some(&external));
    let forwarded_rest = omit_handlers(forwarded);
    let slot_rest = omit_handlers(slot);
    log::trace!(
        "merge_slot_props: forwarding {} external handler(s) to the slot getter",
        handlers.len()
    );

    let internal_props = getter(handlers);

    let joined = join_class_names(&[
        class_of(forwarded),
        class_of(slot),
        ClassValue::List(class_name),
        class_of(additional),
        class_of(Some(&internal_props)),
    ]);
    let internal_ref = ref_entry(Some(&internal_props), "internal");

    let mut props = internal_props;
    if let Some(additional) = additional {
        props.spread(additional);
    }
    props.spread(&forwarded_rest);
    props.spread(&slot_rest);
    apply_class_name(&mut props, joined);

    MergedSlotProps {
        props,
        internal_ref,
    }
}

fn merge_without_getter<E, N>(
    forwarded: Option<&Props<E, N>>,
    slot: Option<&Props<E, N>>,
    additional: Option<&Props<E, N>>,
    class_name: &[ClassValue<'_>],
) -> MergedSlotProps<E, N> {
    let joined = join_class_names(&[
        class_of(forwarded),
        class_of(slot),
        ClassValue::List(class_name),
        class_of(additional),
    ]);

    let mut props = Props::new();
    for source in [additional, forwarded, slot].into_iter().flatten() {
        props.spread(source);
    }
    apply_class_name(&mut props, joined);

    MergedSlotProps {
        props,
        internal_ref: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{PropValue, REF};
    use crate::refs::InstanceRef;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    type P = Props<&'static str, u32>;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder() -> (Log, impl Fn(&'static str) -> PropValue<&'static str, u32>) {
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        let make = move |label: &'static str| {
            let sink = Rc::clone(&sink);
            PropValue::handler(move |_: &&'static str| sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn without_getter_later_sources_win() {
        let additional: P = Props::new().with("a", 1);
        let forwarded: P = Props::new().with("a", 2).with("b", 2);
        let slot: P = Props::new().with("a", 3);

        let merged = merge_slot_props(MergeParams {
            external_forwarded_props: Some(&forwarded),
            external_slot_props: Some(&slot),
            additional_props: Some(&additional),
            ..MergeParams::default()
        });

        let expected: P = Props::new().with("a", 3).with("b", 2);
        assert_eq!(merged.props, expected);
        assert!(merged.internal_ref.is_none());
    }

    #[test]
    fn without_getter_slot_handler_replaces_forwarded_handler() {
        let (log, make) = recorder();
        let forwarded: P = Props::new().with("onClick", make("forwarded"));
        let slot: P = Props::new().with("onClick", make("slot"));

        let merged = merge_slot_props(MergeParams {
            external_forwarded_props: Some(&forwarded),
            external_slot_props: Some(&slot),
            ..MergeParams::default()
        });

        let on_click = merged.props.handler("onClick").unwrap();
        on_click(&"click");
        assert_eq!(*log.borrow(), vec!["slot"]);
    }

    #[test]
    fn without_getter_ignores_refs() {
        let cell = InstanceRef::<u32>::new();
        let additional: P = Props::new().with(REF, cell.to_slot_ref());

        let merged = merge_slot_props(MergeParams {
            additional_props: Some(&additional),
            ..MergeParams::default()
        });

        assert!(merged.internal_ref.is_none());
        // The ref entry is still spread; reconciling it is the resolver's job.
        assert!(merged.props.contains_key(REF));
    }

    #[test]
    fn without_getter_class_name_order() {
        let forwarded: P = Props::new().with(CLASS_NAME, "y");
        let slot: P = Props::new().with(CLASS_NAME, "z");
        let additional: P = Props::new().with(CLASS_NAME, "w");

        let merged = merge_slot_props(MergeParams {
            external_forwarded_props: Some(&forwarded),
            external_slot_props: Some(&slot),
            additional_props: Some(&additional),
            class_name: &[ClassValue::Name("x")],
            ..MergeParams::default()
        });

        assert_eq!(merged.props.class_name(), Some("y z x w"));
    }

    #[test]
    fn empty_class_names_remove_the_key() {
        let forwarded: P = Props::new().with(CLASS_NAME, "").with("id", "a");

        let merged = merge_slot_props(MergeParams {
            external_forwarded_props: Some(&forwarded),
            class_name: &[ClassValue::Absent],
            ..MergeParams::default()
        });

        assert!(!merged.props.contains_key(CLASS_NAME));
        assert!(merged.props.contains_key("id"));
    }

    #[test]
    fn with_getter_attributes_override_internal_props() {
        let additional: P = Props::new().with("a", 1);
        let forwarded: P = Props::new().with("a", 2).with("b", 2);
        let slot: P = Props::new().with("a", 3);
        let getter = |_: EventHandlers<&'static str, u32>| -> P {
            Props::new().with("a", 9).with("role", "button")
        };

        let merged = merge_slot_props(MergeParams {
            internal: InternalProps::Getter(&getter),
            external_forwarded_props: Some(&forwarded),
            external_slot_props: Some(&slot),
            additional_props: Some(&additional),
            class_name: &[],
        });

        assert_eq!(merged.props.get("a"), Some(&PropValue::Int(3)));
        assert_eq!(merged.props.get("b"), Some(&PropValue::Int(2)));
        assert_eq!(merged.props.get("role").and_then(PropValue::as_str), Some("button"));
    }

    #[test]
    fn getter_receives_external_handlers_with_slot_winning() {
        let (log, make) = recorder();
        let forwarded: P = Props::new()
            .with("onClick", make("forwarded click"))
            .with("onFocus", make("forwarded focus"));
        let slot: P = Props::new().with("onClick", make("slot click"));

        let received: RefCell<Vec<String>> = RefCell::default();
        let getter = |handlers: EventHandlers<&'static str, u32>| -> P {
            received.borrow_mut().extend(handlers.keys().map(String::from));
            handlers.call("onClick", &"click");
            handlers.call("onFocus", &"focus");
            Props::new()
        };

        let merged = merge_slot_props(MergeParams {
            internal: InternalProps::Getter(&getter),
            external_forwarded_props: Some(&forwarded),
            external_slot_props: Some(&slot),
            ..MergeParams::default()
        });

        assert_eq!(*received.borrow(), vec!["onClick", "onFocus"]);
        assert_eq!(*log.borrow(), vec!["slot click", "forwarded focus"]);
        // External handlers never reach the element directly.
        assert!(merged.props.handler("onClick").is_none());
        assert!(merged.props.handler("onFocus").is_none());
    }

    #[test]
    fn with_getter_handlers_come_from_the_getter() {
        let (log, make) = recorder();
        let forwarded: P = Props::new().with("onClick", make("consumer"));

        let getter = |handlers: EventHandlers<&'static str, u32>| -> P {
            let inner = make("internal");
            Props::new().with_handler("onClick", move |ev: &&'static str| {
                if let PropValue::Handler(h) = &inner {
                    h(ev);
                }
                handlers.call("onClick", ev);
            })
        };

        let merged = merge_slot_props(MergeParams {
            internal: InternalProps::Getter(&getter),
            external_forwarded_props: Some(&forwarded),
            ..MergeParams::default()
        });

        merged.props.handler("onClick").unwrap()(&"click");
        assert_eq!(*log.borrow(), vec!["internal", "consumer"]);
    }

    #[test]
    fn with_getter_internal_class_name_comes_last() {
        let forwarded: P = Props::new().with(CLASS_NAME, "consumer");
        let getter = |_: EventHandlers<&'static str, u32>| -> P {
            Props::new().with(CLASS_NAME, "state-active")
        };

        let merged = merge_slot_props(MergeParams {
            internal: InternalProps::Getter(&getter),
            external_forwarded_props: Some(&forwarded),
            class_name: &[ClassValue::Name("root")],
            ..MergeParams::default()
        });

        assert_eq!(merged.props.class_name(), Some("consumer root state-active"));
    }

    #[test]
    fn with_getter_reports_the_internal_ref() {
        let cell = InstanceRef::<u32>::new();
        let internal_ref = cell.to_slot_ref();
        let getter = {
            let internal_ref = internal_ref.clone();
            move |_: EventHandlers<&'static str, u32>| -> P {
                Props::new().with(REF, internal_ref.clone())
            }
        };

        let merged = merge_slot_props(MergeParams {
            internal: InternalProps::Getter(&getter),
            ..MergeParams::default()
        });

        assert!(merged.internal_ref.unwrap().same_sink(&internal_ref));
    }

    #[test]
    fn sources_are_not_mutated() {
        let forwarded: P = Props::new()
            .with("onClick", PropValue::handler(|_: &&'static str| {}))
            .with(CLASS_NAME, "y");
        let before = forwarded.clone();
        let getter = |_: EventHandlers<&'static str, u32>| -> P { Props::new() };

        let _ = merge_slot_props(MergeParams {
            internal: InternalProps::Getter(&getter),
            external_forwarded_props: Some(&forwarded),
            ..MergeParams::default()
        });

        assert_eq!(forwarded, before);
    }
}
