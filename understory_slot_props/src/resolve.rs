// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot-prop resolution: the per-slot entry point used by components.
//!
//! [`resolve_slot_props`] wraps [`merge_slot_props`] for a concrete element:
//!
//! - lazy slot props are evaluated against the owner state first;
//! - the internal ref is merged with the refs found in the slot, forwarded, and
//!   additional props, so one ref reaches the element and updates every sink;
//! - non-host components additionally receive the owner state under
//!   [`OWNER_STATE`].
//!
//! ```rust
//! use understory_slot_props::class_names::ClassValue;
//! use understory_slot_props::handlers::EventHandlers;
//! use understory_slot_props::merge::InternalProps;
//! use understory_slot_props::refs::InstanceRef;
//! use understory_slot_props::resolve::{ResolveParams, resolve_slot_props};
//! use understory_slot_props::slots::ElementType;
//! use understory_slot_props::{Props, REF};
//!
//! let internal = InstanceRef::<u32>::new();
//! let forwarded_ref = InstanceRef::<u32>::new();
//! let getter = {
//!     let internal = internal.clone();
//!     move |_: EventHandlers<(), u32>| Props::new().with(REF, internal.to_slot_ref())
//! };
//! let additional = Props::new().with(REF, forwarded_ref.to_slot_ref());
//!
//! let resolved = resolve_slot_props(ResolveParams {
//!     element_type: ElementType::host("button"),
//!     internal: InternalProps::Getter(&getter),
//!     additional_props: Some(&additional),
//!     class_name: &[ClassValue::Name("Button-root")],
//!     ..ResolveParams::default()
//! });
//!
//! resolved.attach(&42);
//! assert_eq!((internal.get(), forwarded_ref.get()), (Some(42), Some(42)));
//! assert_eq!(resolved.props.class_name(), Some("Button-root"));
//! ```

use alloc::borrow::Cow;
use core::fmt;

use crate::class_names::ClassValue;
use crate::merge::{InternalProps, MergeParams, MergedSlotProps, merge_slot_props};
use crate::props::{OWNER_STATE, PropValue, Props, REF};
use crate::refs::{SlotRef, merge_refs, ref_entry};
use crate::slots::{ElementType, SlotPropsSource};

/// Inputs to [`resolve_slot_props`].
pub struct ResolveParams<'a, E, N> {
    /// Element or component that will render the slot.
    pub element_type: ElementType,
    /// Internal props from the behavior hook, if any.
    pub internal: InternalProps<'a, E, N>,
    /// Props forwarded from the owner component.
    pub external_forwarded_props: Option<&'a Props<E, N>>,
    /// Props the consumer targeted at this slot, possibly lazy.
    pub external_slot_props: Option<&'a SlotPropsSource<E, N>>,
    /// Props the component places on the slot itself.
    pub additional_props: Option<&'a Props<E, N>>,
    /// Owner state, used for lazy slot props and handed to components.
    pub owner_state: Option<&'a Props<E, N>>,
    /// Extra class names for the slot.
    pub class_name: &'a [ClassValue<'a>],
}

impl<E, N> Default for ResolveParams<'_, E, N> {
    /// Renders a `div` with no sources.
    fn default() -> Self {
        Self {
            element_type: ElementType::host("div"),
            internal: InternalProps::Absent,
            external_forwarded_props: None,
            external_slot_props: None,
            additional_props: None,
            owner_state: None,
            class_name: &[],
        }
    }
}

impl<E, N> fmt::Debug for ResolveParams<'_, E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveParams")
            .field("element_type", &self.element_type)
            .field("internal", &self.internal)
            .field("external_forwarded_props", &self.external_forwarded_props)
            .field("external_slot_props", &self.external_slot_props)
            .field("additional_props", &self.additional_props)
            .field("owner_state", &self.owner_state)
            .field("class_name", &self.class_name)
            .finish()
    }
}

/// A slot ready to render.
pub struct ResolvedSlot<E, N> {
    /// Element or component to render.
    pub element_type: ElementType,
    /// Final props, including the merged ref under [`REF`] when there is one.
    pub props: Props<E, N>,
}

impl<E, N> ResolvedSlot<E, N> {
    /// The merged ref, if any.
    pub fn slot_ref(&self) -> Option<&SlotRef<N>> {
        self.props.get(REF).and_then(PropValue::as_ref_sink)
    }
}

impl<E, N: Clone> ResolvedSlot<E, N> {
    /// Hand the mounted instance to every ref sink.
    pub fn attach(&self, instance: &N) {
        if let Some(r) = self.slot_ref() {
            r.set(Some(instance));
        }
    }

    /// Clear every ref sink.
    pub fn detach(&self) {
        if let Some(r) = self.slot_ref() {
            r.set(None);
        }
    }
}

impl<E, N> fmt::Debug for ResolvedSlot<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSlot")
            .field("element_type", &self.element_type)
            .field("props", &self.props)
            .finish()
    }
}

/// Add `owner_state` to `props` under [`OWNER_STATE`] unless `element_type` is
/// a host element.
///
/// Existing owner state in `props` is kept and overridden key by key.
pub fn append_owner_state<E, N>(
    element_type: &ElementType,
    mut props: Props<E, N>,
    owner_state: &Props<E, N>,
) -> Props<E, N> {
    if element_type.is_host() {
        return props;
    }
    let mut merged = props
        .get(OWNER_STATE)
        .and_then(PropValue::as_props)
        .cloned()
        .unwrap_or_default();
    merged.spread(owner_state);
    props.set(OWNER_STATE, merged);
    props
}

/// Resolve the final props of one slot.
///
/// Panics raised by the internal getter or a lazy slot-props function are not
/// caught.
pub fn resolve_slot_props<E, N>(params: ResolveParams<'_, E, N>) -> ResolvedSlot<E, N> {
    let ResolveParams {
        element_type,
        internal,
        external_forwarded_props: forwarded,
        external_slot_props,
        additional_props: additional,
        owner_state,
        class_name,
    } = params;

    let no_owner_state = Props::new();
    let slot: Option<Cow<'_, Props<E, N>>> =
        external_slot_props.map(|source| source.resolve(owner_state.unwrap_or(&no_owner_state)));
    let slot = slot.as_deref();

    let MergedSlotProps {
        mut props,
        internal_ref,
    } = merge_slot_props(MergeParams {
        internal,
        external_forwarded_props: forwarded,
        external_slot_props: slot,
        additional_props: additional,
        class_name,
    });

    let merged_ref = merge_refs([
        internal_ref,
        ref_entry(slot, "slot"),
        ref_entry(forwarded, "forwarded"),
        ref_entry(additional, "additional"),
    ]);
    match merged_ref {
        Some(r) => {
            props.set(REF, r);
        }
        None => {
            props.remove(REF);
        }
    }

    if let Some(owner_state) = owner_state {
        props = append_owner_state(&element_type, props, owner_state);
    }

    ResolvedSlot {
        element_type,
        props,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::EventHandlers;
    use crate::refs::InstanceRef;

    type P = Props<(), u32>;

    #[test]
    fn no_refs_means_no_ref_key() {
        let forwarded: P = Props::new().with("id", "a");
        let resolved = resolve_slot_props(ResolveParams {
            external_forwarded_props: Some(&forwarded),
            ..ResolveParams::default()
        });
        assert!(!resolved.props.contains_key(REF));
        assert!(resolved.slot_ref().is_none());
    }

    #[test]
    fn invalid_ref_entries_are_dropped() {
        let additional: P = Props::new().with(REF, 5);
        let resolved = resolve_slot_props(ResolveParams {
            additional_props: Some(&additional),
            ..ResolveParams::default()
        });
        assert!(!resolved.props.contains_key(REF));
    }

    #[test]
    fn refs_from_every_source_are_merged() {
        let internal = InstanceRef::<u32>::new();
        let slot_cell = InstanceRef::<u32>::new();
        let forwarded_cell = InstanceRef::<u32>::new();
        let additional_cell = InstanceRef::<u32>::new();

        let getter = {
            let internal = internal.clone();
            move |_: EventHandlers<(), u32>| -> P { Props::new().with(REF, internal.to_slot_ref()) }
        };
        let slot = SlotPropsSource::Props(Props::new().with(REF, slot_cell.to_slot_ref()));
        let forwarded: P = Props::new().with(REF, forwarded_cell.to_slot_ref());
        let additional: P = Props::new().with(REF, additional_cell.to_slot_ref());

        let resolved = resolve_slot_props(ResolveParams {
            internal: InternalProps::Getter(&getter),
            external_forwarded_props: Some(&forwarded),
            external_slot_props: Some(&slot),
            additional_props: Some(&additional),
            ..ResolveParams::default()
        });

        assert_eq!(resolved.slot_ref().map(SlotRef::sink_count), Some(4));
        resolved.attach(&1);
        for cell in [&internal, &slot_cell, &forwarded_cell, &additional_cell] {
            assert_eq!(cell.get(), Some(1));
        }
        resolved.detach();
        for cell in [&internal, &slot_cell, &forwarded_cell, &additional_cell] {
            assert_eq!(cell.get(), None);
        }
    }

    #[test]
    fn shared_ref_is_set_once() {
        let cell = InstanceRef::<u32>::new();
        let forwarded: P = Props::new().with(REF, cell.to_slot_ref());
        let additional: P = Props::new().with(REF, cell.to_slot_ref());

        let resolved = resolve_slot_props(ResolveParams {
            external_forwarded_props: Some(&forwarded),
            additional_props: Some(&additional),
            ..ResolveParams::default()
        });

        assert_eq!(resolved.slot_ref().map(SlotRef::sink_count), Some(1));
    }

    #[test]
    fn owner_state_goes_to_components_only() {
        let owner: P = Props::new().with("disabled", true);

        let host = resolve_slot_props(ResolveParams {
            element_type: ElementType::host("button"),
            owner_state: Some(&owner),
            ..ResolveParams::default()
        });
        assert!(!host.props.contains_key(OWNER_STATE));

        let existing: P = Props::new().with(
            OWNER_STATE,
            Props::new().with("variant", "outlined").with("disabled", false),
        );
        let component = resolve_slot_props(ResolveParams {
            element_type: ElementType::component("FancyButton"),
            additional_props: Some(&existing),
            owner_state: Some(&owner),
            ..ResolveParams::default()
        });
        let state = component
            .props
            .get(OWNER_STATE)
            .and_then(PropValue::as_props)
            .unwrap();
        assert_eq!(state.get("variant").and_then(PropValue::as_str), Some("outlined"));
        assert_eq!(state.get("disabled"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn lazy_slot_props_resolve_before_merging() {
        let owner: P = Props::new().with("active", true);
        let slot = SlotPropsSource::lazy(|owner: &P| {
            let active = matches!(owner.get("active"), Some(PropValue::Bool(true)));
            Props::new().with("className", if active { "is-active" } else { "" })
        });

        let resolved = resolve_slot_props(ResolveParams {
            external_slot_props: Some(&slot),
            owner_state: Some(&owner),
            ..ResolveParams::default()
        });
        assert_eq!(resolved.props.class_name(), Some("is-active"));
        assert_eq!(resolved.element_type, ElementType::host("div"));
    }
}
