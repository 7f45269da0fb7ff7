// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_slot_props --heading-base-level=0

//! Understory Slot Props: prop composition for headless components.
//!
//! ## Overview
//!
//! A headless component ships behavior (focus handling, keyboard handling,
//! state-derived class names) and lets the consumer decide how each structural
//! slot renders. This crate computes the final props for one slot from up to
//! four sources:
//!
//! - the internal props of a behavior hook, given as a getter
//!   ([`InternalProps::Getter`](merge::InternalProps::Getter));
//! - additional props the component places on the slot;
//! - external props forwarded from the owner component;
//! - external props the consumer targeted at the slot.
//!
//! It does not render anything and does not compute interactive state. The
//! behavior hook and the rendering layer are external; the crate only sees the
//! props they produce.
//!
//! ## Layers
//!
//! - [`handlers`]: classifies keys as event handlers (`on` + uppercase letter)
//!   and splits prop objects into handler and non-handler parts.
//! - [`class_names`]: joins class-name fragments, dropping empty ones.
//! - [`merge`]: the merge itself ([`merge_slot_props`](merge::merge_slot_props)).
//! - [`refs`]: ref sinks and [`merge_refs`](refs::merge_refs).
//! - [`slots`]: slot declarations, element overrides and per-slot consumer props.
//! - [`resolve`]: the per-slot entry point
//!   ([`resolve_slot_props`](resolve::resolve_slot_props)) that also merges refs
//!   and hands owner state to components.
//!
//! ## Handlers are called exactly once
//!
//! When a behavior hook is present, the consumer's handlers are given to the
//! hook's getter and removed from the external props. The getter's own
//! handlers are the only ones attached to the element, and they call the
//! consumer's handlers when the hook's logic allows. A handler passed both on the
//! owner component and in slot props is therefore never attached twice.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use understory_slot_props::handlers::EventHandlers;
//! use understory_slot_props::merge::InternalProps;
//! use understory_slot_props::resolve::{ResolveParams, resolve_slot_props};
//! use understory_slot_props::slots::ElementType;
//! use understory_slot_props::Props;
//!
//! struct Click;
//!
//! let clicks = Rc::new(Cell::new(0));
//! let forwarded: Props<Click, ()> = Props::new().with_handler("onClick", {
//!     let clicks = clicks.clone();
//!     move |_| clicks.set(clicks.get() + 1)
//! });
//!
//! // A behavior hook that ignores clicks while disabled.
//! let disabled = false;
//! let get_root_props = |external: EventHandlers<Click, ()>| {
//!     Props::new()
//!         .with("type", "button")
//!         .with_handler("onClick", move |ev| {
//!             if !disabled {
//!                 external.call("onClick", ev);
//!             }
//!         })
//! };
//!
//! let root = resolve_slot_props(ResolveParams {
//!     element_type: ElementType::host("button"),
//!     internal: InternalProps::Getter(&get_root_props),
//!     external_forwarded_props: Some(&forwarded),
//!     ..ResolveParams::default()
//! });
//!
//! root.props.handler("onClick").unwrap()(&Click);
//! assert_eq!(clicks.get(), 1);
//! ```
//!
//! ## Precedence
//!
//! Plain attributes resolve as internal < additional < forwarded < slot.
//! Class names from every source are joined rather than replaced, and an empty
//! result removes `className` instead of writing an empty string.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod class_names;
pub mod handlers;
pub mod merge;
pub mod props;
pub mod refs;
pub mod resolve;
pub mod slots;

pub use props::{CLASS_NAME, Handler, OWNER_STATE, PropKey, PropValue, Props, REF};
