// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot declarations and consumer overrides.
//!
//! A component declares the slots it renders (for example `["root"]` for a
//! button, or `["root", "listbox", "option"]` for a select). Consumers can
//! override the element used for a slot and pass props targeted at it; both are
//! registered on [`SlotOverrides`], which rejects slot names the component does
//! not declare.
//!
//! ```rust
//! use understory_slot_props::slots::{ElementType, SlotError, SlotOverrides, SlotPropsSource};
//! use understory_slot_props::Props;
//!
//! let overrides: SlotOverrides<(), ()> = SlotOverrides::new(&["root"])
//!     .with_component("root", ElementType::component("FancyButton"))
//!     .unwrap()
//!     .with_slot_props("root", SlotPropsSource::Props(Props::new().with("id", "b")))
//!     .unwrap();
//!
//! let element = overrides.element_type("root", None, ElementType::host("button"));
//! assert_eq!(element, ElementType::component("FancyButton"));
//!
//! let err = SlotOverrides::<(), ()>::new(&["root"])
//!     .with_slot_props("thumb", SlotPropsSource::Props(Props::new()))
//!     .unwrap_err();
//! assert_eq!(err, SlotError::UndeclaredSlot { slot: "thumb".into() });
//! ```

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::props::Props;

/// The element or component rendered for a slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// A host element such as `button` or `div`.
    Host(Cow<'static, str>),
    /// A user component. Components receive owner state; host elements do not.
    Component(Cow<'static, str>),
}

impl ElementType {
    /// A host element.
    pub fn host(tag: impl Into<Cow<'static, str>>) -> Self {
        Self::Host(tag.into())
    }

    /// A user component.
    pub fn component(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Component(name.into())
    }

    /// Whether this is a host element.
    pub fn is_host(&self) -> bool {
        matches!(self, Self::Host(_))
    }

    /// Tag or component name.
    pub fn name(&self) -> &str {
        match self {
            Self::Host(name) | Self::Component(name) => name,
        }
    }
}

/// Owner-state function used by [`SlotPropsSource::Lazy`].
pub type LazySlotProps<E, N> = Rc<dyn Fn(&Props<E, N>) -> Props<E, N>>;

/// Props a consumer targets at one slot.
pub enum SlotPropsSource<E, N> {
    /// Plain props.
    Props(Props<E, N>),
    /// Props computed from the owner state at render time.
    Lazy(LazySlotProps<E, N>),
}

impl<E, N> SlotPropsSource<E, N> {
    /// Wrap a closure as a [`SlotPropsSource::Lazy`].
    pub fn lazy(f: impl Fn(&Props<E, N>) -> Props<E, N> + 'static) -> Self {
        Self::Lazy(Rc::new(f))
    }

    /// Resolve to plain props for the given owner state.
    pub fn resolve(&self, owner_state: &Props<E, N>) -> Cow<'_, Props<E, N>> {
        match self {
            Self::Props(props) => Cow::Borrowed(props),
            Self::Lazy(f) => Cow::Owned(f(owner_state)),
        }
    }
}

impl<E, N> Clone for SlotPropsSource<E, N> {
    fn clone(&self) -> Self {
        match self {
            Self::Props(p) => Self::Props(p.clone()),
            Self::Lazy(f) => Self::Lazy(Rc::clone(f)),
        }
    }
}

impl<E, N> fmt::Debug for SlotPropsSource<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Props(p) => f.debug_tuple("Props").field(p).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl<E, N> From<Props<E, N>> for SlotPropsSource<E, N> {
    fn from(props: Props<E, N>) -> Self {
        Self::Props(props)
    }
}

/// Errors raised while registering slot overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotError {
    /// The component does not declare a slot with this name.
    UndeclaredSlot {
        /// Name that was used.
        slot: String,
    },
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndeclaredSlot { slot } => {
                write!(f, "slot `{slot}` is not declared by this component")
            }
        }
    }
}

impl core::error::Error for SlotError {}

/// Consumer overrides for the slots of one component.
pub struct SlotOverrides<E, N> {
    declared: HashSet<&'static str>,
    components: HashMap<&'static str, ElementType>,
    slot_props: HashMap<&'static str, SlotPropsSource<E, N>>,
}

impl<E, N> SlotOverrides<E, N> {
    /// Overrides for a component declaring `slots`.
    pub fn new(slots: &[&'static str]) -> Self {
        Self {
            declared: slots.iter().copied().collect(),
            components: HashMap::new(),
            slot_props: HashMap::new(),
        }
    }

    /// Whether `slot` is declared.
    pub fn is_declared(&self, slot: &str) -> bool {
        self.declared.contains(slot)
    }

    /// Declared slot names, in no particular order.
    pub fn declared(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.declared.iter().copied()
    }

    fn declared_key(&self, slot: &str) -> Result<&'static str, SlotError> {
        self.declared
            .get(slot)
            .copied()
            .ok_or_else(|| SlotError::UndeclaredSlot { slot: slot.into() })
    }

    /// Render `slot` with `element` instead of the component's default.
    pub fn set_component(&mut self, slot: &str, element: ElementType) -> Result<(), SlotError> {
        let key = self.declared_key(slot)?;
        self.components.insert(key, element);
        Ok(())
    }

    /// Attach consumer props to `slot`.
    pub fn set_slot_props(
        &mut self,
        slot: &str,
        props: impl Into<SlotPropsSource<E, N>>,
    ) -> Result<(), SlotError> {
        let key = self.declared_key(slot)?;
        self.slot_props.insert(key, props.into());
        Ok(())
    }

    /// Builder form of [`SlotOverrides::set_component`].
    pub fn with_component(mut self, slot: &str, element: ElementType) -> Result<Self, SlotError> {
        self.set_component(slot, element)?;
        Ok(self)
    }

    /// Builder form of [`SlotOverrides::set_slot_props`].
    pub fn with_slot_props(
        mut self,
        slot: &str,
        props: impl Into<SlotPropsSource<E, N>>,
    ) -> Result<Self, SlotError> {
        self.set_slot_props(slot, props)?;
        Ok(self)
    }

    /// Element to render for `slot`.
    ///
    /// The owner's `component` prop wins, then a per-slot override, then `default`.
    pub fn element_type(
        &self,
        slot: &str,
        component: Option<&ElementType>,
        default: ElementType,
    ) -> ElementType {
        component
            .or_else(|| self.components.get(slot))
            .cloned()
            .unwrap_or(default)
    }

    /// Consumer props registered for `slot`.
    pub fn slot_props(&self, slot: &str) -> Option<&SlotPropsSource<E, N>> {
        self.slot_props.get(slot)
    }
}

impl<E, N> Default for SlotOverrides<E, N> {
    /// Overrides for a component with a single `root` slot.
    fn default() -> Self {
        Self::new(&["root"])
    }
}

impl<E, N> Clone for SlotOverrides<E, N> {
    fn clone(&self) -> Self {
        Self {
            declared: self.declared.clone(),
            components: self.components.clone(),
            slot_props: self.slot_props.clone(),
        }
    }
}

impl<E, N> fmt::Debug for SlotOverrides<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotOverrides")
            .field("declared", &self.declared)
            .field("components", &self.components)
            .field("slot_props", &self.slot_props)
            .finish()
    }
}
