// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-name joining.
//!
//! [`join_class_names`] flattens an ordered list of [`ClassValue`] sources into
//! one space-separated string. Falsy fragments (absent, empty, or toggled off)
//! are skipped. Duplicates are kept, so a later source can re-assert a class an
//! earlier one already set. When nothing survives the result is `None` and the
//! caller drops the `className` key instead of writing an empty string.
//!
//! ```rust
//! use understory_slot_props::class_names::{ClassValue, join_class_names};
//!
//! let toggles = [("disabled", true), ("active", false)];
//! let joined = join_class_names(&[
//!     ClassValue::Name("root"),
//!     ClassValue::Absent,
//!     ClassValue::Toggle(&toggles),
//!     ClassValue::from(Some("root")),
//! ]);
//! assert_eq!(joined.as_deref(), Some("root disabled root"));
//!
//! assert_eq!(join_class_names(&[ClassValue::Name(""), ClassValue::Absent]), None);
//! ```

use alloc::string::String;
use smallvec::SmallVec;

/// One class-name source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClassValue<'a> {
    /// Nothing; skipped.
    Absent,
    /// A class string. Empty strings are skipped; the string is otherwise
    /// copied verbatim, so it may itself contain several space-separated names.
    Name(&'a str),
    /// Names paired with an inclusion flag; only enabled names are kept.
    Toggle(&'a [(&'a str, bool)]),
    /// A nested list, flattened in order.
    List(&'a [ClassValue<'a>]),
}

impl<'a> ClassValue<'a> {
    /// `Name(name)` when `enabled`, otherwise `Absent`.
    pub fn when(name: &'a str, enabled: bool) -> Self {
        if enabled { Self::Name(name) } else { Self::Absent }
    }
}

impl<'a> From<&'a str> for ClassValue<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<Option<&'a str>> for ClassValue<'a> {
    fn from(name: Option<&'a str>) -> Self {
        name.map_or(Self::Absent, Self::Name)
    }
}

impl<'a> From<&'a [ClassValue<'a>]> for ClassValue<'a> {
    fn from(list: &'a [ClassValue<'a>]) -> Self {
        Self::List(list)
    }
}

fn collect<'a>(value: &ClassValue<'a>, out: &mut SmallVec<[&'a str; 8]>) {
    match *value {
        ClassValue::Absent => {}
        ClassValue::Name(name) => {
            if !name.is_empty() {
                out.push(name);
            }
        }
        ClassValue::Toggle(toggles) => {
            out.extend(
                toggles
                    .iter()
                    .filter(|(name, on)| *on && !name.is_empty())
                    .map(|(name, _)| *name),
            );
        }
        ClassValue::List(list) => {
            for v in list {
                collect(v, out);
            }
        }
    }
}

/// Join class-name sources in order, or `None` when the result is empty.
pub fn join_class_names(sources: &[ClassValue<'_>]) -> Option<String> {
    let mut fragments: SmallVec<[&str; 8]> = SmallVec::new();
    for source in sources {
        collect(source, &mut fragments);
    }
    if fragments.is_empty() {
        return None;
    }
    let mut joined = String::with_capacity(
        fragments.iter().map(|f| f.len()).sum::<usize>() + fragments.len() - 1,
    );
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            joined.push(' ');
        }
        joined.push_str(fragment);
    }
    Some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_call_order_and_duplicates() {
        let joined = join_class_names(&[
            ClassValue::Name("y"),
            ClassValue::Name("z"),
            ClassValue::Name("x"),
            ClassValue::Name("y"),
        ]);
        assert_eq!(joined.as_deref(), Some("y z x y"));
    }

    #[test]
    fn all_falsy_sources_yield_none() {
        let off = [("a", false)];
        assert_eq!(join_class_names(&[]), None);
        assert_eq!(
            join_class_names(&[
                ClassValue::Absent,
                ClassValue::Name(""),
                ClassValue::Toggle(&off),
                ClassValue::List(&[]),
            ]),
            None
        );
    }

    #[test]
    fn nested_lists_flatten_in_order() {
        let inner = [ClassValue::Name("b"), ClassValue::when("c", true)];
        let outer = [
            ClassValue::Name("a"),
            ClassValue::List(&inner),
            ClassValue::when("skipped", false),
        ];
        let joined = join_class_names(&[ClassValue::List(&outer), ClassValue::Name("d")]);
        assert_eq!(joined.as_deref(), Some("a b c d"));
    }

    #[test]
    fn multi_name_strings_are_kept_verbatim() {
        let joined = join_class_names(&[ClassValue::Name("a b"), ClassValue::Name("c")]);
        assert_eq!(joined.as_deref(), Some("a b c"));
    }
}
