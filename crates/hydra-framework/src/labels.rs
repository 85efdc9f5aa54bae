//! # Labelled Enumerations
//!
//! Enumerated input fields (a widget colour, an order status, ...) are advertised to the
//! client as a list of [`Choice`]s. The [`Labeled`] trait is the static table behind
//! that list: the variants in declaration order, their raw names, and optional
//! human-facing labels.
//!
//! The [`labeled!`](crate::labeled) macro declares an enum together with its table:
//!
//! ```
//! use hydra_framework::labeled;
//! use hydra_framework::labels::{choices, Labeled};
//!
//! labeled! {
//!     pub enum Priority {
//!         Low => "Can wait",
//!         Normal,
//!         High => "Urgent",
//!     }
//! }
//!
//! assert_eq!(Priority::Normal.display_label(), "Normal");
//! assert_eq!(Priority::from_name("high"), Some(Priority::High));
//!
//! let choices = choices::<Priority>();
//! assert_eq!(choices[0].value, "0");
//! assert_eq!(choices[0].label, "Can wait");
//! ```

use crate::property::Choice;

/// An enumerated type with a fixed, ordered table of variants and display labels.
pub trait Labeled: Copy + PartialEq + 'static {
    /// All variants in declaration order.
    const VARIANTS: &'static [Self];

    /// The raw variant name.
    fn name(&self) -> &'static str;

    /// The registered display label, if any.
    fn label(&self) -> Option<&'static str> {
        None
    }

    /// The display label, falling back to the raw name.
    fn display_label(&self) -> &'static str {
        self.label().unwrap_or_else(|| self.name())
    }

    /// Zero-based position in [`Labeled::VARIANTS`].
    fn token(&self) -> usize {
        Self::VARIANTS
            .iter()
            .position(|v| v == self)
            .unwrap_or_default()
    }

    /// Case-insensitive lookup by raw name.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }

    /// Lookup by the token a client echoes back from a [`Choice`].
    fn from_token(token: &str) -> Option<Self> {
        let index: usize = token.trim().parse().ok()?;
        Self::VARIANTS.get(index).copied()
    }
}

/// Builds one [`Choice`] per variant: token = position, label = display label.
///
/// No de-duplication is done; two variants sharing a label both appear.
pub fn choices<T: Labeled>() -> Vec<Choice> {
    T::VARIANTS
        .iter()
        .enumerate()
        .map(|(i, v)| Choice::new(i.to_string(), v.display_label()))
        .collect()
}

/// Declares an enum and implements [`Labeled`] for it.
///
/// Each variant may carry a label with `Variant => "Label"`. The generated enum derives
/// `Debug`, `Clone`, `Copy`, `PartialEq` and `Eq`.
#[macro_export]
macro_rules! labeled {
    (@label $label:literal) => {
        ::core::option::Option::Some($label)
    };
    (@label) => {
        ::core::option::Option::None
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident $(=> $label:literal)?),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),*
        }

        impl $crate::labels::Labeled for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),*];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn label(&self) -> ::core::option::Option<&'static str> {
                match self {
                    $(Self::$variant => $crate::labeled!(@label $($label)?)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::labeled! {
        enum Size {
            Small => "S",
            Medium,
            Large => "S",
        }
    }

    #[test]
    fn test_choices_follow_declaration_order() {
        let choices = choices::<Size>();
        let tokens: Vec<&str> = choices.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(tokens, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_duplicate_labels_are_preserved() {
        let labels: Vec<String> = choices::<Size>().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["S", "Medium", "S"]);
    }

    #[test]
    fn test_lookup_by_name_and_token() {
        assert_eq!(Size::from_name("MEDIUM"), Some(Size::Medium));
        assert_eq!(Size::from_name("huge"), None);
        assert_eq!(Size::from_token("2"), Some(Size::Large));
        assert_eq!(Size::from_token("3"), None);
        assert_eq!(Size::from_token("x"), None);
        assert_eq!(Size::Large.token(), 2);
    }
}
