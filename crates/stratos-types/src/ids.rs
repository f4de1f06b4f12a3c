//! Type-safe identifier wrappers around authored string keys.
//!
//! Every entity in the game is addressed by a human-authored string id
//! (`zone-vertical-farm`, `super_grain`, `plot_0_1`, ...). Wrapping each
//! kind in its own newtype prevents accidentally passing a plot id where a
//! zone id is expected. On the wire (JSON, YAML, TypeScript) every id is a
//! plain string.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub const fn as_str(&self) -> &str {
                self.0.as_str()
            }

            /// Whether the identifier is empty (never valid for a stored entity).
            pub const fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Identifier of a zone (a distinct area of the city).
    ZoneId
}

define_id! {
    /// Identifier of an item kind. At most one stack per id in an inventory.
    ItemId
}

define_id! {
    /// Identifier of a farm plot in the vertical farm.
    PlotId
}

define_id! {
    /// Identifier of a dialogue node.
    DialogueId
}

define_id! {
    /// Name of a faction whose standing is tracked per player.
    FactionId
}

define_id! {
    /// Identifier of a placement slot inside the player's pod.
    SlotId
}

define_id! {
    /// Identifier of a gatherable resource node.
    NodeId
}

define_id! {
    /// Identifier of a quest definition.
    QuestId
}
