//! Utility modules.

pub mod slug;
