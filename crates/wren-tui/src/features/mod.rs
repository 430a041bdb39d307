//! Feature slices for the TUI (state/update/render per slice).

pub mod feed;
pub mod layout;
pub mod nav;
