mod controls;
mod panels;
pub(super) mod tooltip;
