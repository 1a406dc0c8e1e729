pub(crate) mod layout;
pub(crate) mod scroll_timeline;
pub(crate) mod style;
pub(crate) mod trigger;
