pub(crate) mod layout;
pub(crate) mod page;
pub(crate) mod reveal;
