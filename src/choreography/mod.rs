pub(crate) mod background;
pub(crate) mod context;
pub(crate) mod script;
