pub(crate) mod host;
pub(crate) mod session;
pub(crate) mod simulated;
pub(crate) mod source;
