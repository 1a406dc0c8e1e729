pub(crate) mod smooth;
pub(crate) mod ticker;
