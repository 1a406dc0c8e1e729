pub mod ids;
pub(crate) mod registry;
