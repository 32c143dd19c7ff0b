pub(crate) mod group;
pub(crate) mod sand;
pub(crate) mod simulator;
