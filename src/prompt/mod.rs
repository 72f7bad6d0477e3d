pub(crate) mod composer;
pub(crate) mod tables;
