pub(crate) mod camera;
pub(crate) mod ease;
pub(crate) mod fade;
