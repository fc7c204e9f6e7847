pub(crate) mod blit;
pub(crate) mod clip;
pub(crate) mod composite;
