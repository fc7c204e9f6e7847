pub(crate) mod drag;
pub(crate) mod handles;
pub(crate) mod session;
pub(crate) mod shape;
