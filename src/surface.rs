pub(crate) mod host;
pub(crate) mod pool;
pub(crate) mod slot;
