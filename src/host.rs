pub(crate) mod audio;
pub(crate) mod events;
pub(crate) mod headless;
pub(crate) mod resources;
