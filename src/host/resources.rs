use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::foundation::error::{PanecastError, PanecastResult};

/// Fixed identifiers of the bundled resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// Encoded frame data.
    Video,
    /// Background audio track.
    Audio,
}

impl ResourceId {
    /// Numeric resource id used by application bundles.
    pub const fn code(self) -> u16 {
        match self {
            Self::Video => 102,
            Self::Audio => 103,
        }
    }

    /// File name used when resources are laid out in a directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Video => "video.bin",
            Self::Audio => "bgm.wav",
        }
    }
}

/// Supplies raw resource bytes, loaded once at startup.
pub trait ResourceProvider {
    fn load(&self, id: ResourceId) -> PanecastResult<Vec<u8>>;
}

fn read_resource(id: ResourceId, path: &Path) -> PanecastResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        PanecastError::resource(format!(
            "resource {} ({:?}) at '{}': {e}",
            id.code(),
            id,
            path.display()
        ))
    })
}

/// Resources stored as `video.bin` / `bgm.wav` under one directory.
#[derive(Clone, Debug)]
pub struct DirResources {
    root: PathBuf,
}

impl DirResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, id: ResourceId) -> PathBuf {
        self.root.join(id.file_name())
    }
}

impl ResourceProvider for DirResources {
    fn load(&self, id: ResourceId) -> PanecastResult<Vec<u8>> {
        read_resource(id, &self.path_of(id))
    }
}

/// Resources at explicit paths. The audio track is optional.
#[derive(Clone, Debug)]
pub struct FileResources {
    pub video: PathBuf,
    pub audio: Option<PathBuf>,
}

impl ResourceProvider for FileResources {
    fn load(&self, id: ResourceId) -> PanecastResult<Vec<u8>> {
        match id {
            ResourceId::Video => read_resource(id, &self.video),
            ResourceId::Audio => match &self.audio {
                Some(path) => read_resource(id, path),
                None => Err(PanecastError::resource("no audio track configured")),
            },
        }
    }
}

/// Resources held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryResources {
    blobs: HashMap<ResourceId, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: ResourceId, bytes: Vec<u8>) -> Self {
        self.blobs.insert(id, bytes);
        self
    }
}

impl ResourceProvider for MemoryResources {
    fn load(&self, id: ResourceId) -> PanecastResult<Vec<u8>> {
        self.blobs
            .get(&id)
            .cloned()
            .ok_or_else(|| PanecastError::resource(format!("resource {} not found", id.code())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/resources.rs"]
mod tests;
