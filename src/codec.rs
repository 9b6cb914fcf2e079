//! Binary frame-data format.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! header : width u32 | height u32 | fps u32 | frame_count u32
//! frame  : rect_count u32 | rect_count * (x u16, y u16, w u16, h u16)
//!          run_count u32  | run_count  * (y u16, x u16, len u16)
//! ```
//!
//! There is no version tag, checksum, or per-field validation.

pub(crate) mod decode;
pub(crate) mod model;
