//! Theme textures: decoding, scaling and per-slot storage.

pub(crate) mod decode;
/// Theme asset slots and the loaded texture store.
pub mod store;
