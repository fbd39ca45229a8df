/// Grid-to-canvas projection.
pub mod projection;
