//! CPU raster drawing surfaces.

pub(crate) mod surface;
