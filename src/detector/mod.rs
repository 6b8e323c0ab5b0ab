//! Ball detection stages
//!
//! Each stage works in working (possibly downscaled) coordinates:
//! - Connected components over classified colors (4-connected flood fill)
//! - White-seam reclassification around large colored clusters
//! - Boundary line search in the middle column band
//! - Blob sizing and multi-ball splitting
//! - Exclusion disks around accepted balls
//! - Middle/outside zone policy

/// Ball-sized cluster gating and splitting
pub mod blob;
/// Breadth-first flood fill producing same-color clusters
pub mod connected_components;
/// Exclusion bitmap around accepted balls
pub mod exclusion;
/// Conversion of white seams next to colored clusters
pub mod reclassify;
/// Boundary line search
pub mod white_lines;
/// Middle/outside zone assignment
pub mod zones;
