//! Seed-marker illustrations assembled into an animated GIF.

/// Replication, shuffling, cropping and GIF output.
pub mod animation;
/// Bounds-checked pixel canvas and marker rings.
pub mod marker;
/// Seed list loading and generation.
pub mod seeds;
