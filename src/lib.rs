#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Indexed shape processing: edge-based subdivision and element-weighted
//! surface sampling.
//!
//! A shape is a set of points, lines or triangles over a shared vertex
//! buffer with optional per-vertex attributes. The [`geom`] module can
//!
//! - split every edge once and grow the attributes to match
//!   ([`geom::tessellate_shape`]);
//! - build a length/area-weighted CDF over the elements
//!   ([`geom::ShapeDistribution`]) and invert it with caller-supplied
//!   uniform draws;
//! - interpolate any attribute at the sampled location
//!   ([`geom::interpolate_vert`]).
//!
//! The library logs through the `log` facade and never installs a logger.

pub mod geom;
