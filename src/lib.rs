//! # libdae
//!
//! A pure Rust writer for COLLADA (`.dae`) documents.
//!
//! This library serializes an in-memory triangle mesh, given as a vertex
//! position matrix and a triangle index matrix, into a COLLADA 1.4.1 XML
//! document: the standardized scene-graph interchange format consumed by
//! 3D modeling tools.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Single-mesh, single-scene-node COLLADA layout
//! - Lossless numeric serialization: coordinates and indices round-trip
//!   bit-for-bit through the emitted text
//! - Accepts any `nalgebra` matrix shape and scalar width
//!
//! ## Example
//!
//! ```no_run
//! use libdae::write_dae;
//! use nalgebra::DMatrix;
//!
//! let v = DMatrix::from_row_slice(3, 3, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.5, 1.0, 0.0]);
//! let f = DMatrix::from_row_slice(1, 3, &[0u32, 1, 2]);
//!
//! assert!(write_dae("triangle.dae", &v, &f));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod element;
pub mod error;
mod writer;

pub use element::{Element, ele};
pub use error::{Error, Result};
pub use writer::{COLLADA_NS, write_collada_xml, write_dae};
