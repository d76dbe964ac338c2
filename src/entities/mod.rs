//! Document model: generic node tree, animation document, frame discovery.

pub mod document;
pub mod frames;
pub mod node;

pub use document::{Document, MaterialInfo, Property};
pub use frames::Extraction;
pub use node::{Node, NodeMap, NodePath, PathSeg, Scalar};
