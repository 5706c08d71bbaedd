//! Hydronet Core Types and Definitions
//!
//! This crate provides the foundational types shared by the hydronet parser,
//! graph builder and projector:
//!
//! - **Identifiers**: numeric node identifiers ([`identifier::NodeId`])
//! - **Semantic model**: elements, nodes and connections ([`semantic`] module)
//! - **Colors**: 8-bit sRGB colors with CSS parsing ([`color::Color`])
//! - **Palette**: the fixed type colors and group colors ([`palette`] module)
//! - **Geometry**: layout and scene points ([`geometry`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod palette;
pub mod semantic;
