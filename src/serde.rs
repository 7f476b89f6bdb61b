//! Serde extensions

pub mod color_spec;
