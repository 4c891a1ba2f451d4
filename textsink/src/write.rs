//! Utilities for emitting scalars through an [`AdaptiveWriter`][crate::AdaptiveWriter].
pub mod text;
