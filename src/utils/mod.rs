//! Small helpers shared across the engine

pub mod string;
