// Utility module

pub mod visualization;

pub use visualization::*;
