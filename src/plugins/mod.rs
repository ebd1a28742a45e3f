pub mod nav;

pub use nav::*;
