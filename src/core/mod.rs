pub(crate) mod buffer;
mod display;
pub(crate) mod errors;
pub(crate) mod iters;
pub(crate) mod ops;
pub(crate) mod strided;
mod utils;
