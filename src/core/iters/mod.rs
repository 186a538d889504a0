mod strider;

pub use strider::Strider;

/// Integer type of every shape extent, stride and offset handed to the kernels.
pub type Extent = u32;
