/*!
```console
       _ _                      _
  __ _| (_) __ _ _ __   ___  __| |
 / _` | | |/ _` | '_ \ / _ \/ _` |
| (_| | | | (_| | | | |  __/ (_| |
 \__,_|_|_|\__, |_| |_|\___|\__,_|
           |___/   kernels
```

Aligned `f32` compute kernels for N-dimensional arrays.
*/

mod core;

pub use crate::core::buffer::{AlignedBuffer, ALIGNMENT, ELEM_SIZE};
pub use crate::core::errors::{KernelError, ShapeError};
pub use crate::core::iters::{Extent, Strider};
pub use crate::core::ops::dispatch::{ewise_or_scalar, Operand};
pub use crate::core::ops::elem_ops::*;
pub use crate::core::ops::matmul::{
    aligned_dot, matmul, matmul_tiled, matmul_tiled_packed, matmul_tiled_with, pack_tiles,
    unpack_tiles, zero_tiles, TilePolicy, TILE,
};
pub use crate::core::ops::reduce_ops::{reduce, reduce_max, reduce_sum, ReduceOp};
pub use crate::core::strided::{compact, ewise_setitem, scalar_setitem, to_strided_vec};

pub type Res<U> = Result<U, KernelError>;
