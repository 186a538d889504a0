use thiserror::Error;

// --- Kernel ---

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("Cannot allocate {size} elements aligned to {align} bytes.")]
    Allocation { size: usize, align: usize },

    #[error("Index {index} is out of range for buffer of size {size}.")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Size mismatch in `{op}`: expected {expected}, got {actual}.")]
    SizeMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Missing `{operand}` operand for `{op}`.")]
    NullInput {
        op: &'static str,
        operand: &'static str,
    },
}

// --- Matmul ---

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Operand `{operand}` has {actual} elements, but [{rows} x {cols}] needs {expected}.")]
    OperandSize {
        operand: &'static str,
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Dimension `{dimension}` ({size}) is not a multiple of the tile size {tile}.")]
    NotTileMultiple {
        dimension: &'static str,
        size: usize,
        tile: usize,
    },

    #[error("Tiled buffer has {actual} elements, but [{rows} x {cols}] in tiles needs {expected}.")]
    TiledSize {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
}

impl KernelError {
    pub(crate) fn size_mismatch(op: &'static str, expected: usize, actual: usize) -> KernelError {
        KernelError::SizeMismatch {
            op,
            expected,
            actual,
        }
    }
}
