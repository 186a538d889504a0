use crate::{
    core::{
        errors::KernelError,
        ops::elem_ops::{ewise, scalar, BinaryOp},
    },
    AlignedBuffer, Res,
};

/// Right-hand side of a binary operation.
#[derive(Copy, Clone, Debug)]
pub enum Operand<'a> {
    Buffer(&'a AlignedBuffer),
    Scalar(f32),
}

impl<'a> From<&'a AlignedBuffer> for Operand<'a> {
    fn from(buffer: &'a AlignedBuffer) -> Self {
        Operand::Buffer(buffer)
    }
}

impl From<f32> for Operand<'_> {
    fn from(value: f32) -> Self {
        Operand::Scalar(value)
    }
}

/// Runs the elementwise kernel for a buffer `rhs`, or the scalar kernel for a
/// scalar one. A missing operand fails with [`KernelError::NullInput`].
pub fn ewise_or_scalar(
    op: BinaryOp,
    lhs: Option<&AlignedBuffer>,
    rhs: Option<Operand<'_>>,
    out: &mut AlignedBuffer,
) -> Res<()> {
    let lhs = lhs.ok_or(KernelError::NullInput {
        op: op.name(),
        operand: "lhs",
    })?;

    match rhs {
        Some(Operand::Buffer(rhs)) => ewise(op, lhs, rhs, out),
        Some(Operand::Scalar(value)) => scalar(op, lhs, value, out),
        None => Err(KernelError::NullInput {
            op: op.name(),
            operand: "rhs",
        }),
    }
}
