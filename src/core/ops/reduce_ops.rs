use crate::{
    core::{errors::KernelError, ops::for_each_mut},
    AlignedBuffer, Res,
};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ReduceOp {
    Sum,
    /// NaN is skipped unless the whole group is NaN.
    Max,
}

impl ReduceOp {
    fn fold(self, group: &[f32]) -> f32 {
        match self {
            ReduceOp::Sum => group.iter().sum(),
            ReduceOp::Max => group.iter().copied().fold(f32::NAN, f32::max),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ReduceOp::Sum => "reduce_sum",
            ReduceOp::Max => "reduce_max",
        }
    }
}

/// Reduces consecutive groups of `group_size` elements of `src`, one per slot of
/// `out`. Requires `src.size() == out.size() * group_size`.
pub fn reduce(
    op: ReduceOp,
    src: &AlignedBuffer,
    out: &mut AlignedBuffer,
    group_size: usize,
) -> Res<()> {
    let expected = out
        .size()
        .checked_mul(group_size)
        .ok_or(KernelError::size_mismatch(op.name(), usize::MAX, src.size()))?;

    if group_size == 0 || expected != src.size() {
        return Err(KernelError::size_mismatch(op.name(), expected, src.size()));
    }

    tracing::trace!(op = op.name(), groups = out.size(), group_size, "reduce");

    let src = src.as_slice();
    for_each_mut(out.as_mut_slice(), |g, elem| {
        let start = g * group_size;
        *elem = op.fold(&src[start..start + group_size]);
    });

    Ok(())
}

pub fn reduce_sum(src: &AlignedBuffer, out: &mut AlignedBuffer, group_size: usize) -> Res<()> {
    reduce(ReduceOp::Sum, src, out, group_size)
}

pub fn reduce_max(src: &AlignedBuffer, out: &mut AlignedBuffer, group_size: usize) -> Res<()> {
    reduce(ReduceOp::Max, src, out, group_size)
}
