use crate::core::{errors::KernelError, iters::Extent};

pub(crate) fn ensure_len(
    op: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), KernelError> {
    if expected == actual {
        Ok(())
    } else {
        Err(KernelError::size_mismatch(op, expected, actual))
    }
}

/// Element count of `shape`, or `None` when it does not fit in a `usize`.
/// A zero extent anywhere gives 0 whatever the other extents are.
pub(crate) fn checked_numel(shape: &[Extent]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }

    shape
        .iter()
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent as usize))
}

pub(crate) fn ceil_div(value: usize, divisor: usize) -> usize {
    (value + divisor - 1) / divisor
}
