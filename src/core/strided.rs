//! Gather and scatter between compact buffers and strided views.
//!
//! A view is `(shape, strides, offset)` over a backing buffer: the element at
//! multi-index `idx` lives at `offset + Σ idx[d] * strides[d]`. All three
//! functions walk the view with [`Strider`], so the `i`-th compact element
//! always pairs with the `i`-th odometer position.

use crate::{
    core::{
        errors::KernelError,
        iters::{Extent, Strider},
        utils::{checked_numel, ensure_len},
    },
    AlignedBuffer, Res,
};

// An element count that overflows `usize` is reported as `usize::MAX`.
fn ensure_numel(op: &'static str, shape: &[Extent], size: usize) -> Res<()> {
    let count = checked_numel(shape).unwrap_or(usize::MAX);
    ensure_len(op, size, count)
}

fn out_of_range(index: usize, size: usize) -> KernelError {
    KernelError::IndexOutOfRange { index, size }
}

/// Gathers the view of `src` into the compact buffer `dst`.
pub fn compact(
    src: &AlignedBuffer,
    dst: &mut AlignedBuffer,
    shape: &[Extent],
    strides: &[Extent],
    offset: Extent,
) -> Res<()> {
    ensure_numel("compact", shape, dst.size())?;
    tracing::trace!(?shape, ?strides, offset, "compact");

    let src = src.as_slice();
    let strider = Strider::new(shape, strides, offset)?;

    for (elem, index) in dst.as_mut_slice().iter_mut().zip(strider) {
        *elem = *src.get(index).ok_or(out_of_range(index, src.len()))?;
    }

    Ok(())
}

/// Scatters the compact buffer `src` into the view of `dst`.
pub fn ewise_setitem(
    src: &AlignedBuffer,
    dst: &mut AlignedBuffer,
    shape: &[Extent],
    strides: &[Extent],
    offset: Extent,
) -> Res<()> {
    ensure_numel("ewise_setitem", shape, src.size())?;
    tracing::trace!(?shape, ?strides, offset, "ewise_setitem");

    let size = dst.size();
    let dst = dst.as_mut_slice();
    let strider = Strider::new(shape, strides, offset)?;

    for (&elem, index) in src.as_slice().iter().zip(strider) {
        *dst.get_mut(index).ok_or(out_of_range(index, size))? = elem;
    }

    Ok(())
}

/// Writes `value` at each of the `count` positions of the view of `dst`.
pub fn scalar_setitem(
    count: usize,
    value: f32,
    dst: &mut AlignedBuffer,
    shape: &[Extent],
    strides: &[Extent],
    offset: Extent,
) -> Res<()> {
    ensure_numel("scalar_setitem", shape, count)?;
    tracing::trace!(?shape, ?strides, offset, count, "scalar_setitem");

    let size = dst.size();
    let dst = dst.as_mut_slice();

    for index in Strider::new(shape, strides, offset)? {
        *dst.get_mut(index).ok_or(out_of_range(index, size))? = value;
    }

    Ok(())
}

/// Gathers the view of `src` into a fresh host vector.
pub fn to_strided_vec(
    src: &AlignedBuffer,
    shape: &[Extent],
    strides: &[Extent],
    offset: Extent,
) -> Res<Vec<f32>> {
    let src = src.as_slice();

    Strider::new(shape, strides, offset)?
        .map(|index| src.get(index).copied().ok_or(out_of_range(index, src.len())))
        .collect()
}
