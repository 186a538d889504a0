use crate::core::{
    errors::KernelError,
    iters::Extent,
    utils::{checked_numel, ensure_len},
};

/// Odometer over a strided view, yielding physical offsets.
///
/// Indices are visited in row-major order: the last dimension moves fastest
/// and carries into the one before it when it wraps. Every one of
/// `product(shape)` combinations is visited exactly once. A zero extent in any
/// dimension yields nothing, and an empty shape yields the single offset.
///
/// An offset too large for a `usize` is yielded as `usize::MAX`, which lies
/// outside every buffer, so callers report it as out of range.
pub struct Strider<'a> {
    shape: &'a [Extent],
    strides: &'a [Extent],
    offset: usize,
    indices: Vec<usize>,
    position: Option<usize>,
    current: usize,
    maximum: usize,
}

impl<'a> Strider<'a> {
    pub fn new(
        shape: &'a [Extent],
        strides: &'a [Extent],
        offset: Extent,
    ) -> Result<Self, KernelError> {
        ensure_len("strides", shape.len(), strides.len())?;

        let maximum = checked_numel(shape)
            .ok_or(KernelError::size_mismatch("shape", usize::MAX, usize::MAX))?;

        Ok(Strider {
            shape,
            strides,
            offset: offset as usize,
            indices: vec![0; shape.len()],
            position: Some(offset as usize),
            current: 0,
            maximum,
        })
    }

    /// Number of offsets still to come.
    pub fn remaining(&self) -> usize {
        self.maximum - self.current
    }

    // offset + Σ indices[d] * strides[d]
    fn locate(&self) -> Option<usize> {
        self.indices
            .iter()
            .zip(self.strides)
            .try_fold(self.offset, |acc, (&index, &stride)| {
                index.checked_mul(stride as usize)?.checked_add(acc)
            })
    }

    fn advance(&mut self) {
        let Some(last) = self.shape.len().checked_sub(1) else {
            return;
        };

        for d in (0..=last).rev() {
            self.indices[d] += 1;

            if self.indices[d] < self.shape[d] as usize {
                self.position = if d == last {
                    let stride = self.strides[d] as usize;
                    self.position.and_then(|position| position.checked_add(stride))
                } else {
                    self.locate()
                };
                return;
            }

            self.indices[d] = 0;
        }
    }
}

impl<'a> Iterator for Strider<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.maximum {
            return None;
        }

        let next = self.position.unwrap_or(usize::MAX);
        self.current += 1;

        if self.current < self.maximum {
            self.advance();
        }

        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Strider<'a> {}
