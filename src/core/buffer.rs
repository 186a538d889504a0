use crate::core::{errors::KernelError, ops::matmul::TILE, utils::ensure_len};
use num_traits::AsPrimitive;
use std::{
    alloc::{self, Layout},
    mem::size_of,
    ptr::NonNull,
    slice,
};

/// Alignment in bytes of every buffer's first element.
pub const ALIGNMENT: usize = 256;

pub const ELEM_SIZE: usize = size_of::<f32>();

const _: () = assert!(ALIGNMENT >= TILE * ELEM_SIZE);
const _: () = assert!(ALIGNMENT.is_power_of_two());

/// A fixed-size block of `f32`, owned exclusively and aligned to [`ALIGNMENT`].
///
/// The size never changes after construction. The block is released when the
/// buffer is dropped. There is no `Clone`: use [`AlignedBuffer::try_clone`] to
/// allocate a second block and copy the contents into it.
pub struct AlignedBuffer {
    ptr: NonNull<f32>,
    size: usize,
}

// Safety: the buffer owns its block and has no interior mutability.
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

impl AlignedBuffer {
    fn layout(size: usize) -> Result<Layout, KernelError> {
        let bytes = size.checked_mul(ELEM_SIZE).ok_or(KernelError::Allocation {
            size,
            align: ALIGNMENT,
        })?;

        Layout::from_size_align(bytes, ALIGNMENT).map_err(|_| KernelError::Allocation {
            size,
            align: ALIGNMENT,
        })
    }

    /// Allocates `size` zeroed elements.
    pub fn new(size: usize) -> Result<AlignedBuffer, KernelError> {
        let layout = AlignedBuffer::layout(size)?;

        let ptr = if layout.size() == 0 {
            // Dangling, but aligned.
            NonNull::new(ALIGNMENT as *mut f32).ok_or(KernelError::Allocation {
                size,
                align: ALIGNMENT,
            })?
        } else {
            // Safety: the layout has a non-zero size.
            let raw = unsafe { alloc::alloc_zeroed(layout) };
            NonNull::new(raw.cast::<f32>()).ok_or(KernelError::Allocation {
                size,
                align: ALIGNMENT,
            })?
        };

        tracing::debug!(size, align = ALIGNMENT, "allocated aligned buffer");
        Ok(AlignedBuffer { ptr, size })
    }

    pub fn zeros(size: usize) -> Result<AlignedBuffer, KernelError> {
        AlignedBuffer::new(size)
    }

    pub fn full(size: usize, value: f32) -> Result<AlignedBuffer, KernelError> {
        let mut buffer = AlignedBuffer::new(size)?;
        buffer.fill(value);
        Ok(buffer)
    }

    pub fn from_slice(data: &[f32]) -> Result<AlignedBuffer, KernelError> {
        let mut buffer = AlignedBuffer::new(data.len())?;
        buffer.as_mut_slice().copy_from_slice(data);
        Ok(buffer)
    }

    /// `[0, 1, ..., size - 1]`.
    pub fn arange(size: usize) -> Result<AlignedBuffer, KernelError> {
        let mut buffer = AlignedBuffer::new(size)?;
        for (i, elem) in buffer.as_mut_slice().iter_mut().enumerate() {
            *elem = i.as_();
        }
        Ok(buffer)
    }

    /// Allocates a new block and copies this buffer's contents into it.
    pub fn try_clone(&self) -> Result<AlignedBuffer, KernelError> {
        AlignedBuffer::from_slice(self.as_slice())
    }

    // --- Attributes ---

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Start address of the block.
    pub fn address(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    // --- Elements ---

    pub fn get(&self, index: usize) -> Result<f32, KernelError> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(KernelError::IndexOutOfRange {
                index,
                size: self.size,
            })
    }

    pub fn set(&mut self, index: usize, value: f32) -> Result<(), KernelError> {
        let size = self.size;
        let elem = self
            .as_mut_slice()
            .get_mut(index)
            .ok_or(KernelError::IndexOutOfRange { index, size })?;

        *elem = value;
        Ok(())
    }

    pub fn fill(&mut self, value: f32) {
        self.as_mut_slice().fill(value);
    }

    pub fn copy_from(&mut self, src: &AlignedBuffer) -> Result<(), KernelError> {
        ensure_len("copy_from", self.size, src.size)?;
        self.as_mut_slice().copy_from_slice(src.as_slice());
        Ok(())
    }

    pub fn as_slice(&self) -> &[f32] {
        // Safety: `ptr` is valid for `size` initialised elements (or dangling with size 0).
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        // Safety: as above, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.as_slice().to_vec()
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if let Ok(layout) = AlignedBuffer::layout(self.size) {
            if layout.size() > 0 {
                // Safety: allocated in `new` with this exact layout.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) }
            }
        }
    }
}

impl PartialEq for AlignedBuffer {
    fn eq(&self, rhs: &AlignedBuffer) -> bool {
        self.as_slice() == rhs.as_slice()
    }
}
