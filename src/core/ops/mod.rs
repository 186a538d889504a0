pub(crate) mod dispatch;
pub(crate) mod elem_ops;
pub(crate) mod matmul;
pub(crate) mod reduce_ops;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this many output elements the parallel paths stay sequential.
#[cfg(feature = "parallel")]
const MIN_PARALLEL_LEN: usize = 1 << 15;

// --- Parallel-for over disjoint outputs ---

/// Calls `f(i, &mut out[i])` for every `i`, in increasing order when sequential.
pub(crate) fn for_each_mut<F>(out: &mut [f32], f: F)
where
    F: Fn(usize, &mut f32) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if out.len() >= MIN_PARALLEL_LEN {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(i, elem)| f(i, elem));
            return;
        }
    }

    out.iter_mut().enumerate().for_each(|(i, elem)| f(i, elem));
}

/// Calls `f(c, chunk)` for every `chunk`-sized piece of `out`. A chunk is never
/// split between tasks.
pub(crate) fn for_each_chunk_mut<F>(out: &mut [f32], chunk: usize, f: F)
where
    F: Fn(usize, &mut [f32]) + Sync + Send,
{
    if chunk == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    {
        if out.len() >= MIN_PARALLEL_LEN {
            out.par_chunks_mut(chunk)
                .enumerate()
                .for_each(|(c, piece)| f(c, piece));
            return;
        }
    }

    out.chunks_mut(chunk)
        .enumerate()
        .for_each(|(c, piece)| f(c, piece));
}
