use aligned_kernels::{matmul, matmul_tiled, AlignedBuffer};
use anyhow::Result;

fn main() -> Result<()> {
    let size = 256;
    let a = AlignedBuffer::arange(size * size)?;
    let b = AlignedBuffer::arange(size * size)?;
    let mut out = AlignedBuffer::zeros(size * size)?;
    let dim = size as u32;

    for _ in 0..5 {
        let now = std::time::Instant::now();
        matmul(&a, &b, &mut out, dim, dim, dim)?;
        let naive = now.elapsed();

        let now = std::time::Instant::now();
        matmul_tiled(&a, &b, &mut out, dim, dim, dim)?;
        let tiled = now.elapsed();

        println!("naive {:?}  tiled {:?}", naive, tiled);
    }

    Ok(())
}
