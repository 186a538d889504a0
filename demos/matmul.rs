use aligned_kernels::{matmul, matmul_tiled, AlignedBuffer};
use anyhow::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let (m, n, p) = (4, 6, 3);
    let a = AlignedBuffer::arange(m * n)?;
    let b = AlignedBuffer::arange(n * p)?;
    println!("{}", a.to_table(m, n)?);
    println!("{}", b.to_table(n, p)?);

    let mut naive = AlignedBuffer::zeros(m * p)?;
    matmul(&a, &b, &mut naive, m as u32, n as u32, p as u32)?;
    println!("{}", naive.to_table(m, p)?);

    let mut tiled = AlignedBuffer::zeros(m * p)?;
    matmul_tiled(&a, &b, &mut tiled, m as u32, n as u32, p as u32)?;
    println!("{}", tiled);

    Ok(())
}
