use aligned_kernels::{reduce_sum, AlignedBuffer};
use anyhow::Result;

fn main() -> Result<()> {
    let a = AlignedBuffer::arange(24)?;
    println!("{}", a);
    println!("{}", a.to_table(4, 6)?);

    let mut sums = AlignedBuffer::zeros(4)?;
    reduce_sum(&a, &mut sums, 6)?;
    println!("{}", sums);

    let mut b = AlignedBuffer::zeros(3)?;
    b.fill(1.0);
    b.set(1, 2.5)?;
    println!("{:?}", b);

    Ok(())
}
