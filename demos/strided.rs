use aligned_kernels::{compact, ewise_setitem, scalar_setitem, AlignedBuffer};
use anyhow::Result;

fn main() -> Result<()> {
    // 3 x 4 matrix.
    let a = AlignedBuffer::arange(12)?;
    println!("{}", a.to_table(3, 4)?);

    // Transpose.
    let mut t = AlignedBuffer::zeros(12)?;
    compact(&a, &mut t, &[4, 3], &[1, 4], 0)?;
    println!("{}", t.to_table(4, 3)?);

    // Column 1 <- 100, 101, 102.
    let column = AlignedBuffer::from_slice(&[100.0, 101.0, 102.0])?;
    let mut b = a.try_clone()?;
    ewise_setitem(&column, &mut b, &[3], &[4], 1)?;

    // Last row <- -1.
    scalar_setitem(4, -1.0, &mut b, &[4], &[1], 8)?;
    println!("{}", b.to_table(3, 4)?);

    Ok(())
}
