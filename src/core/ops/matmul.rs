//! Matrix multiplication, `out[m x p] = a[m x n] @ b[n x p]`, all row-major.
//!
//! Two drivers share the contract: [`matmul`] is the plain triple loop, and
//! [`matmul_tiled`] repacks the operands into `TILE x TILE` blocks and runs the
//! [`aligned_dot`] micro-kernel over them. A tile holds `TILE * TILE` floats,
//! which is exactly [`ALIGNMENT`](crate::ALIGNMENT) bytes, so every tile of a
//! packed buffer starts on an aligned address.

use crate::{
    core::{
        errors::ShapeError,
        iters::Extent,
        ops::{for_each_chunk_mut, for_each_mut},
        utils::ceil_div,
    },
    AlignedBuffer, Res,
};

pub const TILE: usize = 8;

const TILE_LEN: usize = TILE * TILE;

/// What [`matmul_tiled_with`] does when a dimension is not a multiple of [`TILE`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TilePolicy {
    /// Zero-pad partial tiles.
    #[default]
    Pad,
    /// Fail with [`ShapeError::NotTileMultiple`].
    Strict,
}

fn check_operand(
    operand: &'static str,
    buffer: &AlignedBuffer,
    rows: usize,
    cols: usize,
) -> Res<()> {
    let actual = buffer.size();
    let expected = rows.checked_mul(cols).unwrap_or(usize::MAX);

    if expected == actual {
        Ok(())
    } else {
        Err(ShapeError::OperandSize {
            operand,
            rows,
            cols,
            expected,
            actual,
        }
        .into())
    }
}

fn check_tile_multiple(dimension: &'static str, size: usize) -> Res<()> {
    if size % TILE == 0 {
        Ok(())
    } else {
        Err(ShapeError::NotTileMultiple {
            dimension,
            size,
            tile: TILE,
        }
        .into())
    }
}

fn dims(m: Extent, n: Extent, p: Extent) -> (usize, usize, usize) {
    (m as usize, n as usize, p as usize)
}

// --- Naive ---

/// Triple loop. Each output row is zeroed before it is accumulated into.
pub fn matmul(
    a: &AlignedBuffer,
    b: &AlignedBuffer,
    out: &mut AlignedBuffer,
    m: Extent,
    n: Extent,
    p: Extent,
) -> Res<()> {
    let (m, n, p) = dims(m, n, p);
    check_operand("a", a, m, n)?;
    check_operand("b", b, n, p)?;
    check_operand("out", out, m, p)?;
    tracing::debug!(m, n, p, "naive matmul");

    let (a, b) = (a.as_slice(), b.as_slice());

    for_each_chunk_mut(out.as_mut_slice(), p, |i, row| {
        row.fill(0.0);

        for k in 0..n {
            let aik = a[i * n + k];
            let b_row = &b[k * p..(k + 1) * p];

            for (elem, &bkj) in row.iter_mut().zip(b_row) {
                *elem += aik * bkj;
            }
        }
    });

    Ok(())
}

// --- Micro-kernel ---

/// Adds the product of two `TILE x TILE` row-major blocks into `out`.
///
/// `out` is accumulated into, never overwritten.
#[inline]
pub fn aligned_dot(a: &[f32; TILE_LEN], b: &[f32; TILE_LEN], out: &mut [f32; TILE_LEN]) {
    dot_tile(a, b, out);
}

// Slice form of `aligned_dot`. Every slice must hold at least one tile.
#[inline]
fn dot_tile(a: &[f32], b: &[f32], out: &mut [f32]) {
    for i in 0..TILE {
        let out_row = &mut out[i * TILE..(i + 1) * TILE];

        for k in 0..TILE {
            let aik = a[i * TILE + k];
            let b_row = &b[k * TILE..(k + 1) * TILE];

            for j in 0..TILE {
                out_row[j] += aik * b_row[j];
            }
        }
    }
}

// --- Tile layout ---

/// Zeroes every tile of `out`. Must precede any [`aligned_dot`] pass.
pub fn zero_tiles(out: &mut AlignedBuffer) {
    for_each_mut(out.as_mut_slice(), |_, elem| *elem = 0.0);
}

fn tiled_len(rows: usize, cols: usize) -> usize {
    ceil_div(rows, TILE) * ceil_div(cols, TILE) * TILE_LEN
}

/// Repacks a row-major `[rows x cols]` buffer into tile-major order,
/// `[rows / TILE, cols / TILE, TILE, TILE]`, zero-padding partial tiles.
pub fn pack_tiles(src: &AlignedBuffer, rows: Extent, cols: Extent) -> Res<AlignedBuffer> {
    let (rows, cols) = (rows as usize, cols as usize);
    check_operand("src", src, rows, cols)?;

    let col_tiles = ceil_div(cols, TILE);
    let mut tiles = AlignedBuffer::new(tiled_len(rows, cols))?;
    let src = src.as_slice();

    for_each_chunk_mut(tiles.as_mut_slice(), TILE_LEN, |t, tile| {
        let (row_tile, col_tile) = (t / col_tiles, t % col_tiles);

        for r in 0..TILE {
            let row = row_tile * TILE + r;
            if row >= rows {
                break;
            }

            for c in 0..TILE {
                let col = col_tile * TILE + c;
                if col >= cols {
                    break;
                }
                tile[r * TILE + c] = src[row * cols + col];
            }
        }
    });

    Ok(tiles)
}

/// Inverse of [`pack_tiles`]: writes the `[rows x cols]` region of a tile-major
/// buffer into the row-major `out`, dropping any padding.
pub fn unpack_tiles(
    tiles: &AlignedBuffer,
    rows: Extent,
    cols: Extent,
    out: &mut AlignedBuffer,
) -> Res<()> {
    let (rows, cols) = (rows as usize, cols as usize);
    check_operand("out", out, rows, cols)?;

    let expected = tiled_len(rows, cols);
    if tiles.size() != expected {
        return Err(ShapeError::TiledSize {
            rows,
            cols,
            expected,
            actual: tiles.size(),
        }
        .into());
    }

    let col_tiles = ceil_div(cols, TILE);
    let tiles = tiles.as_slice();

    for_each_chunk_mut(out.as_mut_slice(), cols, |row, out_row| {
        let (row_tile, r) = (row / TILE, row % TILE);

        for (col, elem) in out_row.iter_mut().enumerate() {
            let (col_tile, c) = (col / TILE, col % TILE);
            let t = row_tile * col_tiles + col_tile;
            *elem = tiles[t * TILE_LEN + r * TILE + c];
        }
    });

    Ok(())
}

fn tile(tiles: &[f32], t: usize) -> &[f32] {
    &tiles[t * TILE_LEN..(t + 1) * TILE_LEN]
}

/// Zeroes `out`, then accumulates every `a[i, k] @ b[k, j]` tile product into
/// `out[i, j]`. Counts are in tiles.
fn tiled_kernel(
    a: &AlignedBuffer,
    b: &AlignedBuffer,
    out: &mut AlignedBuffer,
    row_tiles: usize,
    inner_tiles: usize,
    col_tiles: usize,
) {
    debug_assert_eq!(a.size(), row_tiles * inner_tiles * TILE_LEN);
    debug_assert_eq!(b.size(), inner_tiles * col_tiles * TILE_LEN);
    debug_assert_eq!(out.size(), row_tiles * col_tiles * TILE_LEN);

    zero_tiles(out);

    let (a, b) = (a.as_slice(), b.as_slice());

    for_each_chunk_mut(out.as_mut_slice(), TILE_LEN, |t, out_tile| {
        let (i, j) = (t / col_tiles, t % col_tiles);

        for k in 0..inner_tiles {
            dot_tile(
                tile(a, i * inner_tiles + k),
                tile(b, k * col_tiles + j),
                out_tile,
            );
        }
    });

    tracing::trace!(row_tiles, inner_tiles, col_tiles, "tiled kernel done");
}

/// Tiled matmul over operands already in tile-major order (see [`pack_tiles`]).
///
/// `m`, `n` and `p` count elements and must each be a multiple of [`TILE`].
/// `out` is zeroed first, so its prior contents never leak into the result.
pub fn matmul_tiled_packed(
    a: &AlignedBuffer,
    b: &AlignedBuffer,
    out: &mut AlignedBuffer,
    m: Extent,
    n: Extent,
    p: Extent,
) -> Res<()> {
    let (m, n, p) = dims(m, n, p);
    check_tile_multiple("m", m)?;
    check_tile_multiple("n", n)?;
    check_tile_multiple("p", p)?;
    check_operand("a", a, m, n)?;
    check_operand("b", b, n, p)?;
    check_operand("out", out, m, p)?;

    tiled_kernel(a, b, out, m / TILE, n / TILE, p / TILE);
    Ok(())
}

/// Tiled matmul over row-major operands, zero-padding partial tiles.
pub fn matmul_tiled(
    a: &AlignedBuffer,
    b: &AlignedBuffer,
    out: &mut AlignedBuffer,
    m: Extent,
    n: Extent,
    p: Extent,
) -> Res<()> {
    matmul_tiled_with(a, b, out, m, n, p, TilePolicy::default())
}

pub fn matmul_tiled_with(
    a: &AlignedBuffer,
    b: &AlignedBuffer,
    out: &mut AlignedBuffer,
    m: Extent,
    n: Extent,
    p: Extent,
    policy: TilePolicy,
) -> Res<()> {
    let (mu, nu, pu) = dims(m, n, p);
    check_operand("a", a, mu, nu)?;
    check_operand("b", b, nu, pu)?;
    check_operand("out", out, mu, pu)?;

    let aligned = mu % TILE == 0 && nu % TILE == 0 && pu % TILE == 0;
    if policy == TilePolicy::Strict && !aligned {
        check_tile_multiple("m", mu)?;
        check_tile_multiple("n", nu)?;
        check_tile_multiple("p", pu)?;
    }

    tracing::debug!(m, n, p, padded = !aligned, "tiled matmul");

    let a_tiles = pack_tiles(a, m, n)?;
    let b_tiles = pack_tiles(b, n, p)?;
    let mut out_tiles = AlignedBuffer::new(tiled_len(mu, pu))?;

    tiled_kernel(
        &a_tiles,
        &b_tiles,
        &mut out_tiles,
        ceil_div(mu, TILE),
        ceil_div(nu, TILE),
        ceil_div(pu, TILE),
    );

    unpack_tiles(&out_tiles, m, p, out)
}

