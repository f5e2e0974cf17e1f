//! 8×8 block grid and the separable 2-D DCT-II / IDCT-II used by the DCT coder.
//!
//! Blocks are enumerated in row-major order over a plane zero-padded to a
//! multiple of [`BLOCK`] in both dimensions. The transform itself is the
//! standard JPEG-style separable decomposition: a 1-D DCT-II applied to every
//! row, then to every column (and the mirrored order for the inverse).

pub const BLOCK: usize = 8;

/// A single 8×8 plane of `f32` samples, stored row-major.
#[derive(Debug, Clone, Copy)]
pub struct Block(pub [[f32; BLOCK]; BLOCK]);

/// A plane split into a row-major grid of 8×8 blocks, padded from `(orig_h, orig_w)`.
pub struct BlockGrid {
    pub blocks: Vec<Block>,
    pub grid_w: usize,
    pub grid_h: usize,
    pub orig_w: usize,
    pub orig_h: usize,
}

impl BlockGrid {
    /// Zero-pad `plane` (row-major, `height x width`) up to a multiple of
    /// [`BLOCK`] and split it into row-major blocks.
    pub fn from_plane(plane: &[f32], width: usize, height: usize) -> Self {
        let grid_w = (width + BLOCK - 1) / BLOCK;
        let grid_h = (height + BLOCK - 1) / BLOCK;
        let mut blocks = Vec::with_capacity(grid_w * grid_h);

        for by in 0..grid_h {
            for bx in 0..grid_w {
                let mut b = [[0f32; BLOCK]; BLOCK];
                for y in 0..BLOCK {
                    let src_y = by * BLOCK + y;
                    if src_y >= height {
                        continue;
                    }
                    for x in 0..BLOCK {
                        let src_x = bx * BLOCK + x;
                        if src_x >= width {
                            continue;
                        }
                        b[y][x] = plane[src_y * width + src_x];
                    }
                }
                blocks.push(Block(b));
            }
        }

        BlockGrid { blocks, grid_w, grid_h, orig_w: width, orig_h: height }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Spatial mean of block `idx`'s samples, used by the DCT coder's activity mask.
    pub fn block_mean(&self, idx: usize) -> f32 {
        let b = &self.blocks[idx].0;
        let sum: f32 = b.iter().flatten().sum();
        sum / (BLOCK * BLOCK) as f32
    }

    /// Reassemble blocks back into a `height x width` plane, cropping the padding.
    pub fn to_plane(&self) -> Vec<f32> {
        let mut out = vec![0f32; self.orig_w * self.orig_h];
        for by in 0..self.grid_h {
            for bx in 0..self.grid_w {
                let b = &self.blocks[by * self.grid_w + bx].0;
                for y in 0..BLOCK {
                    let dst_y = by * BLOCK + y;
                    if dst_y >= self.orig_h {
                        continue;
                    }
                    for x in 0..BLOCK {
                        let dst_x = bx * BLOCK + x;
                        if dst_x >= self.orig_w {
                            continue;
                        }
                        out[dst_y * self.orig_w + dst_x] = b[y][x];
                    }
                }
            }
        }
        out
    }
}

/// Precomputed `cos((2x+1)*u*PI/16)` table shared by every forward/inverse call.
fn cosine_table() -> [[f32; BLOCK]; BLOCK] {
    let mut table = [[0f32; BLOCK]; BLOCK];
    for x in 0..BLOCK {
        for u in 0..BLOCK {
            table[x][u] =
                ((2 * x + 1) as f32 * u as f32 * std::f32::consts::PI / 16.0).cos();
        }
    }
    table
}

fn scale(u: usize) -> f32 {
    if u == 0 {
        1.0 / std::f32::consts::SQRT_2
    } else {
        1.0
    }
}

fn dct_1d(input: &[f32; BLOCK], table: &[[f32; BLOCK]; BLOCK]) -> [f32; BLOCK] {
    let mut out = [0f32; BLOCK];
    for u in 0..BLOCK {
        let mut sum = 0f32;
        for x in 0..BLOCK {
            sum += input[x] * table[x][u];
        }
        out[u] = 0.5 * scale(u) * sum;
    }
    out
}

fn idct_1d(input: &[f32; BLOCK], table: &[[f32; BLOCK]; BLOCK]) -> [f32; BLOCK] {
    let mut out = [0f32; BLOCK];
    for x in 0..BLOCK {
        let mut sum = 0f32;
        for u in 0..BLOCK {
            sum += scale(u) * input[u] * table[x][u];
        }
        out[x] = 0.5 * sum;
    }
    out
}

/// Forward 2-D DCT-II: rows then columns.
pub fn dct_2d(block: &Block) -> Block {
    let table = cosine_table();
    let mut rows = [[0f32; BLOCK]; BLOCK];
    for y in 0..BLOCK {
        rows[y] = dct_1d(&block.0[y], &table);
    }
    let mut out = [[0f32; BLOCK]; BLOCK];
    for x in 0..BLOCK {
        let col: [f32; BLOCK] = std::array::from_fn(|y| rows[y][x]);
        let col_t = dct_1d(&col, &table);
        for y in 0..BLOCK {
            out[y][x] = col_t[y];
        }
    }
    Block(out)
}

/// Inverse 2-D DCT-II: columns then rows (the mirror of [`dct_2d`]'s order).
pub fn idct_2d(block: &Block) -> Block {
    let table = cosine_table();
    let mut cols = [[0f32; BLOCK]; BLOCK];
    for x in 0..BLOCK {
        let col: [f32; BLOCK] = std::array::from_fn(|y| block.0[y][x]);
        let col_t = idct_1d(&col, &table);
        for y in 0..BLOCK {
            cols[y][x] = col_t[y];
        }
    }
    let mut out = [[0f32; BLOCK]; BLOCK];
    for y in 0..BLOCK {
        out[y] = idct_1d(&cols[y], &table);
    }
    Block(out)
}
