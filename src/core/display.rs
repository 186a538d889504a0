use prettytable::{
    format::consts::FORMAT_BOX_CHARS,
    {Cell, Row, Table},
};
use std::fmt::{Debug, Display, Formatter, Result};

use crate::{
    core::{errors::KernelError, utils::ensure_len},
    AlignedBuffer,
};

impl Debug for AlignedBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

// [v0, v1, ..., vn-1]
impl Display for AlignedBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[")?;
        for (i, elem) in self.as_slice().iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", elem)?;
        }
        write!(f, "]")
    }
}

impl AlignedBuffer {
    /// Renders a compact row-major `[rows x cols]` buffer as a box-drawn table.
    pub fn to_table(&self, rows: usize, cols: usize) -> std::result::Result<Table, KernelError> {
        let count = rows.checked_mul(cols).unwrap_or(usize::MAX);
        ensure_len("to_table", count, self.size())?;

        let table_rows = self
            .as_slice()
            .chunks(cols.max(1))
            .take(rows)
            .map(|row| {
                Row::new(
                    row.iter()
                        .map(|elem| Cell::new(&format!("{:.2}", elem)))
                        .collect(),
                )
            })
            .collect();

        let mut table = Table::init(table_rows);
        table.set_format(*FORMAT_BOX_CHARS);
        Ok(table)
    }
}
