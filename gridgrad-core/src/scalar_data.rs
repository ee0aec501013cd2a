// src/scalar_data.rs
use std::cell::Cell;
use std::rc::Rc;

use crate::types::DType;

/// Internal storage for one differentiable number.
///
/// A `ScalarData` is shared through `Rc` by every `Scalar` and `Matrix` that
/// views it (element access, rows, transposes), so a gradient accumulated
/// through one view is observable through all of them. The graph is
/// single-threaded, hence `Cell` rather than a lock.
#[derive(Debug)]
pub(crate) struct ScalarData {
    data: Cell<f64>,
    grad: Cell<f64>,
    dtype: DType,
    requires_grad: Cell<bool>,
}

impl ScalarData {
    pub(crate) fn new(value: f64, dtype: DType, requires_grad: bool) -> Rc<Self> {
        Rc::new(ScalarData {
            data: Cell::new(dtype.cast(value)),
            grad: Cell::new(0.0),
            dtype,
            requires_grad: Cell::new(requires_grad),
        })
    }

    pub(crate) fn data(&self) -> f64 {
        self.data.get()
    }

    pub(crate) fn set_data(&self, value: f64) {
        self.data.set(self.dtype.cast(value));
    }

    pub(crate) fn grad(&self) -> f64 {
        self.grad.get()
    }

    pub(crate) fn set_grad(&self, value: f64) {
        self.grad.set(self.dtype.cast(value));
    }

    /// Adds `value` into the accumulator. Values that do not track gradient
    /// are left untouched.
    pub(crate) fn accumulate_grad(&self, value: f64) {
        if self.requires_grad.get() {
            self.grad.set(self.dtype.cast(self.grad.get() + value));
        }
    }

    pub(crate) fn dtype(&self) -> DType {
        self.dtype
    }

    pub(crate) fn requires_grad(&self) -> bool {
        self.requires_grad.get()
    }

    pub(crate) fn set_requires_grad(&self, requires_grad: bool) {
        self.requires_grad.set(requires_grad);
    }
}

/// A rectangular, row-major arrangement of shared `ScalarData` cells.
///
/// Rearranging a grid (transpose, row selection) never copies a cell, it
/// only reorders the `Rc`s. Such a grid is a view: it covers some or all of
/// another grid's cells and must not change their shared flags on its own.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    rows: usize,
    cols: usize,
    dtype: DType,
    cells: Vec<Rc<ScalarData>>,
    view: bool,
}

impl Grid {
    /// Builds a fresh grid whose cell at `(r, c)` holds `f(r, c)`.
    pub(crate) fn from_fn<F>(
        rows: usize,
        cols: usize,
        dtype: DType,
        requires_grad: bool,
        mut f: F,
    ) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(ScalarData::new(f(r, c), dtype, requires_grad));
            }
        }
        Grid {
            rows,
            cols,
            dtype,
            cells,
            view: false,
        }
    }

    /// A 1x1 view of a cell owned by another grid.
    pub(crate) fn from_cell(cell: Rc<ScalarData>) -> Self {
        Grid {
            rows: 1,
            cols: 1,
            dtype: cell.dtype(),
            cells: vec![cell],
            view: true,
        }
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub(crate) fn numel(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn dtype(&self) -> DType {
        self.dtype
    }

    pub(crate) fn is_view(&self) -> bool {
        self.view
    }

    /// All cells of a grid share one flag; reading the first is enough.
    pub(crate) fn requires_grad(&self) -> bool {
        self.cells[0].requires_grad()
    }

    pub(crate) fn set_requires_grad(&self, requires_grad: bool) {
        for cell in &self.cells {
            cell.set_requires_grad(requires_grad);
        }
    }

    pub(crate) fn cell(&self, r: usize, c: usize) -> &Rc<ScalarData> {
        &self.cells[r * self.cols + c]
    }

    pub(crate) fn cells(&self) -> &[Rc<ScalarData>] {
        &self.cells
    }

    pub(crate) fn data_at(&self, r: usize, c: usize) -> f64 {
        self.cell(r, c).data()
    }

    pub(crate) fn grad_at(&self, r: usize, c: usize) -> f64 {
        self.cell(r, c).grad()
    }

    pub(crate) fn accumulate_grad_at(&self, r: usize, c: usize, value: f64) {
        self.cell(r, c).accumulate_grad(value);
    }

    pub(crate) fn fill_grad(&self, value: f64) {
        for cell in &self.cells {
            cell.set_grad(value);
        }
    }

    pub(crate) fn data_rows(&self) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.data()).collect())
            .collect()
    }

    pub(crate) fn grad_rows(&self) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.grad()).collect())
            .collect()
    }

    /// Same cells, columns-major order: a view, not a copy.
    pub(crate) fn transposed(&self) -> Grid {
        let mut cells = Vec::with_capacity(self.cells.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                cells.push(Rc::clone(self.cell(r, c)));
            }
        }
        Grid {
            rows: self.cols,
            cols: self.rows,
            dtype: self.dtype,
            cells,
            view: true,
        }
    }

    pub(crate) fn row(&self, index: usize) -> Grid {
        let start = index * self.cols;
        Grid {
            rows: 1,
            cols: self.cols,
            dtype: self.dtype,
            cells: self.cells[start..start + self.cols].to_vec(),
            view: true,
        }
    }
}
