use crate::{
    core::{ops::for_each_mut, utils::ensure_len},
    AlignedBuffer, Res,
};

// --- Operation tags ---

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BinaryOp {
    Add,
    Mul,
    Div,
    Maximum,
    /// `1.0` when equal, else `0.0`.
    Eq,
    /// `1.0` when greater or equal, else `0.0`.
    Ge,
}

impl BinaryOp {
    #[inline]
    pub fn apply(self, l: f32, r: f32) -> f32 {
        match self {
            BinaryOp::Add => l + r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div => l / r,
            BinaryOp::Maximum => l.max(r),
            BinaryOp::Eq => indicator(l == r),
            BinaryOp::Ge => indicator(l >= r),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Maximum => "maximum",
            BinaryOp::Eq => "eq",
            BinaryOp::Ge => "ge",
        }
    }
}

#[inline]
fn indicator(condition: bool) -> f32 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Unary maps. Domain errors yield NaN or infinities, never an error.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UnaryOp {
    Log,
    Exp,
    Tanh,
    Power(f32),
}

impl UnaryOp {
    #[inline]
    pub fn apply(self, elem: f32) -> f32 {
        match self {
            UnaryOp::Log => elem.ln(),
            UnaryOp::Exp => elem.exp(),
            UnaryOp::Tanh => elem.tanh(),
            UnaryOp::Power(exponent) => elem.powf(exponent),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Log => "log",
            UnaryOp::Exp => "exp",
            UnaryOp::Tanh => "tanh",
            UnaryOp::Power(_) => "power",
        }
    }
}

// --- Canonical maps ---

/// `out[i] = op(a[i], b[i])`.
pub fn ewise(
    op: BinaryOp,
    a: &AlignedBuffer,
    b: &AlignedBuffer,
    out: &mut AlignedBuffer,
) -> Res<()> {
    ensure_len(op.name(), a.size(), b.size())?;
    ensure_len(op.name(), a.size(), out.size())?;
    tracing::trace!(op = op.name(), size = a.size(), "ewise");

    let (a, b) = (a.as_slice(), b.as_slice());
    for_each_mut(out.as_mut_slice(), |i, elem| *elem = op.apply(a[i], b[i]));
    Ok(())
}

/// `out[i] = op(a[i], value)`.
pub fn scalar(op: BinaryOp, a: &AlignedBuffer, value: f32, out: &mut AlignedBuffer) -> Res<()> {
    ensure_len(op.name(), a.size(), out.size())?;
    tracing::trace!(op = op.name(), size = a.size(), value, "scalar");

    let a = a.as_slice();
    for_each_mut(out.as_mut_slice(), |i, elem| *elem = op.apply(a[i], value));
    Ok(())
}

/// `out[i] = op(a[i])`.
pub fn unary(op: UnaryOp, a: &AlignedBuffer, out: &mut AlignedBuffer) -> Res<()> {
    ensure_len(op.name(), a.size(), out.size())?;
    tracing::trace!(op = op.name(), size = a.size(), "unary");

    let a = a.as_slice();
    for_each_mut(out.as_mut_slice(), |i, elem| *elem = op.apply(a[i]));
    Ok(())
}

// --- In place, `a` is also the output ---

pub fn ewise_assign(op: BinaryOp, a: &mut AlignedBuffer, b: &AlignedBuffer) -> Res<()> {
    ensure_len(op.name(), a.size(), b.size())?;

    let b = b.as_slice();
    for_each_mut(a.as_mut_slice(), |i, elem| *elem = op.apply(*elem, b[i]));
    Ok(())
}

pub fn scalar_assign(op: BinaryOp, a: &mut AlignedBuffer, value: f32) {
    for_each_mut(a.as_mut_slice(), |_, elem| *elem = op.apply(*elem, value));
}

pub fn unary_assign(op: UnaryOp, a: &mut AlignedBuffer) {
    for_each_mut(a.as_mut_slice(), |_, elem| *elem = op.apply(*elem));
}

// --- Named kernels ---

macro_rules! binary_kernels {
    ($op:ident, $ewise:ident, $scalar:ident, $assign:ident) => {
        pub fn $ewise(a: &AlignedBuffer, b: &AlignedBuffer, out: &mut AlignedBuffer) -> Res<()> {
            ewise(BinaryOp::$op, a, b, out)
        }

        pub fn $scalar(a: &AlignedBuffer, value: f32, out: &mut AlignedBuffer) -> Res<()> {
            scalar(BinaryOp::$op, a, value, out)
        }

        pub fn $assign(a: &mut AlignedBuffer, b: &AlignedBuffer) -> Res<()> {
            ewise_assign(BinaryOp::$op, a, b)
        }
    };
}

binary_kernels!(Add, ewise_add, scalar_add, ewise_add_assign);
binary_kernels!(Mul, ewise_mul, scalar_mul, ewise_mul_assign);
binary_kernels!(Div, ewise_div, scalar_div, ewise_div_assign);
binary_kernels!(Maximum, ewise_maximum, scalar_maximum, ewise_maximum_assign);
binary_kernels!(Eq, ewise_eq, scalar_eq, ewise_eq_assign);
binary_kernels!(Ge, ewise_ge, scalar_ge, ewise_ge_assign);

pub fn ewise_log(a: &AlignedBuffer, out: &mut AlignedBuffer) -> Res<()> {
    unary(UnaryOp::Log, a, out)
}

pub fn ewise_exp(a: &AlignedBuffer, out: &mut AlignedBuffer) -> Res<()> {
    unary(UnaryOp::Exp, a, out)
}

pub fn ewise_tanh(a: &AlignedBuffer, out: &mut AlignedBuffer) -> Res<()> {
    unary(UnaryOp::Tanh, a, out)
}

pub fn scalar_power(a: &AlignedBuffer, exponent: f32, out: &mut AlignedBuffer) -> Res<()> {
    unary(UnaryOp::Power(exponent), a, out)
}
