//! Operator algebra over `Num`.
//!
//! Every binary operator computes in 64 bits and narrows the result to the
//! narrower operand's width. Floatness wins over signedness, and signedness
//! wins over unsignedness. Shifts are the exception: they keep the shifted
//! operand's own kind.

use super::*;
use crate::num::Wide;


#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Shl,
    Shr,
    And,
    Or,
    Xor,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UnaryOp {
    Neg,
    Not,
    /// Width/type conversion (`i8` ... `f64`).
    Convert(Kind),
    /// Raw pattern as the unsigned integer of the same width.
    Bits,
    /// Integer pattern reinterpreted as a float.
    FloatFromBits,
    /// Convert to the float kind, then take its pattern (`f32tobits`).
    ToBits(Kind),
    /// Pattern reinterpreted as the given float kind (`bits->f32`).
    FromBits(Kind),
}

impl BinaryOp {
    /// Computes `lhs <op> rhs`, where `lhs` was pushed first.
    pub fn apply(self, lhs: Num, rhs: Num) -> Result<Num> {
        match self {
            BinaryOp::Add => dispatch(
                lhs,
                rhs,
                |x, y| x + y,
                |x, y| Ok(x.wrapping_add(y)),
                |x, y| Ok(x.wrapping_add(y)),
            ),
            BinaryOp::Sub => dispatch(
                lhs,
                rhs,
                |x, y| x - y,
                |x, y| Ok(x.wrapping_sub(y)),
                |x, y| Ok(x.wrapping_sub(y)),
            ),
            BinaryOp::Mul => dispatch(
                lhs,
                rhs,
                |x, y| x * y,
                |x, y| Ok(x.wrapping_mul(y)),
                |x, y| Ok(x.wrapping_mul(y)),
            ),
            BinaryOp::Div => dispatch(
                lhs,
                rhs,
                |x, y| x / y,
                |x, y| match y {
                    0 => Err(Fault::IntegerDivideByZero),
                    _ => Ok(x.wrapping_div(y)),
                },
                |x, y| x.checked_div(y).ok_or(Fault::IntegerDivideByZero),
            ),
            BinaryOp::Rem => dispatch(
                lhs,
                rhs,
                |x, y| x % y,
                |x, y| match y {
                    0 => Err(Fault::IntegerDivideByZero),
                    _ => Ok(x.wrapping_rem(y)),
                },
                |x, y| x.checked_rem(y).ok_or(Fault::IntegerDivideByZero),
            ),
            BinaryOp::Pow => dispatch(
                lhs,
                rhs,
                f64::powf,
                |x, y| Ok(pow_i64(x, y)),
                |x, y| Ok(pow_u64(x, y)),
            ),
            BinaryOp::Shl => Ok(shift(lhs, rhs.as_i64())),
            BinaryOp::Shr => Ok(shift(lhs, rhs.as_i64().saturating_neg())),
            BinaryOp::And => Ok(bitwise(lhs, rhs, |x, y| x & y)),
            BinaryOp::Or => Ok(bitwise(lhs, rhs, |x, y| x | y)),
            BinaryOp::Xor => Ok(bitwise(lhs, rhs, |x, y| x ^ y)),
        }
    }
}

impl UnaryOp {
    pub fn apply(self, x: Num) -> Num {
        match self {
            // Same promotion as `x -1 *`: an unsigned operand comes back signed.
            UnaryOp::Neg if x.is_float() => Wide::F(-x.as_f64()).narrow(x.bits()),
            UnaryOp::Neg => Wide::I(x.as_i64().wrapping_neg()).narrow(x.bits()),
            UnaryOp::Not => match x {
                Num::F32(v) => Num::F32(f32::from_bits(!v.to_bits())),
                Num::F64(v) => Num::F64(f64::from_bits(!v.to_bits())),
                _ => Num::from_raw_bits(x.kind(), !x.raw_bits()),
            },
            UnaryOp::Convert(kind) => x.convert(kind),
            UnaryOp::Bits => Num::from_raw_bits(x.kind().unsigned(), x.raw_bits()),
            UnaryOp::FloatFromBits => match x {
                Num::F32(_) | Num::F64(_) => x,
                _ if x.bits() == 64 => Num::F64(f64::from_bits(x.raw_bits())),
                _ => Num::F32(f32::from_bits(x.raw_bits() as u32)),
            },
            UnaryOp::ToBits(kind) => UnaryOp::Bits.apply(x.convert(kind)),
            UnaryOp::FromBits(kind) => Num::from_raw_bits(kind, x.raw_bits()),
        }
    }
}

fn dispatch(
    lhs: Num,
    rhs: Num,
    float_op: impl FnOnce(f64, f64) -> f64,
    int_op: impl FnOnce(i64, i64) -> Result<i64>,
    uint_op: impl FnOnce(u64, u64) -> Result<u64>,
) -> Result<Num> {
    let bits = lhs.bits().min(rhs.bits());
    let wide = if lhs.is_float() || rhs.is_float() {
        Wide::F(float_op(lhs.as_f64(), rhs.as_f64()))
    } else if lhs.is_signed() || rhs.is_signed() {
        Wide::I(int_op(lhs.as_i64(), rhs.as_i64())?)
    } else {
        Wide::U(uint_op(lhs.as_u64(), rhs.as_u64())?)
    };
    Ok(wide.narrow(bits))
}

/// The pattern used by the bitwise operators: a float's IEEE-754 bits, or an
/// integer's value sign-extended to 64 bits.
fn pattern(x: Num) -> u64 {
    match x {
        Num::F32(v) => v.to_bits() as u64,
        Num::F64(v) => v.to_bits(),
        _ => x.as_u64(),
    }
}

fn bitwise(lhs: Num, rhs: Num, op: impl FnOnce(u64, u64) -> u64) -> Num {
    let bits = lhs.bits().min(rhs.bits());
    let out = op(pattern(lhs), pattern(rhs));
    if lhs.is_float() || rhs.is_float() {
        if bits == 64 {
            Num::F64(f64::from_bits(out))
        } else {
            Num::F32(f32::from_bits(out as u32))
        }
    } else if lhs.is_signed() || rhs.is_signed() {
        Wide::I(out as i64).narrow(bits)
    } else {
        Wide::U(out).narrow(bits)
    }
}

/// Shifts left by `amount` bits, or right when `amount` is negative. The
/// result keeps the kind of `x`.
fn shift(x: Num, amount: i64) -> Num {
    let n = amount.unsigned_abs();
    let wide = match x {
        Num::F32(_) | Num::F64(_) => Wide::F(scale_by_power_of_two(x.as_f64(), amount)),
        Num::I8(_) | Num::I16(_) | Num::I32(_) | Num::I64(_) => {
            let v = x.as_i64();
            Wide::I(match (amount >= 0, n >= 64) {
                (true, true) => 0,
                (true, false) => v << n,
                (false, true) => v >> 63,
                (false, false) => v >> n,
            })
        }
        _ => {
            let v = x.as_u64();
            Wide::U(match (amount >= 0, n >= 64) {
                (_, true) => 0,
                (true, false) => v << n,
                (false, false) => v >> n,
            })
        }
    };
    wide.narrow(x.bits())
}

fn pow_i64(base: i64, exp: i64) -> i64 {
    if base == 1 || exp == 0 {
        return 1;
    }
    if exp < 0 {
        return 0;
    }
    let mut acc: i64 = 1;
    let mut base = base;
    let mut exp = exp as u64;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    acc
}

fn pow_u64(base: u64, exp: u64) -> u64 {
    if base == 1 || exp == 0 {
        return 1;
    }
    let mut acc: u64 = 1;
    let mut base = base;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    acc
}

/// Computes `x * 2^n` by building powers of two directly in the exponent
/// field. Large `n` is applied in steps so nothing overflows or flushes to
/// zero early, and the last step avoids double rounding into subnormals.
pub fn scale_by_power_of_two(x: f64, n: i64) -> f64 {
    const MAX_EXP: i64 = 1023;
    const MIN_EXP: i64 = -1022;
    // 2^-1022 * 2^53
    const SUBNORMAL_STEP: i64 = -969;

    let mut y = x;
    let mut n = n.clamp(-4000, 4000);
    if n > MAX_EXP {
        y *= pow2(MAX_EXP);
        n -= MAX_EXP;
        if n > MAX_EXP {
            y *= pow2(MAX_EXP);
            n -= MAX_EXP;
            n = n.min(MAX_EXP);
        }
    } else if n < MIN_EXP {
        y *= pow2(SUBNORMAL_STEP);
        n -= SUBNORMAL_STEP;
        if n < MIN_EXP {
            y *= pow2(SUBNORMAL_STEP);
            n -= SUBNORMAL_STEP;
            n = n.max(MIN_EXP);
        }
    }
    y * pow2(n)
}

/// 2^n for a normal exponent, `-1022 <= n <= 1023`.
fn pow2(n: i64) -> f64 {
    f64::from_bits(((0x3ff + n) as u64) << 52)
}
