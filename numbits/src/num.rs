//! Fixed-width numeric values.
//!
//! A `Num` is always exactly one of the machine kinds below. There is no
//! "unsized" number: every literal, constant, and operator result carries
//! its width and signedness with it.

/// The machine representation of a `Num`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl Kind {
    pub const ALL: [Kind; 10] = [
        Kind::I8,
        Kind::I16,
        Kind::I32,
        Kind::I64,
        Kind::U8,
        Kind::U16,
        Kind::U32,
        Kind::U64,
        Kind::F32,
        Kind::F64,
    ];

    /// Width in bits: 8, 16, 32 or 64.
    pub const fn bits(self) -> u32 {
        match self {
            Kind::I8 | Kind::U8 => 8,
            Kind::I16 | Kind::U16 => 16,
            Kind::I32 | Kind::U32 | Kind::F32 => 32,
            Kind::I64 | Kind::U64 | Kind::F64 => 64,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Kind::F32 | Kind::F64)
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64)
    }

    pub const fn is_unsigned(self) -> bool {
        matches!(self, Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64)
    }

    /// The unsigned integer kind with the same width.
    pub const fn unsigned(self) -> Kind {
        Kind::unsigned_of(self.bits())
    }

    pub const fn signed_of(bits: u32) -> Kind {
        match bits {
            8 => Kind::I8,
            16 => Kind::I16,
            32 => Kind::I32,
            _ => Kind::I64,
        }
    }

    pub const fn unsigned_of(bits: u32) -> Kind {
        match bits {
            8 => Kind::U8,
            16 => Kind::U16,
            32 => Kind::U32,
            _ => Kind::U64,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Kind::I8 => "int8",
            Kind::I16 => "int16",
            Kind::I32 => "int32",
            Kind::I64 => "int64",
            Kind::U8 => "uint8",
            Kind::U16 => "uint16",
            Kind::U32 => "uint32",
            Kind::U64 => "uint64",
            Kind::F32 => "float32",
            Kind::F64 => "float64",
        }
    }
}

/// A single scalar of one of the machine kinds.
///
/// Values are plain data. Copying a `Num` never aliases anything.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Num {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Num {
    pub const fn kind(self) -> Kind {
        match self {
            Num::I8(_) => Kind::I8,
            Num::I16(_) => Kind::I16,
            Num::I32(_) => Kind::I32,
            Num::I64(_) => Kind::I64,
            Num::U8(_) => Kind::U8,
            Num::U16(_) => Kind::U16,
            Num::U32(_) => Kind::U32,
            Num::U64(_) => Kind::U64,
            Num::F32(_) => Kind::F32,
            Num::F64(_) => Kind::F64,
        }
    }

    pub const fn bits(self) -> u32 {
        self.kind().bits()
    }

    pub const fn is_float(self) -> bool {
        self.kind().is_float()
    }

    pub const fn is_signed(self) -> bool {
        self.kind().is_signed()
    }

    /// Numeric value as a 64-bit float. Large 64-bit integers round.
    pub fn as_f64(self) -> f64 {
        match self {
            Num::I8(v) => v as f64,
            Num::I16(v) => v as f64,
            Num::I32(v) => v as f64,
            Num::I64(v) => v as f64,
            Num::U8(v) => v as f64,
            Num::U16(v) => v as f64,
            Num::U32(v) => v as f64,
            Num::U64(v) => v as f64,
            Num::F32(v) => v as f64,
            Num::F64(v) => v,
        }
    }

    /// Numeric value as a signed 64-bit integer, wrapping.
    pub fn as_i64(self) -> i64 {
        self.as_u64() as i64
    }

    /// Numeric value as an unsigned 64-bit integer, wrapping.
    ///
    /// Signed values are sign-extended. Floats truncate toward zero and are
    /// then reduced modulo 2^64.
    pub fn as_u64(self) -> u64 {
        match self {
            Num::I8(v) => v as u64,
            Num::I16(v) => v as u64,
            Num::I32(v) => v as u64,
            Num::I64(v) => v as u64,
            Num::U8(v) => v as u64,
            Num::U16(v) => v as u64,
            Num::U32(v) => v as u64,
            Num::U64(v) => v,
            Num::F32(v) => float_to_u64_wrapping(v as f64),
            Num::F64(v) => float_to_u64_wrapping(v),
        }
    }

    /// The value's own bit pattern, zero-extended from its width.
    pub fn raw_bits(self) -> u64 {
        match self {
            Num::I8(v) => v as u8 as u64,
            Num::I16(v) => v as u16 as u64,
            Num::I32(v) => v as u32 as u64,
            Num::I64(v) => v as u64,
            Num::U8(v) => v as u64,
            Num::U16(v) => v as u64,
            Num::U32(v) => v as u64,
            Num::U64(v) => v,
            Num::F32(v) => v.to_bits() as u64,
            Num::F64(v) => v.to_bits(),
        }
    }

    /// Reinterprets the low `kind.bits()` bits of `bits` as a value of `kind`.
    pub fn from_raw_bits(kind: Kind, bits: u64) -> Num {
        match kind {
            Kind::I8 => Num::I8(bits as i8),
            Kind::I16 => Num::I16(bits as i16),
            Kind::I32 => Num::I32(bits as i32),
            Kind::I64 => Num::I64(bits as i64),
            Kind::U8 => Num::U8(bits as u8),
            Kind::U16 => Num::U16(bits as u16),
            Kind::U32 => Num::U32(bits as u32),
            Kind::U64 => Num::U64(bits),
            Kind::F32 => Num::F32(f32::from_bits(bits as u32)),
            Kind::F64 => Num::F64(f64::from_bits(bits)),
        }
    }

    /// Converts to `kind` the way a native cast would: integers wrap, floats
    /// truncate toward zero before wrapping, and float narrowing rounds.
    /// Never fails.
    pub fn convert(self, kind: Kind) -> Num {
        match kind {
            Kind::I8 => Num::I8(self.as_i64() as i8),
            Kind::I16 => Num::I16(self.as_i64() as i16),
            Kind::I32 => Num::I32(self.as_i64() as i32),
            Kind::I64 => Num::I64(self.as_i64()),
            Kind::U8 => Num::U8(self.as_u64() as u8),
            Kind::U16 => Num::U16(self.as_u64() as u16),
            Kind::U32 => Num::U32(self.as_u64() as u32),
            Kind::U64 => Num::U64(self.as_u64()),
            Kind::F32 => Num::F32(self.as_f64() as f32),
            Kind::F64 => Num::F64(self.as_f64()),
        }
    }

    /// Same kind and same bit pattern. Unlike `==`, a NaN is identical to
    /// itself and `0.0` is not identical to `-0.0`.
    pub fn is_identical(self, other: Num) -> bool {
        self.kind() == other.kind() && self.raw_bits() == other.raw_bits()
    }
}

/// A 64-bit intermediate result, before it is narrowed back to a `Num`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Wide {
    F(f64),
    I(i64),
    U(u64),
}

impl Wide {
    /// Narrows to `bits`, keeping floatness and signedness. Integers wrap.
    /// Floats narrower than 32 bits do not exist, so those become `F32`.
    pub(crate) fn narrow(self, bits: u32) -> Num {
        match self {
            Wide::F(v) if bits < 64 => Num::F32(v as f32),
            Wide::F(v) => Num::F64(v),
            Wide::I(v) => Num::I64(v).convert(Kind::signed_of(bits)),
            Wide::U(v) => Num::U64(v).convert(Kind::unsigned_of(bits)),
        }
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Truncates toward zero, then reduces modulo 2^64. NaN and infinities
/// become 0.
pub(crate) fn float_to_u64_wrapping(v: f64) -> u64 {
    if !v.is_finite() {
        return 0;
    }
    let t = v.trunc();
    if t.abs() < TWO_POW_63 {
        // Exact, including the sign.
        return t as i64 as u64;
    }
    // |t| >= 2^63 means t is a multiple of 2^11, so the reduction is exact.
    t.rem_euclid(TWO_POW_64) as u64
}
