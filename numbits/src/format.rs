//! Text rendering of values and stacks.
//!
//! The concise form of a value is `<value> (<kind>)`. The verbose form is a
//! tab-separated table, one property per line; for floats it ends with the
//! sign/exponent/mantissa layout of the IEEE-754 pattern and its decoding.

use super::*;
use core::fmt;


/// Rendered in place of an empty stack.
pub const EMPTY: &str = "(empty)";

const RULE_WIDTH: usize = 79;

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", value_text(*self), self.kind())
    }
}

/// The value alone, in decimal. Floats use the shortest text that reads
/// back to the same value.
pub fn value_text(n: Num) -> String {
    match n {
        Num::I8(v) => v.to_string(),
        Num::I16(v) => v.to_string(),
        Num::I32(v) => v.to_string(),
        Num::I64(v) => v.to_string(),
        Num::U8(v) => v.to_string(),
        Num::U16(v) => v.to_string(),
        Num::U32(v) => v.to_string(),
        Num::U64(v) => v.to_string(),
        Num::F32(v) => float_text(v, v as f64),
        Num::F64(v) => float_text(v, v),
    }
}

fn float_text<F: fmt::Display + fmt::LowerExp>(v: F, wide: f64) -> String {
    if wide.is_nan() {
        "NaN".to_string()
    } else if wide.is_infinite() {
        (if wide > 0.0 { "+Inf" } else { "-Inf" }).to_string()
    } else {
        let abs = wide.abs();
        if abs != 0.0 && !(1e-4..1e21).contains(&abs) {
            format!("{:e}", v)
        } else {
            format!("{}", v)
        }
    }
}

/// The top of the stack in concise form.
pub fn print_top(stack: &[Num]) -> String {
    match stack.last() {
        Some(n) => n.to_string(),
        None => EMPTY.to_string(),
    }
}

/// Width of the largest slot index.
fn index_width(len: usize) -> usize {
    len.saturating_sub(1).to_string().len()
}

/// Every slot in concise form, bottom first, each labelled with its
/// distance from the top.
pub fn list(stack: &[Num]) -> String {
    if stack.is_empty() {
        return EMPTY.to_string();
    }
    let w = index_width(stack.len());
    stack
        .iter()
        .enumerate()
        .map(|(i, n)| format!("{:>w$}: {}", stack.len() - i - 1, n, w = w))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every slot in verbose form, bottom first, separated by rules.
pub fn dump(stack: &[Num]) -> String {
    if stack.is_empty() {
        return EMPTY.to_string();
    }
    let w = index_width(stack.len());
    let mut out: Vec<String> = Vec::new();
    for (i, n) in stack.iter().enumerate() {
        if i > 0 {
            out.push(String::new());
            out.push("-".repeat(RULE_WIDTH));
        }
        let text = verbose(*n);
        let mut lines = text.lines();
        if let Some(first) = lines.next() {
            out.push(format!("{:>w$}: {}", stack.len() - i - 1, first, w = w));
        }
        for line in lines {
            out.push(format!("{:w$}  {}", "", line, w = w));
        }
    }
    out.join("\n")
}

/// The multi-line breakdown of one value.
pub fn verbose(n: Num) -> String {
    match n {
        Num::F32(v) => verbose_float(
            n,
            &FloatLayout {
                exp_bits: 8,
                man_bits: 23,
                fixed: format!("{:.8e}", v),
                json: json_text(n, serde_json::to_string(&v)),
            },
        ),
        Num::F64(v) => verbose_float(
            n,
            &FloatLayout {
                exp_bits: 11,
                man_bits: 52,
                fixed: format!("{:.16e}", v),
                json: json_text(n, serde_json::to_string(&v)),
            },
        ),
        _ => {
            let bits = n.bits() as usize;
            let raw = n.raw_bits();
            format!(
                "type\t{}\ndec\t{}\nhex\t{:#0hw$x}\nbin\t{:#0bw$b}",
                n.kind(),
                value_text(n),
                raw,
                raw,
                hw = bits / 4 + 2,
                bw = bits + 2,
            )
        }
    }
}

struct FloatLayout {
    exp_bits: u32,
    man_bits: u32,
    fixed: String,
    json: String,
}

fn json_text(n: Num, json: serde_json::Result<String>) -> String {
    if n.as_f64().is_finite() {
        json.unwrap_or_else(|e| e.to_string())
    } else {
        // JSON has no spelling for these.
        format!("unsupported value: {}", value_text(n))
    }
}

fn verbose_float(n: Num, layout: &FloatLayout) -> String {
    let raw = n.raw_bits();
    let width = n.bits();
    let man_mask = (1u64 << layout.man_bits) - 1;
    let exp_max = (1u64 << layout.exp_bits) - 1;
    let bias = (exp_max >> 1) as i64;

    let sign = raw >> (width - 1);
    let exp = (raw >> layout.man_bits) & exp_max;
    let man = raw & man_mask;

    let eb = layout.exp_bits as usize;
    let mb = layout.man_bits as usize;
    let hex_digits = (mb + 3) / 4;

    let mantissa = if exp == exp_max {
        (if man == 0 { "Inf" } else { "NaN" }).to_string()
    } else {
        let lead = if exp == 0 { 0 } else { 1 };
        let frac = format!("{:0mb$b}", man, mb = mb);
        let frac = frac.trim_end_matches('0');
        format!("0b{}.{}", lead, if frac.is_empty() { "0" } else { frac })
    };
    let mantissa = format!("{} ({:#0hw$x})", mantissa, man, hw = hex_digits + 2);

    format!(
        "type\t{kind}\n\
         dec\t{dec}\n\
         fixed\t{fixed}\n\
         json\t{json}\n\
         hexf\t{hexf}\n\
         bits\t{raw:#0rw$x}\n    \
         \t0b{sign} {exp:0eb$b} {man:0mb$b}\n    \
         \t  {sign_char} {unbiased:>eb$} {mantissa:>mb$}",
        kind = n.kind(),
        dec = value_text(n),
        fixed = layout.fixed,
        json = layout.json,
        hexf = format_hex_float(n.as_f64()),
        raw = raw,
        rw = width as usize / 4 + 2,
        sign = sign,
        exp = exp,
        man = man,
        eb = eb,
        mb = mb,
        sign_char = if sign == 1 { '-' } else { '+' },
        unbiased = exp as i64 - bias,
        mantissa = mantissa,
    )
}

/// Renders `v` as a C99 hexadecimal floating-point literal, e.g.
/// `0x1.999999999999ap-4` for 0.1. Normal values are written `0x1.<frac>`,
/// subnormals `0x0.<frac>p-1022`, with trailing zero digits dropped.
/// The tokenizer reads every finite output back to the identical value.
pub fn format_hex_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    let sign = if v.is_sign_negative() { "-" } else { "" };
    if v.is_infinite() {
        return format!("{}inf", sign);
    }

    let bits = v.to_bits();
    let exp = ((bits >> 52) & 0x7ff) as i64;
    let man = bits & ((1u64 << 52) - 1);
    if exp == 0 && man == 0 {
        return format!("{}0x0p+0", sign);
    }

    let (lead, exp) = if exp == 0 { (0, -1022) } else { (1, exp - 1023) };
    let frac = format!("{:013x}", man);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}0x{}p{:+}", sign, lead, exp)
    } else {
        format!("{}0x{}.{}p{:+}", sign, lead, frac, exp)
    }
}
