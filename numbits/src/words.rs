//! The fixed word table: operators, named constants, conversions, and
//! stack/display commands.

use super::*;

/// One element of a script.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Token {
    Value(Num),
    Word(Word),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Word {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Dup,
    Swap,
    Drop,
    Print,
    List,
    Dump,
}

impl Word {
    /// Display commands emit output and suppress the end-of-session summary.
    pub fn is_display(self) -> bool {
        matches!(self, Word::Print | Word::List | Word::Dump)
    }
}

const fn bin(op: BinaryOp) -> Token {
    Token::Word(Word::Binary(op))
}

const fn un(op: UnaryOp) -> Token {
    Token::Word(Word::Unary(op))
}

const fn cmd(word: Word) -> Token {
    Token::Word(word)
}

const fn val(n: Num) -> Token {
    Token::Value(n)
}

/// Matched by prefix, first match wins. A word must come before every word
/// that is a prefix of it (`**` before `*`, `i8min` before `i8`).
pub static WORDS: &[(&str, Token)] = &[
    ("<<", bin(BinaryOp::Shl)),
    (">>", bin(BinaryOp::Shr)),
    ("**", bin(BinaryOp::Pow)),
    ("*", bin(BinaryOp::Mul)),
    ("/", bin(BinaryOp::Div)),
    ("%", bin(BinaryOp::Rem)),
    ("-", bin(BinaryOp::Sub)),
    ("+", bin(BinaryOp::Add)),
    ("^", bin(BinaryOp::Xor)),
    ("|", bin(BinaryOp::Or)),
    ("&", bin(BinaryOp::And)),
    ("~", un(UnaryOp::Not)),
    ("!", un(UnaryOp::Neg)),
    ("i64min", val(Num::I64(i64::MIN))),
    ("i64max", val(Num::I64(i64::MAX))),
    ("i32min", val(Num::I32(i32::MIN))),
    ("i32max", val(Num::I32(i32::MAX))),
    ("i16min", val(Num::I16(i16::MIN))),
    ("i16max", val(Num::I16(i16::MAX))),
    ("i8min", val(Num::I8(i8::MIN))),
    ("i8max", val(Num::I8(i8::MAX))),
    ("u64min", val(Num::U64(u64::MIN))),
    ("u64max", val(Num::U64(u64::MAX))),
    ("u32min", val(Num::U32(u32::MIN))),
    ("u32max", val(Num::U32(u32::MAX))),
    ("u16min", val(Num::U16(u16::MIN))),
    ("u16max", val(Num::U16(u16::MAX))),
    ("u8min", val(Num::U8(u8::MIN))),
    ("u8max", val(Num::U8(u8::MAX))),
    ("f64min", val(Num::F64(f64::MIN))),
    ("f64max", val(Num::F64(f64::MAX))),
    // Smallest positive subnormal.
    ("f64smallest", val(Num::F64(4.9406564584124654e-324))),
    ("f32min", val(Num::F32(f32::MIN))),
    ("f32max", val(Num::F32(f32::MAX))),
    ("f32smallest", val(Num::F32(1.401298464324817e-45_f32))),
    ("f32tobits", un(UnaryOp::ToBits(Kind::F32))),
    ("f64tobits", un(UnaryOp::ToBits(Kind::F64))),
    ("neg", un(UnaryOp::Neg)),
    ("mod", bin(BinaryOp::Rem)),
    ("i8", un(UnaryOp::Convert(Kind::I8))),
    ("i16", un(UnaryOp::Convert(Kind::I16))),
    ("i32", un(UnaryOp::Convert(Kind::I32))),
    ("i64", un(UnaryOp::Convert(Kind::I64))),
    ("u8", un(UnaryOp::Convert(Kind::U8))),
    ("u16", un(UnaryOp::Convert(Kind::U16))),
    ("u32", un(UnaryOp::Convert(Kind::U32))),
    ("u64", un(UnaryOp::Convert(Kind::U64))),
    ("f32", un(UnaryOp::Convert(Kind::F32))),
    ("f64", un(UnaryOp::Convert(Kind::F64))),
    ("bits->f32", un(UnaryOp::FromBits(Kind::F32))),
    ("bits->f64", un(UnaryOp::FromBits(Kind::F64))),
    ("bits", un(UnaryOp::Bits)),
    ("fbits", un(UnaryOp::FloatFromBits)),
    ("floatfrombits", un(UnaryOp::FloatFromBits)),
    ("drop", cmd(Word::Drop)),
    ("dup", cmd(Word::Dup)),
    (".", cmd(Word::Dup)),
    ("swap", cmd(Word::Swap)),
    ("x", cmd(Word::Swap)),
    ("print", cmd(Word::Print)),
    ("p", cmd(Word::Print)),
    ("dump", cmd(Word::Dump)),
    ("d", cmd(Word::Dump)),
    ("list", cmd(Word::List)),
    ("ls", cmd(Word::List)),
    ("l", cmd(Word::List)),
];

/// Finds the first word that `text` starts with.
pub fn match_word(text: &str) -> Option<(&'static str, Token)> {
    WORDS
        .iter()
        .find(|(name, _)| text.starts_with(name))
        .map(|&(name, token)| (name, token))
}
