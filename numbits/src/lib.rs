//! Fixed-width numbers and a reverse-Polish stack machine over them.
//!
//! Every value is exactly one machine kind (`int8` ... `uint64`, `float32`,
//! `float64`). Operators promote and narrow the way fixed-width hardware
//! arithmetic does, and the formatter shows the resulting bit patterns.
//!
//! ```text
//! text -> Tokens -> Machine (Stack of Num) -> format -> text
//! ```

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]

mod error;
mod format;
mod lexer;
mod machine;
mod num;
mod ops;
mod stack;
mod words;


pub use error::*;
pub use format::*;
pub use lexer::*;
pub use machine::*;
pub use num::*;
pub use ops::*;
pub use stack::*;
pub use words::*;
