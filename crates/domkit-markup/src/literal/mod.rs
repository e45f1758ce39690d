//! Safe parser for literal expressions such as
//! `{'Button': {'background_color': 0xFF007ACC}}`.
//!
//! Only data is accepted. Names other than `True` / `False` / `None`, calls,
//! and operators other than a leading sign are rejected with a
//! [`StyleParseError`](crate::StyleParseError), so nothing is ever evaluated.

pub mod lexer;
pub mod parser;

pub use parser::{parse_literal, parse_style};
