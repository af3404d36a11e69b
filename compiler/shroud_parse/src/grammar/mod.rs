//! Grammar productions, split by construct.
//!
//! Each module extends `Parser` with the methods for one area of the
//! language. Precedence levels get one method each.

mod compound;
mod expr;
mod params;
mod patterns;
mod stmt;
