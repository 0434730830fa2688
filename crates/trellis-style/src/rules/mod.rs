//! Style declarations.

mod declaration;

pub use declaration::Declaration;
