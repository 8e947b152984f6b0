//! # Help Command
//!
//! Reply for a bare prefix or an unknown keyword.

pub fn handle_help(prefix: char) -> String {
    crate::strings::help::main(prefix)
}
