//! One module per subcommand.

pub mod label;
pub mod pad;
pub mod print;
pub mod printers;
