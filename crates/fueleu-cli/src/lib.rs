//! FuelEU Maritime CLI library.
//!
//! Terminal styling and output formatting shared by the `fueleu-cli`
//! subcommands.

pub mod output;
pub mod terminal;
