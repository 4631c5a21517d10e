//! Utils

use clap::Parser;

/// Arguments for the comparison demo
#[derive(Debug, Parser)]
pub struct ExampleListArgs {
    /// Fixture set to use for stores, products and lists
    #[clap(short, long, default_value = "weekly")]
    pub fixture: String,

    /// Compare the planned week's meals instead of the shopping list
    #[clap(short, long)]
    pub week: bool,

    /// Number of stores to show in the comparison
    #[clap(short = 'n', long)]
    pub stores: Option<usize>,

    /// Write a plain-text shopping list to this file in `target/shopping-lists`
    #[clap(short, long)]
    pub out: Option<String>,
}
