//! Store Comparison Example
//!
//! Loads a fixture set, recommends a store for the shopping list and prints
//! the comparison.
//!
//! Use `-f` to load a fixture set by name
//! Use `-w` to compare the planned week's meals instead of the list
//! Use `-n` to limit the number of stores shown
//! Use `-o` to write a plain-text shopping list to `target/shopping-lists`

use std::{fs, io, path::PathBuf, time::Instant};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use storewise::{
    fixtures::Fixture,
    report::{ReportContext, ReportOptions, shopping_list_text, write_comparison},
    utils::ExampleListArgs,
};

/// Store Comparison Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ExampleListArgs::parse();

    let mut fixture = Fixture::from_set(&args.fixture)?;

    let (name, list) = if args.week {
        fixture.load_meals(&args.fixture)?;

        ("Week plan".to_string(), fixture.week_shopping_list()?)
    } else {
        (fixture.list_name().to_string(), fixture.shopping_list()?)
    };

    let start = Instant::now();
    let result = list.allocate();
    let elapsed = start.elapsed().as_secs_f32();

    let names = fixture.names();
    let mut options = ReportOptions::default();

    if let Some(stores) = args.stores {
        options.max_stores = stores;
    }

    let ctx = ReportContext {
        stores: fixture.stores(),
        names: &names,
        options,
    };

    println!("{name}\n");

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_comparison(&mut handle, &list, &result, &ctx)?;

    if let Some(out) = args.out.as_deref() {
        let output_dir = PathBuf::from("target").join("shopping-lists");
        fs::create_dir_all(&output_dir)?;

        let output_path = output_dir.join(out);
        fs::write(&output_path, shopping_list_text(&name, &list, &ctx)?)?;

        println!("\nShopping list written to {}", output_path.display());
    }

    println!("\nAllocation: {elapsed}s");

    Ok(())
}
