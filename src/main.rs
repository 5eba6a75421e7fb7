//! Checkout CLI
//!
//! Scans the given item codes and prints the total price.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ipd mbp atv atv atv vga
//! cargo run -- --receipt atv atv atv
//! ```
//!
//! With no item codes, the sample basket `ipd mbp atv atv atv vga` is scanned.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `CHECKOUT_PRICE_LIST`: CSV price list replacing the standard prices
//! - `CHECKOUT_RULES`: CSV rules table replacing the default promotions

use checkout::{Config, Result};
use std::env;
use std::io;
use std::process;

const SAMPLE_BASKET: [&str; 6] = ["ipd", "mbp", "atv", "atv", "atv", "vga"];

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut receipt = false;
    let mut items = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--receipt" {
            receipt = true;
        } else {
            items.push(arg);
        }
    }

    let mut co = Config::from_env().build()?;

    if items.is_empty() {
        SAMPLE_BASKET.iter().for_each(|item| co.scan(*item));
    } else {
        items.into_iter().for_each(|item| co.scan(item));
    }

    if receipt {
        let stdout = io::stdout();
        co.write_receipt(stdout.lock())?;
    } else {
        println!("{}", co.total());
    }

    Ok(())
}
