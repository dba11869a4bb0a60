use std::error::Error;
use std::io::{self, Write};

use strand_report::dispatch::{Wildcard, TABLE};

pub fn run() -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in TABLE.iter() {
        writeln!(out, "{}", entry.category)?;
        for sub in entry.named {
            if sub.options.is_empty() {
                writeln!(out, "  {}:{}", entry.category, sub.name)?;
            } else {
                writeln!(
                    out,
                    "  {}:{}  [{}]",
                    entry.category,
                    sub.name,
                    sub.options.join(", ")
                )?;
            }
        }
        match entry.wildcard {
            Wildcard::Reject => {}
            Wildcard::ConfigurationClass(kind) => {
                writeln!(out, "  {}:<{kind} class name>", entry.category)?;
            }
            Wildcard::Any => writeln!(out, "  {}:<anything>", entry.category)?,
        }
    }
    out.flush()?;
    Ok(())
}
