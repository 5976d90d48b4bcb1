//! `printers` subcommand: list the queues CUPS knows about.

use print_sink::list_printers;

use crate::cli::PrintersArgs;

pub fn run(args: PrintersArgs) -> anyhow::Result<()> {
    let printers = list_printers()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&printers)?);
        return Ok(());
    }

    if printers.is_empty() {
        println!("No printers found");
        return Ok(());
    }

    for printer in &printers {
        let mut line = printer.name.clone();
        if printer.is_default {
            line.push_str(" (default)");
        }
        line.push_str(": ");
        line.push_str(&printer.status);
        if printer.supports_darkness {
            line.push_str(", supports darkness");
        }
        println!("{line}");
    }

    Ok(())
}
