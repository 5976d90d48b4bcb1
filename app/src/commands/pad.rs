//! `pad` subcommand: pad or resize one image file on disk.

use anyhow::Context;
use layout_engine::{RatioSpec, pad_image_file};

use crate::cli::PadArgs;

pub fn run(args: PadArgs) -> anyhow::Result<()> {
    let target = RatioSpec::parse(&args.target)
        .with_context(|| format!("Invalid target: {}", args.target))?;

    let out_path = pad_image_file(&args.image, &target, args.output.as_deref())?;
    println!("{}", out_path.display());
    Ok(())
}
