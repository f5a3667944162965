// SPDX-License-Identifier: Unlicense
use anyhow::{Context, Result};
use bonsai_prune::{
    ast::DEFAULT_CAPACITY,
    config::{Config, OutputFormat},
    driver,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[clap(
    name = "prune",
    version,
    about = "Fold, simplify and hoist common subexpressions of an integer expression"
)]
struct Arguments {
    /// Print a pic diagram of the tree instead of the indented dump.
    #[clap(short = 'd', long = "draw")]
    draw: bool,

    /// Maximum number of tree nodes for the compilation.
    #[clap(long, value_name = "NODES", default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    #[clap(long = "no-fold")]
    no_fold: bool,

    #[clap(long = "no-rewrite")]
    no_rewrite: bool,

    #[clap(long = "no-cse")]
    no_cse: bool,

    /// The expression to compile, e.g. "(a+b)*(a+b)".
    #[clap(default_value = "", allow_hyphen_values = true)]
    expression: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Arguments::parse();
    let config = Config {
        capacity: args.capacity,
        fold: !args.no_fold,
        rewrite: !args.no_rewrite,
        cse: !args.no_cse,
        format: if args.draw {
            OutputFormat::Draw
        } else {
            OutputFormat::Dump
        },
    };

    let compilation = driver::compile(&args.expression, &config)
        .with_context(|| format!("failed to compile {:?}", args.expression))?;
    print!("{}", compilation.render());
    Ok(())
}
