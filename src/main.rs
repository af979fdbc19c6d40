mod cli;
mod project;
mod render;
mod setup_cfg;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use std::io::stderr;

use crate::{
    cli::Opts,
    project::Project,
    render::{finish, flake, let_vars, shell},
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_ansi(stderr().is_terminal())
        .with_env_filter(EnvFilter::from_env("PY2NIX_LOG"))
        .with_writer(stderr)
        .init();

    let opts = Opts::parse();

    let projects = opts
        .inputs
        .iter()
        .map(|path| Project::open(path))
        .collect::<Result<Vec<_>>>()?;

    let vars = let_vars(&opts.name, &opts.pyver, &projects);
    let script = if opts.shell {
        shell(&vars)
    } else {
        flake(&vars, &opts.nixpkgs)
    };
    println!("{}", finish(&script));

    Ok(())
}
