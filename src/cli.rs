use std::path::PathBuf;

use clap::Parser;

/// Generate a flake.nix for Python packages using setuptools metadata
/// https://github.com/padhia/py2nix
#[derive(Parser)]
#[command(verbatim_doc_comment)]
pub struct Opts {
    /// Python project setup.cfg file or a directory containing one
    #[arg(value_name = "PATH", required = true, value_parser = pyproj)]
    pub inputs: Vec<PathBuf>,

    /// Python version
    #[arg(long, default_value = "310")]
    pub pyver: String,

    /// Shell name
    #[arg(long, default_value = "my")]
    pub name: String,

    /// nixpkgs branch
    #[arg(long, default_value = "nixos-unstable")]
    pub nixpkgs: String,

    /// Generate script for shell.nix
    #[arg(long)]
    pub shell: bool,
}

fn pyproj(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);
    if path.is_dir() {
        let cfg = path.join("setup.cfg");
        if cfg.is_file() {
            return Ok(cfg);
        }
    } else if path.file_name().is_some_and(|name| name == "setup.cfg") {
        return Ok(path);
    }
    Err("Invalid python project".into())
}
