use indoc::formatdoc;
use itertools::Itertools;

use crate::project::Project;

// tooling shared by every generated environment, next to the projects' own packages
const DEV_TOOLS: &str = "pip setuptools wheel pytest mypy twine";

pub fn package(project: &Project) -> String {
    let name = project.name().unwrap_or_default();
    formatdoc!(
        "
        {name} = python.pkgs.buildPythonPackage rec {{
        \tpname = {name:?};
        \tversion = {version:?};
        \tsrc = {src};
        \tpropagatedBuildInputs = with python.pkgs; [ {deps} ];

        \tdoCheck = false;

        \tmeta = with lib; {{
        \t\thomepage = {homepage:?};
        \t\tdescription = {description:?};
        \t\tmaintainers = with maintainers; [ padhia ];
        \t}};
        }};",
        version = project.version().unwrap_or_default(),
        src = project.src_dir().display(),
        deps = project.dependencies().iter().join(" "),
        homepage = project.homepage().unwrap_or_default(),
        description = project.description().unwrap_or_default(),
    )
}

pub fn let_vars(name: &str, pyver: &str, projects: &[Project]) -> String {
    let pkgs = projects.iter().map(package).join("\n\n");
    let names = projects.iter().filter_map(Project::name).join(" ");
    formatdoc!(
        "
        let
        \tpython = python{pyver};

        \t{pkgs}

        \tdefaultPackage = python.withPackages (p: with p; [
        \t\t{DEV_TOOLS}
        \t\t{names}
        \t]);

        \tdevShell = mkShell {{
        \t\tname = {name:?};
        \t\tbuildInputs = with python.pkgs; [
        \t\t\tpython
        \t\t\t{DEV_TOOLS}
        \t\t\t{names}
        \t\t];
        \t}};",
        pkgs = indent(&pkgs, 1),
    )
}

pub fn flake(vars: &str, nixpkgs: &str) -> String {
    formatdoc!(
        "
        {{
        description = \"Flake to manage python workspace\";

        inputs = {{
        \tnixpkgs.url = \"github:nixos/nixpkgs/{nixpkgs}\";
        \tflake-utils.url = \"github:numtide/flake-utils\";
        }};

        outputs = {{ self, nixpkgs, flake-utils }}:
        \tflake-utils.lib.eachDefaultSystem (system:
        \t\twith nixpkgs.legacyPackages.${{system}};
        \t\t{vars}

        \t\tin {{
        \t\t\tinherit defaultPackage devShell;
        \t\t}}
        \t);
        }}",
        vars = indent(vars, 2),
    )
}

pub fn shell(vars: &str) -> String {
    formatdoc!(
        "
        {{ pkgs ? import <nixpkgs> {{}} }}:
        with pkgs;
        {vars}

        in
        \tdevShell"
    )
}

/// Normalizes the rendered script for output: trailing whitespace goes (blank
/// lines pick up stray tabs from `indent`), then tabs become two-space indents.
pub fn finish(script: &str) -> String {
    script
        .lines()
        .map(str::trim_end)
        .join("\n")
        .trim_end()
        .replace('\t', "  ")
}

fn indent(s: &str, levels: usize) -> String {
    s.lines().join(&format!("\n{}", "\t".repeat(levels)))
}
