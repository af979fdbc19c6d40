use std::collections::BTreeSet;

use anyhow::{bail, Result};
use itertools::{Either, Itertools};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SetupCfg {
    pub metadata: Metadata,
    pub options: Options,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    pub name: Option<String>,
    pub version: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub install_requires: Vec<String>,
}

impl SetupCfg {
    /// Reads the configparser dialect setuptools uses: `[section]` headers,
    /// `key = value` or `key : value` options with indented continuation
    /// lines, `#`/`;` comments, and duplicates rejected.
    pub fn parse(src: &str) -> Result<SetupCfg> {
        let mut cfg = SetupCfg::default();
        let mut sections = BTreeSet::new();
        let mut options = BTreeSet::new();
        let mut section: Option<String> = None;
        let mut current: Option<(String, String)> = None;

        for (idx, raw) in src.lines().enumerate() {
            let n = idx + 1;
            let line = raw.trim_end();
            let trimmed = line.trim_start();

            if trimmed.is_empty() || trimmed.starts_with(['#', ';']) {
                continue;
            }

            if line.starts_with([' ', '\t']) {
                let Some((_, value)) = &mut current else {
                    bail!("line {n}: continuation line without a preceding option");
                };
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(trimmed);
                continue;
            }

            // a section header or a new option ends the value in progress
            if let (Some((key, value)), Some(section)) = (current.take(), &section) {
                cfg.store(section, &key, value);
            }

            if let Some(header) = line.strip_prefix('[') {
                let Some(name) = header.strip_suffix(']') else {
                    bail!("line {n}: malformed section header `{line}`");
                };
                if !sections.insert(name.to_owned()) {
                    bail!("line {n}: duplicate section `[{name}]`");
                }
                section = Some(name.to_owned());
                continue;
            }

            let Some(pos) = line.find(['=', ':']) else {
                bail!("line {n}: expected `key = value`, got `{line}`");
            };
            let key = line[.. pos].trim_end().to_lowercase();
            if key.is_empty() {
                bail!("line {n}: option with an empty name");
            }
            let Some(section) = &section else {
                bail!("line {n}: option `{key}` appears before any section header");
            };
            if !options.insert((section.clone(), key.clone())) {
                bail!("line {n}: duplicate option `{key}` in section `[{section}]`");
            }
            current = Some((key, line[pos + 1 ..].trim().to_owned()));
        }

        if let (Some((key, value)), Some(section)) = (current.take(), &section) {
            cfg.store(section, &key, value);
        }

        Ok(cfg)
    }

    fn store(&mut self, section: &str, key: &str, value: String) {
        match (section, key) {
            ("metadata", "name") => self.metadata.name = Some(value),
            ("metadata", "version") => self.metadata.version = Some(value),
            ("metadata", "url") => self.metadata.url = Some(value),
            ("metadata", "description") => self.metadata.description = Some(value),
            ("options", "install_requires") => self.options.install_requires = parse_list(&value),
            _ => {}
        }
    }
}

// setuptools splits list values on newlines when any are present, else on commas
fn parse_list(value: &str) -> Vec<String> {
    if value.contains('\n') {
        Either::Left(value.lines())
    } else {
        Either::Right(value.split(','))
    }
    .map(str::trim)
    .filter(|item| !item.is_empty())
    .map_into()
    .collect()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::SetupCfg;

    #[test]
    fn full_config() {
        let cfg = SetupCfg::parse(indoc! {"
            [metadata]
            name = spam
            version = 0.4.1
            url = https://example.org/spam
            description = Lovely spam

            [options]
            zip_safe = False
            install_requires =
                requests
                importlib.metadata
        "})
        .unwrap();

        assert_eq!(cfg.metadata.name.as_deref(), Some("spam"));
        assert_eq!(cfg.metadata.version.as_deref(), Some("0.4.1"));
        assert_eq!(cfg.metadata.url.as_deref(), Some("https://example.org/spam"));
        assert_eq!(cfg.metadata.description.as_deref(), Some("Lovely spam"));
        assert_eq!(
            cfg.options.install_requires,
            ["requests", "importlib.metadata"],
        );
    }

    #[test]
    fn comma_separated_requires() {
        let cfg = SetupCfg::parse(indoc! {"
            [options]
            install_requires = requests, flask>=2.0,
        "})
        .unwrap();

        assert_eq!(cfg.options.install_requires, ["requests", "flask>=2.0"]);
    }

    #[test]
    fn colon_delimiter_and_key_case() {
        let cfg = SetupCfg::parse(indoc! {"
            [metadata]
            Name: spam
            URL: https://example.org
        "})
        .unwrap();

        assert_eq!(cfg.metadata.name.as_deref(), Some("spam"));
        assert_eq!(cfg.metadata.url.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn comments_and_blank_lines() {
        let cfg = SetupCfg::parse(indoc! {"
            # build metadata
            [metadata]
            name = spam

            [options]
            install_requires =
                requests
                ; transitive pin
                # cytoolz replaces toolz here
                cytoolz
        "})
        .unwrap();

        assert_eq!(cfg.metadata.name.as_deref(), Some("spam"));
        assert_eq!(cfg.options.install_requires, ["requests", "cytoolz"]);
    }

    #[test]
    fn multiline_scalar_value() {
        let cfg = SetupCfg::parse(indoc! {"
            [metadata]
            description = first line
                second line
        "})
        .unwrap();

        assert_eq!(
            cfg.metadata.description.as_deref(),
            Some("first line\nsecond line"),
        );
    }

    #[test]
    fn unknown_sections_and_keys_are_ignored() {
        let cfg = SetupCfg::parse(indoc! {"
            [metadata]
            name = spam
            author = somebody

            [options.extras_require]
            test = pytest

            [flake8]
            max-line-length = 100
        "})
        .unwrap();

        assert_eq!(cfg.metadata.name.as_deref(), Some("spam"));
        assert!(cfg.options.install_requires.is_empty());
    }

    #[test]
    fn empty_value() {
        let cfg = SetupCfg::parse("[metadata]\ndescription =\n").unwrap();
        assert_eq!(cfg.metadata.description.as_deref(), Some(""));
    }

    #[test]
    fn empty_input() {
        assert_eq!(SetupCfg::parse("").unwrap(), SetupCfg::default());
    }

    #[test]
    fn rejects_option_before_section() {
        let err = SetupCfg::parse("name = spam\n").unwrap_err();
        assert!(err.to_string().contains("before any section header"));
    }

    #[test]
    fn rejects_naked_line() {
        let err = SetupCfg::parse("[metadata]\njust some words\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_malformed_header() {
        assert!(SetupCfg::parse("[metadata\nname = spam\n").is_err());
    }

    #[test]
    fn rejects_duplicate_option() {
        let err = SetupCfg::parse(indoc! {"
            [metadata]
            name = spam
            name = eggs
        "})
        .unwrap_err();

        assert!(err.to_string().contains("duplicate option `name`"));
    }

    #[test]
    fn rejects_duplicate_section() {
        let err = SetupCfg::parse(indoc! {"
            [metadata]
            name = spam

            [metadata]
            version = 1.0
        "})
        .unwrap_err();

        assert!(err.to_string().contains("duplicate section"));
    }

    #[test]
    fn rejects_leading_continuation() {
        let err = SetupCfg::parse("    dangling\n").unwrap_err();
        assert!(err.to_string().contains("continuation line"));
    }
}
