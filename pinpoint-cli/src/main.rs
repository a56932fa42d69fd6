//! pinpoint CLI
//!
//! Reads an HTML document and prints a minimal unique CSS selector for each
//! requested element.
//!
//! - pinpoint page.html                    # every element
//! - pinpoint page.html -s 'li'            # only the matches of a selector
//! - pinpoint --html '<ul><li>a</li></ul>' --json --verify

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use pinpoint_core::{Options, OptionsConfig, unique_selector};
use pinpoint_css::query_selector_all;
use pinpoint_dom::{DomTree, NodeId};
use pinpoint_html::{parse_html_with_issues, tree_to_string};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// pinpoint: minimal unique CSS selectors for HTML elements
#[derive(Parser, Debug)]
#[command(name = "pinpoint")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Selectors for every element of a file
    pinpoint ./index.html

    # Only list items, as JSON lines, checked against the document
    pinpoint ./index.html --select li --json --verify

    # Prefer attributes, never use generated ids
    pinpoint ./index.html --types Attributes,ID,NthChild --exclude '^ember\d+'

    # Parse inline HTML
    pinpoint --html '<ul><li>a</li><li>b</li></ul>'

CONFIG:
    Options are read from ~/.config/pinpoint/config.toml when present,
    or from --config. Flags override the file.
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Only generate selectors for elements matching SELECTOR
    #[arg(short, long, value_name = "SELECTOR", conflicts_with = "all")]
    select: Option<String>,

    /// Generate selectors for every element (the default)
    #[arg(short, long)]
    all: bool,

    /// Selector families to try, in order (ID, Class, Tag, NthChild, Attributes)
    #[arg(short, long, value_name = "TYPES", value_delimiter = ',')]
    types: Option<Vec<String>>,

    /// Attribute names never used in selectors, in addition to the configured ones
    #[arg(long = "ignore-attr", value_name = "NAME")]
    ignore_attr: Vec<String>,

    /// Never use ids or class names matching this regular expression
    #[arg(short, long, value_name = "REGEX")]
    exclude: Option<String>,

    /// Read options from this TOML file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print one JSON object per element
    #[arg(long)]
    json: bool,

    /// Query each generated selector and report any that do not match exactly one element
    #[arg(long)]
    verify: bool,

    /// Print the parsed document tree first
    #[arg(long)]
    tree: bool,

    /// Log the search to stderr (or set `RUST_LOG`)
    #[arg(short, long)]
    verbose: bool,
}

/// One line of `--json` output.
#[derive(Debug, Serialize)]
struct Report<'a> {
    path: String,
    selector: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verified: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = load_options(&cli)?;
    let markup = read_markup(&cli)?;

    let (tree, issues) = parse_html_with_issues(&markup);
    if !issues.is_empty() {
        info!(count = issues.len(), "markup was repaired while parsing");
    }
    if cli.tree {
        print!("{}", tree_to_string(&tree, tree.root()));
    }

    let filter = if cli.all { None } else { cli.select.as_deref() };
    let targets = select_targets(&tree, filter)?;
    debug!(count = targets.len(), "generating selectors");

    let mut failures = 0usize;
    for target in targets {
        let selector = unique_selector(&tree, target, &options);
        let verified = verification(&tree, target, selector.as_deref(), cli.verify);
        if verified == Some(false) {
            failures += 1;
        }

        let report = Report {
            path: tree.node_path(target),
            selector: selector.as_deref(),
            verified,
        };
        if cli.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_report(&report);
        }
    }

    if failures > 0 {
        bail!("{failures} element(s) have no selector that matches them exactly");
    }
    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config file first, then flags on top.
fn load_options(cli: &Cli) -> Result<Options> {
    let config_path = cli
        .config
        .clone()
        .or_else(|| OptionsConfig::default_path().filter(|path| path.exists()));

    let mut config = match config_path {
        Some(path) => OptionsConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => OptionsConfig::default(),
    };

    if let Some(types) = &cli.types {
        config.selector_types.clone_from(types);
    }
    config
        .attributes_to_ignore
        .extend(cli.ignore_attr.iter().cloned());
    if let Some(exclude) = &cli.exclude {
        config.exclude_regex = Some(exclude.clone());
    }

    config.into_options().context("invalid options")
}

fn read_markup(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        return Ok(html.clone());
    }
    let Some(path) = &cli.path else {
        bail!("expected an HTML file or --html");
    };
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn select_targets(tree: &DomTree, selector: Option<&str>) -> Result<Vec<NodeId>> {
    match selector {
        Some(selector) => query_selector_all(tree, tree.root(), selector)
            .with_context(|| format!("invalid --select {selector:?}")),
        None => Ok(tree.elements().collect()),
    }
}

fn verify(tree: &DomTree, target: NodeId, selector: &str) -> bool {
    query_selector_all(tree, tree.root(), selector).is_ok_and(|found| found == [target])
}

/// `None` when verification is off or no selector was produced: exhaustion
/// is a normal outcome, not a mismatch.
fn verification(
    tree: &DomTree,
    target: NodeId,
    selector: Option<&str>,
    enabled: bool,
) -> Option<bool> {
    selector
        .filter(|_| enabled)
        .map(|selector| verify(tree, target, selector))
}

fn print_report(report: &Report<'_>) {
    let status = match report.verified {
        Some(true) => format!(" {}", "ok".green()),
        Some(false) => format!(" {}", "MISMATCH".red().bold()),
        None => String::new(),
    };
    match report.selector {
        Some(selector) => println!(
            "{} {} {}{status}",
            report.path.dimmed(),
            "->".dimmed(),
            selector.green()
        ),
        None => println!(
            "{} {} {}{status}",
            report.path.dimmed(),
            "->".dimmed(),
            "no unique selector".yellow()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinpoint_core::SelectorType;
    use pinpoint_html::parse_html;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pinpoint").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = cli(&["--html", "<p></p>", "--config", "/nonexistent/pinpoint.toml"]);
        let err = load_options(&cli).expect_err("missing file");
        assert!(format!("{err:#}").contains("loading config"));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = cli(&[
            "--html",
            "<p></p>",
            "-t",
            "Tag,nthchild",
            "--ignore-attr",
            "style",
        ]);
        let options = load_options(&cli).expect("options");
        assert_eq!(
            options.selector_types,
            vec![SelectorType::Tag, SelectorType::NthChild]
        );
        assert!(options.attributes_to_ignore.iter().any(|a| a == "style"));
    }

    #[test]
    fn test_bad_exclude_is_an_error() {
        let cli = cli(&["--html", "<p></p>", "--exclude", "("]);
        let err = load_options(&cli).expect_err("bad regex");
        assert!(format!("{err:#}").contains("invalid exclude pattern"));
    }

    #[test]
    fn test_select_and_verify() {
        let tree = parse_html("<ul><li>a</li><li>b</li></ul>");
        let targets = select_targets(&tree, Some("li")).expect("valid selector");
        assert_eq!(targets.len(), 2);
        assert!(verify(&tree, targets[1], "li:nth-child(2)"));
        assert!(!verify(&tree, targets[1], "li"));
        assert!(select_targets(&tree, Some("li >")).is_err());
        assert_eq!(select_targets(&tree, None).expect("all").len(), 3);
    }

    #[test]
    fn test_verify_skips_elements_without_selector() {
        let tree = parse_html("<ul><li>a</li><li>b</li></ul>");
        let options = Options::default().with_selector_types([SelectorType::Tag]);
        let item = select_targets(&tree, Some("li")).expect("valid selector")[0];
        let selector = unique_selector(&tree, item, &options);
        assert_eq!(selector, None);
        assert_eq!(verification(&tree, item, selector.as_deref(), true), None);
        let list = select_targets(&tree, Some("ul")).expect("valid selector")[0];
        let selector = unique_selector(&tree, list, &options);
        assert_eq!(verification(&tree, list, selector.as_deref(), true), Some(true));
        assert_eq!(verification(&tree, list, selector.as_deref(), false), None);
    }

    #[test]
    fn test_select_conflicts_with_all() {
        assert!(Cli::try_parse_from(["pinpoint", "-s", "li", "--all"]).is_err());
    }
}
