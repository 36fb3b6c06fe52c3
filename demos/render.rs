//! Lays out a sample circuit, applies truth values from the command line and prints
//! the layout, the truth path and (optionally) a Graphviz rendering.
//!
//! Run with:
//!   cargo run --example render -- --set "is a company=T" --set "has paid=T"
//!   cargo run --example render -- --set "is a company=T" --dot > ladder.dot

use clap::Parser;
use color_eyre::eyre::{bail, eyre};
use log::info;

use ladder_rs::circuit::{Circuit, Variable};
use ladder_rs::diagram::{CyclePolicy, LadderDiagram};
use ladder_rs::dot::{BoxStyle, DotConfig};
use ladder_rs::types::TruthValue;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Assign a value to a leaf, as `NAME=T|F|U`.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    assignments: Vec<String>,

    /// Cycle a leaf's value once (as if clicked), by name.
    #[arg(long = "click", value_name = "NAME")]
    clicks: Vec<String>,

    /// Include `Unknown` when cycling values.
    #[arg(long)]
    with_unknown: bool,

    /// Print Graphviz DOT instead of the text layout.
    #[arg(long)]
    dot: bool,

    /// Highlight only the first satisfying branch of every ANY.
    #[arg(long)]
    first_route: bool,

    /// Use square boxes in DOT output.
    #[arg(long)]
    sides: bool,

    /// Log level.
    #[arg(long, default_value = "info")]
    log_level: simplelog::LevelFilter,
}

fn sample_circuit() -> Circuit {
    Circuit::all(vec![
        Circuit::any(vec![
            Circuit::var("is a company", false),
            Circuit::var("is a partnership", false),
            Variable::new("is an individual", false).with_preset(TruthValue::False).into(),
        ]),
        Circuit::var("has paid", false),
        Circuit::any(vec![
            Circuit::var("is exempt", true),
            Circuit::all(vec![Circuit::var("filed late", false), Circuit::var("has waiver", false)]),
        ]),
    ])
}

fn parse_value(s: &str) -> color_eyre::Result<TruthValue> {
    Ok(match s {
        "T" | "t" | "true" => TruthValue::True,
        "F" | "f" | "false" => TruthValue::False,
        "U" | "u" | "unknown" => TruthValue::Unknown,
        "-" | "unset" => TruthValue::Unset,
        _ => bail!("invalid truth value '{}', expected T, F, U or -", s),
    })
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    simplelog::TermLogger::init(
        cli.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let policy = if cli.with_unknown {
        CyclePolicy::WithUnknown
    } else {
        CyclePolicy::TrueFalse
    };
    let mut diagram = LadderDiagram::with_policy(sample_circuit(), policy);
    info!("circuit = {}", diagram.circuit());

    for assignment in &cli.assignments {
        let (name, value) = assignment
            .rsplit_once('=')
            .ok_or_else(|| eyre!("expected NAME=VALUE, got '{}'", assignment))?;
        let id = diagram.leaf_by_text(name).ok_or_else(|| eyre!("no leaf named '{}'", name))?;
        diagram.set_known(id, parse_value(value)?)?;
    }
    for name in &cli.clicks {
        let id = diagram.leaf_by_text(name).ok_or_else(|| eyre!("no leaf named '{}'", name))?;
        let value = diagram.cycle(id)?;
        info!("clicked '{}' -> {}", name, value);
    }

    let witness = diagram.truth_path();
    let witness = match (witness, cli.first_route) {
        (Some(w), true) => Some(w.first_route(diagram.circuit())),
        (w, _) => w,
    };

    if cli.dot {
        let config = DotConfig {
            box_style: if cli.sides { BoxStyle::Sides } else { BoxStyle::Corners },
            ..DotConfig::default()
        };
        print!(
            "{}",
            diagram
                .layout()
                .to_dot_with_config(diagram.circuit(), witness.as_ref(), &config)?
        );
        return Ok(());
    }

    println!("{}", diagram.layout().dump(diagram.circuit()));
    match witness {
        Some(w) => {
            println!("Truth path: {:?}", w);
            println!("Routes: {}", w.route_count(diagram.circuit()));
            println!("Highlighted connectors: {}", diagram.layout().path_connectors(&w).len());
        }
        None => println!("No truth path."),
    }

    Ok(())
}
