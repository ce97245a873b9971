//! CLI front end: model-checks a list of CTL formulae against a JSON-encoded Kripke structure.
//!
//! Shaped after the teacher's `main.rs`/`analysis.rs`: load inputs, parse each formula, run the
//! checker, and print a per-formula summary at the requested verbosity.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;

use clap::builder::PossibleValuesParser;
use clap::Parser;

use ctl_model_checker::formula::parse_ctl;
use ctl_model_checker::ingestion::{load_formulae, load_kripke};
use ctl_model_checker::report::{report_satisfies, summarize, PrintOptions};

/// Explicit-state CTL model checker for finite Kripke structures.
#[derive(Parser)]
#[clap(author = "Ondřej Huvar", version, about = "Explicit-state CTL model checker.")]
struct Arguments {
    /// Path to a JSON file describing the Kripke structure (see the crate docs for the envelope).
    kripke_path: PathBuf,

    /// Path to a file with one CTL formula per line; blank lines and `#` comments are ignored.
    formulae_path: PathBuf,

    /// Choice of how much output to print for each formula.
    #[clap(short, long = "print", default_value = "short", value_parser = PossibleValuesParser::new(["none", "short", "full"]))]
    print: String,
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    let print_options = match args.print.as_str() {
        "none" => PrintOptions::NoPrint,
        "short" => PrintOptions::ShortPrint,
        "full" => PrintOptions::FullPrint,
        // clap's PossibleValuesParser already rejects anything else.
        _ => unreachable!("clap restricts --print to known values"),
    };

    let kripke = match load_kripke(&args.kripke_path) {
        Ok(kripke) => kripke,
        Err(err) => {
            eprintln!("failed to load Kripke structure: {err}");
            return ExitCode::FAILURE;
        }
    };

    let formula_texts = match load_formulae(&args.formulae_path) {
        Ok(texts) => texts,
        Err(err) => {
            eprintln!("failed to load formulae: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut held = 0;
    for text in &formula_texts {
        let phi = match parse_ctl(text) {
            Ok(phi) => phi,
            Err(err) => {
                eprintln!("{text}: {err}");
                continue;
            }
        };
        let start = SystemTime::now();
        if report_satisfies(&kripke, text, &phi, print_options, start) {
            held += 1;
        }
    }

    if print_options != PrintOptions::NoPrint {
        summarize(formula_texts.len(), held);
    }

    ExitCode::SUCCESS
}
