//! Human-readable reporting of check/satisfies runs (`SPEC_FULL.md` §4.8), grounded on the
//! teacher's `result_print.rs`/`io.rs`: colored per-state output plus an aggregate summary,
//! generalized from Boolean-network valuations to plain initial-state/formula pairs.

use std::io::Write;
use std::time::SystemTime;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::checker::check;
use crate::formula::Phi;
use crate::kripke::{Kripke, State};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrintOptions {
    NoPrint,
    ShortPrint,
    FullPrint,
}

/// Report `phi`'s result over every initial state of `kripke`, at the requested verbosity.
///
/// `ShortPrint` (and above) prints one line per formula saying whether it holds in all initial
/// states; `FullPrint` additionally lists which initial states satisfy it, colored green/red.
pub fn report_satisfies(
    kripke: &Kripke,
    formula_text: &str,
    phi: &Phi,
    print_options: PrintOptions,
    start_time: SystemTime,
) -> bool {
    let results: Vec<(State, bool)> = kripke
        .initial_states()
        .iter()
        .map(|&s| (s, check(kripke, s, phi)))
        .collect();
    let holds = results.iter().all(|&(_, ok)| ok);

    if print_options == PrintOptions::NoPrint {
        return holds;
    }

    println!(
        "{formula_text}: {} ({}ms)",
        if holds { "HOLDS" } else { "FAILS" },
        start_time.elapsed().unwrap_or_default().as_millis()
    );

    if print_options == PrintOptions::FullPrint {
        let mut stdout = StandardStream::stdout(ColorChoice::Always);
        for (s, ok) in &results {
            let color = if *ok { Color::Green } else { Color::Red };
            stdout.set_color(ColorSpec::new().set_fg(Some(color))).ok();
            write!(&mut stdout, "  state {s}: {}", if *ok { "yes" } else { "no" }).ok();
            stdout.reset().ok();
            println!();
        }
    }
    println!("-----");

    holds
}

/// Print an aggregate summary across a batch of formulae, mirroring
/// `result_print::summarize_results`'s shape: how many formulae held out of how many.
pub fn summarize(total: usize, held: usize) {
    println!("{held}/{total} formulae satisfied");
    println!("-----");
}
