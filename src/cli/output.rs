//! Handles all user-facing status output for the CLI.
//!
//! Annotated rows go through a [`LineSink`](crate::output::LineSink); this
//! module only prints the colored one-line notices around them.

use std::io::{self, IsTerminal, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::Outcome;

/// Prints the closing status line for a run.
pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Empty => print_notice("The input file is empty."),
        Outcome::Written {
            path,
            rows,
            skipped,
        } => {
            print_success(&format!(
                "Formatted rows have been written to {}.",
                path.display()
            ));
            if *skipped > 0 {
                print_notice(&format!("{skipped} row(s) skipped, {rows} written."));
            }
        }
        Outcome::Printed { rows, skipped } => {
            // stdout carries the rows themselves
            let mut stderr = StandardStream::stderr(color_choice(io::stderr().is_terminal()));
            let _ = writeln!(stderr, "{rows} row(s) formatted, {skipped} skipped.");
        }
    }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn print_success(message: &str) {
    print_colored(Color::Green, message);
}

fn print_notice(message: &str) {
    print_colored(Color::Yellow, message);
}

fn print_colored(color: Color, message: &str) {
    let mut stdout = StandardStream::stdout(color_choice(io::stdout().is_terminal()));
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stdout, "{message}");
    let _ = stdout.reset();
    let _ = writeln!(stdout);
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
