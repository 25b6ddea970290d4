use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{LevelFilter, error, info};
use oxi_numbers::render::outline;
use oxi_numbers::{RenderOptions, oxidation_numbers, render_with};

/// Practice questions shown by `--demo`.
const PRACTICE: &[&str] = &[
    "Cl2", "Cl -", "Na", "Na +", "O2", "N2", "Al 3+", "H2O", "NO3 -", "NO2 -", "NO2",
    "Cr2O7 2-", "KCl", "NH3", "CaH2", "SO4 2-", "Na2O2", "SiO2", "CaCl2", "PO4 3-", "MnO2",
    "FeO", "Fe2O3", "H2O2", "CaO", "H2S", "H2(SO4)", "(NH4)Cl", "K3(PO4)", "H(NO3)", "K(NO2)",
];

#[derive(Parser)]
#[command(
    name = "oxi",
    about = "Oxidation numbers for condensed chemical formulas",
    version
)]
struct Cli {
    /// Formula to solve, e.g. `Ca(NO3)2` or `SO4 2-` (words are joined with spaces)
    #[arg(value_name = "FORMULA")]
    formula: Vec<String>,

    /// Print the built-in practice questions, then keep asking
    #[arg(long)]
    demo: bool,

    /// Character used to pad the diagram into alignment
    #[arg(long, value_name = "CHAR", default_value_t = ' ')]
    filler: char,

    /// Also print the solved group tree
    #[arg(long)]
    tree: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let options = RenderOptions::default().with_filler(cli.filler);

    if !cli.formula.is_empty() {
        let query = cli.formula.join(" ");
        let (formula, solution) = oxidation_numbers(query.trim())
            .with_context(|| format!("cannot solve {:?}", query.trim()))?;
        info!("{:?}: {:?}", query.trim(), solution);
        println!("{}", render_with(&formula, &options));
        if cli.tree {
            print!("{}", outline(&formula));
        }
        return Ok(());
    }

    if cli.demo {
        for query in PRACTICE {
            println!("{}\n", answer(query, &options, cli.tree));
        }
    }

    interactive(io::stdin().lock(), io::stdout(), &options, cli.tree)
}

/// Diagram for one query, or a single `ERROR` line when it cannot be solved.
fn answer(query: &str, options: &RenderOptions, tree: bool) -> String {
    match oxidation_numbers(query) {
        Ok((formula, solution)) => {
            info!("{:?}: {:?}", query, solution);
            let mut out = render_with(&formula, options);
            if tree {
                out.push('\n');
                out.push_str(outline(&formula).trim_end());
            }
            out
        }
        Err(e) => {
            error!("{:?}: {}", query, e);
            format!("ERROR: {e}")
        }
    }
}

/// Question/answer loop; blank lines are skipped but still use up a number.
fn interactive<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    options: &RenderOptions,
    tree: bool,
) -> Result<()> {
    let mut lines = input.lines();

    for counter in 1u64.. {
        write!(output, "question {counter} > ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line.context("failed to read from stdin")?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        writeln!(output, "answer {counter}:")?;
        writeln!(output, "{}\n", answer(query, options, tree))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxi_numbers::oxidation_diagram;

    fn session(input: &str) -> String {
        let mut output = Vec::new();
        interactive(input.as_bytes(), &mut output, &RenderOptions::default(), false).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_blank_line_skips_a_question_number() {
        let transcript = session("\nH2O\n");
        assert!(transcript.starts_with("question 1 > question 2 > answer 2:\n"));
        assert!(!transcript.contains("answer 1:"));
        let diagram = oxidation_diagram("H2O").unwrap();
        assert!(transcript.contains(&format!("answer 2:\n{diagram}\n\n")));
        assert!(transcript.ends_with("question 3 > \n"));
    }

    #[test]
    fn test_errors_do_not_end_the_session() {
        let transcript = session("Ca(NO3\nNaCl\n");
        assert!(transcript.contains("answer 1:\nERROR: "));
        let diagram = oxidation_diagram("NaCl").unwrap();
        assert!(transcript.contains(&format!("answer 2:\n{diagram}\n\n")));
    }

    #[test]
    fn test_answer_with_tree() {
        let out = answer("NaCl", &RenderOptions::default(), true);
        let diagram = oxidation_diagram("NaCl").unwrap();
        assert_eq!(out, format!("{diagram}\nNa x1: +1\nCl x1: -1"));
    }
}
