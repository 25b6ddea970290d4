//! Oxidation numbers for condensed chemical formulas.
//!
//! Formula text such as `Ca(NO3)2` or `SO4 2-` is parsed into a tree of atom
//! groups, known polyatomic ions are substituted, and a cascade of fixed
//! rules plus charge balance assigns every atom its oxidation number. The
//! result renders as a two-line diagram:
//!
//! ```text
//! 6 -2
//! S  O₄²⁻
//! ```

pub mod engine;
pub mod error;
pub mod group;
pub mod parser;
pub mod render;
pub mod resolver;
pub mod tables;

pub use engine::{Pass, Solution, infer};
pub use error::{Error, ParseError, Result};
pub use group::{AtomGroup, Formula};
pub use parser::parse;
pub use render::{RenderOptions, render, render_with};

/// Parses `text` and infers its oxidation numbers.
///
/// An unsolvable formula is returned with [`Solution::Unsolved`] and every
/// oxidation number unknown.
pub fn oxidation_numbers(text: &str) -> Result<(Formula, Solution)> {
    let mut formula = parse(text)?;
    let solution = infer(&mut formula)?;
    Ok((formula, solution))
}

/// Parses, solves and renders `text` in one step.
///
/// # Examples
/// ```
/// let diagram = oxi_numbers::oxidation_diagram("CaH2").unwrap();
/// assert_eq!(diagram, "2  -1\nCa  H₂");
/// ```
pub fn oxidation_diagram(text: &str) -> Result<String> {
    oxidation_diagram_with(text, &RenderOptions::default())
}

pub fn oxidation_diagram_with(text: &str, options: &RenderOptions) -> Result<String> {
    let (formula, _) = oxidation_numbers(text)?;
    Ok(render_with(&formula, options))
}
