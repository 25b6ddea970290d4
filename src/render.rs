//! Text rendering of a solved formula.
//!
//! The diagram has two lines: oxidation numbers on top, element symbols with
//! subscript counts and a superscript charge below. Every number sits above
//! the first letter of its element.

use crate::group::{AtomGroup, Formula};

/// Glyph shown in place of an unknown oxidation number.
pub const UNKNOWN: &str = "?";

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Options controlling the diagram layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Character used to pad tokens into alignment.
    pub filler: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { filler: ' ' }
    }
}

impl RenderOptions {
    /// Use `filler` for alignment padding.
    pub fn with_filler(mut self, filler: char) -> Self {
        self.filler = filler;
        self
    }
}

/// Renders `formula` with the default options.
///
/// # Examples
/// ```
/// use oxi_numbers::{engine::infer, parser::parse, render::render};
///
/// let mut formula = parse("H2O").unwrap();
/// infer(&mut formula).unwrap();
/// assert_eq!(render(&formula), "1  -2\nH₂  O");
/// ```
pub fn render(formula: &Formula) -> String {
    render_with(formula, &RenderOptions::default())
}

pub fn render_with(formula: &Formula, options: &RenderOptions) -> String {
    let mut numbers = Vec::new();
    let mut elements = Vec::new();
    collect_tokens(&formula.groups, &mut numbers, &mut elements);

    let filler = options.filler;
    let mut upper = String::new();
    let mut lower = String::new();
    for (number, element) in numbers.iter().zip(elements.iter()) {
        let (number, element) = align(number, &format!("{element}{filler}"), filler);
        upper.push_str(&number);
        lower.push_str(&element);
    }

    let upper = upper.trim_end_matches(filler);
    let lower = lower.trim_end_matches(filler);
    format!("{}\n{}{}", upper, subscript(lower), charge_suffix(formula.charge))
}

/// Flattens the tree into parallel number and element tokens.
fn collect_tokens(groups: &[AtomGroup], numbers: &mut Vec<String>, elements: &mut Vec<String>) {
    for group in groups {
        match group {
            AtomGroup::Leaf {
                symbol,
                count,
                oxidation,
            } => {
                numbers.push(oxidation.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string()));
                elements.push(with_count(symbol, *count));
            }
            AtomGroup::Composite {
                children, count, ..
            } => {
                let first = elements.len();
                collect_tokens(children, numbers, elements);
                if elements.len() > first {
                    elements[first].insert(0, '(');
                    if let Some(last) = elements.last_mut() {
                        *last = with_count(&format!("{last})"), *count);
                    }
                }
            }
        }
    }
}

fn with_count(text: &str, count: u32) -> String {
    if count >= 2 {
        format!("{text}{count}")
    } else {
        text.to_string()
    }
}

/// Pads a number/element pair so that the number's first digit sits above
/// the element's first capital letter, then evens out their lengths.
fn align(number: &str, element: &str, filler: char) -> (String, String) {
    let number_at = number
        .chars()
        .position(|c| c.is_ascii_digit() || UNKNOWN.starts_with(c))
        .unwrap_or(0);
    let letter_at = element
        .chars()
        .position(|c| c.is_ascii_uppercase())
        .unwrap_or(0);

    let mut number = number.to_string();
    let mut element = element.to_string();
    if number_at < letter_at {
        number = pad_front(&number, letter_at - number_at, filler);
    } else {
        element = pad_front(&element, number_at - letter_at, filler);
    }

    let (number_len, element_len) = (number.chars().count(), element.chars().count());
    let width = number_len.max(element_len);
    number.extend(std::iter::repeat_n(filler, width - number_len));
    element.extend(std::iter::repeat_n(filler, width - element_len));
    (number, element)
}

fn pad_front(text: &str, by: usize, filler: char) -> String {
    std::iter::repeat_n(filler, by).chain(text.chars()).collect()
}

fn subscript(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => SUBSCRIPT_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Superscript charge: `⁺`/`⁻` for ±1, `²⁻` style otherwise, empty for 0.
pub fn charge_suffix(charge: i32) -> String {
    let sign = match charge {
        0 => return String::new(),
        c if c > 0 => '⁺',
        _ => '⁻',
    };
    let magnitude = charge.unsigned_abs();
    let mut suffix = String::new();
    if magnitude != 1 {
        suffix.extend(
            magnitude
                .to_string()
                .chars()
                .filter_map(|c| c.to_digit(10))
                .map(|d| SUPERSCRIPT_DIGITS[d as usize]),
        );
    }
    suffix.push(sign);
    suffix
}

/// Indented listing of the tree, one group per line, for diagnostics.
pub fn outline(formula: &Formula) -> String {
    let mut out = String::new();
    outline_level(&formula.groups, 0, &mut out);
    out
}

fn outline_level(groups: &[AtomGroup], depth: usize, out: &mut String) {
    for group in groups {
        let value = group
            .oxidation()
            .map_or_else(|| UNKNOWN.to_string(), |v| format!("{v:+}"));
        let name = if group.is_composite() {
            format!("({})", group.symbol())
        } else {
            group.symbol().to_string()
        };
        out.push_str(&format!(
            "{:indent$}{} x{}: {}\n",
            "",
            name,
            group.count(),
            value,
            indent = depth * 2
        ));
        outline_level(group.children(), depth + 1, out);
    }
}
