//! Forward-chaining oxidation-number inference.
//!
//! Each level of the group tree is solved by a fixed cascade of [`Pass`]es,
//! ordered from least to most ambiguous. When exactly one group is left
//! unknown, charge balance determines it. Subgroups are then solved the same
//! way, using their net charge as the local overall charge.
//!
//! A level that cannot be fully determined is reset entirely: callers see
//! either a completely solved tree or a completely unknown one.

use log::debug;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::error::{Error, Result};
use crate::group::{AtomGroup, Formula, unknown_count};
use crate::resolver::resolve;
use crate::tables::{FIRST_DEGREE, SECOND_DEGREE, is_nonmetal};

/// The inference passes, in the order they run.
#[derive(EnumIter, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Pass {
    /// A lone group carries the whole charge.
    Trivial,
    /// Alkali and alkaline-earth metals, fluorine and similar fixed states.
    FirstDegree,
    /// Hydrogen is +1 next to a nonmetal and -1 next to a metal.
    Hydrogen,
    /// Oxygen, then the halogens.
    SecondDegree,
    /// The last unknown group takes whatever charge is left over.
    ChargeBalance,
}

impl Pass {
    /// Rule passes are skipped once at most one group is unknown.
    fn is_rule(self) -> bool {
        matches!(self, Pass::FirstDegree | Pass::Hydrogen | Pass::SecondDegree)
    }
}

/// Outcome of inference on a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solution {
    /// Every group at every level has an oxidation number.
    Solved,
    /// The rules left more than one group undetermined somewhere; every
    /// oxidation number in the formula has been reset to unknown.
    Unsolved,
}

impl Solution {
    pub fn is_solved(self) -> bool {
        self == Solution::Solved
    }
}

/// Infers oxidation numbers for `formula` in place.
///
/// Known ions are substituted and subgroups resolved on the way down.
/// Errors are limited to malformed multi-element symbols met during
/// resolution and arithmetic overflow; an undeterminable charge system is
/// reported as [`Solution::Unsolved`].
///
/// # Examples
/// ```
/// use oxi_numbers::{engine::{infer, Solution}, parser::parse};
///
/// let mut formula = parse("H2O").unwrap();
/// assert_eq!(infer(&mut formula).unwrap(), Solution::Solved);
/// assert_eq!(formula.groups[0].oxidation(), Some(1));
/// assert_eq!(formula.groups[1].oxidation(), Some(-2));
/// ```
pub fn infer(formula: &mut Formula) -> Result<Solution> {
    solve_level("formula", &mut formula.groups, formula.charge)
}

fn solve_level(label: &str, groups: &mut [AtomGroup], charge: i32) -> Result<Solution> {
    resolve(groups)?;

    for pass in Pass::iter() {
        if pass.is_rule() && unknown_count(groups) <= 1 {
            debug!("[{}] skipping {} pass", label, pass);
            continue;
        }
        match pass {
            Pass::Trivial => assign_trivial(label, groups, charge)?,
            Pass::FirstDegree => assign_fixed(label, groups, FIRST_DEGREE, pass),
            Pass::Hydrogen => assign_hydrogen(label, groups),
            Pass::SecondDegree => assign_fixed(label, groups, SECOND_DEGREE, pass),
            Pass::ChargeBalance => assign_by_balance(label, groups, charge)?,
        }
    }

    let mut solution = if unknown_count(groups) == 0 {
        Solution::Solved
    } else {
        Solution::Unsolved
    };

    if solution.is_solved() {
        for group in groups.iter_mut() {
            if let AtomGroup::Composite {
                label: sub_label,
                children,
                oxidation: Some(net),
                ..
            } = group
            {
                if children.iter().all(AtomGroup::is_solved) {
                    continue;
                }
                debug!("[{}] descending into ({}) with charge {}", label, sub_label, net);
                if solve_level(sub_label, children, *net)? == Solution::Unsolved {
                    solution = Solution::Unsolved;
                    break;
                }
            }
        }
    }

    if solution == Solution::Unsolved {
        debug!("[{}] unsolvable, resetting every oxidation number", label);
        groups.iter_mut().for_each(AtomGroup::clear);
    }
    Ok(solution)
}

/// The group's count as a divisor; zero and oversized counts are errors.
fn weight(group: &AtomGroup, label: &str) -> Result<i32> {
    match group.count() {
        0 => Err(Error::ZeroCount {
            symbol: group.symbol().to_string(),
        }),
        count => i32::try_from(count).map_err(|_| Error::charge_overflow(label)),
    }
}

fn assign_trivial(label: &str, groups: &mut [AtomGroup], charge: i32) -> Result<()> {
    if let [group] = groups {
        if !group.is_known() {
            let value = charge.div_euclid(weight(group, label)?);
            debug!(
                "[{}] {}: {} is the only group -> {}",
                label,
                Pass::Trivial,
                group.symbol(),
                value
            );
            group.set_oxidation(Some(value));
        }
    }
    Ok(())
}

fn assign_fixed(label: &str, groups: &mut [AtomGroup], table: &[(&str, i32)], pass: Pass) {
    for &(symbol, value) in table {
        for index in 0..groups.len() {
            let group = &mut groups[index];
            if group.is_known() || group.symbol() != symbol {
                continue;
            }
            debug!("[{}] {}: {} -> {}", label, pass, symbol, value);
            group.set_oxidation(Some(value));
            if unknown_count(groups) <= 1 {
                return;
            }
        }
    }
}

/// Sign hydrogen takes when bonded to `neighbor`.
fn hydrogen_sign(neighbor: &AtomGroup) -> i32 {
    if neighbor.leading_symbol().is_some_and(is_nonmetal) {
        1
    } else {
        -1
    }
}

fn assign_hydrogen(label: &str, groups: &mut [AtomGroup]) {
    for pos in 0..groups.len() {
        let is_hydrogen = matches!(
            &groups[pos],
            AtomGroup::Leaf { symbol, oxidation: None, .. } if symbol == "H"
        );
        if !is_hydrogen {
            continue;
        }

        // The left neighbor, when there is one, decides.
        let right = groups.get(pos + 1).map(hydrogen_sign);
        let left = pos
            .checked_sub(1)
            .and_then(|i| groups.get(i))
            .map(hydrogen_sign);
        if let Some(value) = left.or(right) {
            debug!("[{}] {}: H at {} -> {}", label, Pass::Hydrogen, pos, value);
            groups[pos].set_oxidation(Some(value));
        }

        if unknown_count(groups) <= 1 {
            break;
        }
    }
}

fn assign_by_balance(label: &str, groups: &mut [AtomGroup], charge: i32) -> Result<()> {
    let overflow = || Error::charge_overflow(label);

    let mut known_sum: i32 = 0;
    let mut missing = None;
    for (index, group) in groups.iter().enumerate() {
        match group.oxidation() {
            Some(value) => {
                known_sum = weight(group, label)?
                    .checked_mul(value)
                    .and_then(|part| known_sum.checked_add(part))
                    .ok_or_else(overflow)?;
            }
            None if missing.is_none() => missing = Some(index),
            // more than one unknown: nothing to balance against
            None => return Ok(()),
        }
    }

    if let Some(index) = missing {
        let count = weight(&groups[index], label)?;
        let remaining = charge.checked_sub(known_sum).ok_or_else(overflow)?;
        let value = remaining.div_euclid(count);
        if remaining.rem_euclid(count) != 0 {
            debug!(
                "[{}] {} left over for {} x{} does not divide evenly",
                label,
                remaining,
                groups[index].symbol(),
                count
            );
        }
        debug!(
            "[{}] {}: {} -> {}",
            label,
            Pass::ChargeBalance,
            groups[index].symbol(),
            value
        );
        groups[index].set_oxidation(Some(value));
    }
    Ok(())
}
