//! Ion and subgroup resolution, run on one level of groups before inference.

use log::debug;

use crate::error::ParseError;
use crate::group::AtomGroup;
use crate::parser::{element_symbols, parse_groups};
use crate::tables::known_ion;

/// Rewrites `groups` in place so that:
///
/// - any unsolved group written as a known ion becomes that ion's fixed
///   subgroup, keeping its multiplicity;
/// - any leaf whose symbol spans several element symbols becomes a subgroup
///   parsed from that symbol, left for the engine to solve.
///
/// Only this level is touched. Children of the resulting subgroups are
/// resolved when the engine descends into them.
pub fn resolve(groups: &mut [AtomGroup]) -> Result<(), ParseError> {
    for group in groups.iter_mut() {
        if group.is_known() {
            continue;
        }

        if let Some(ion) = known_ion(group.symbol()) {
            debug!("substituting known ion {} (x{})", ion.name, group.count());
            *group = ion.to_group(group.count());
            continue;
        }

        let reparsed = match group {
            AtomGroup::Leaf { symbol, count, .. } if element_symbols(symbol).count() > 1 => {
                debug!("re-parsing multi-element leaf {:?}", symbol);
                let children = parse_groups(symbol)?;
                Some(AtomGroup::composite(symbol.clone(), children, *count))
            }
            _ => None,
        };
        if let Some(subgroup) = reparsed {
            *group = subgroup;
        }
    }
    Ok(())
}
