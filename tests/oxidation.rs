use oxi_numbers::{AtomGroup, Error, ParseError, Solution, oxidation_diagram, oxidation_numbers};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn solved(text: &str) -> Vec<AtomGroup> {
    let (formula, solution) = oxidation_numbers(text).unwrap();
    assert_eq!(solution, Solution::Solved, "{text} should be solvable");
    assert_balanced(&formula.groups, i64::from(formula.charge), text);
    formula.groups
}

/// Charge balance at this level and every subgroup level below it.
fn assert_balanced(groups: &[AtomGroup], charge: i64, text: &str) {
    let sum: i64 = groups.iter().map(|g| g.contribution().unwrap()).sum();
    assert_eq!(sum, charge, "{text}: level does not balance");
    for group in groups.iter().filter(|g| g.is_composite()) {
        assert_balanced(
            group.children(),
            i64::from(group.oxidation().unwrap()),
            text,
        );
    }
}

fn top_level(text: &str) -> Vec<(String, i32)> {
    solved(text)
        .iter()
        .map(|g| (g.symbol().to_string(), g.oxidation().unwrap()))
        .collect()
}

fn pairs(expected: &[(&str, i32)]) -> Vec<(String, i32)> {
    expected.iter().map(|&(s, v)| (s.to_string(), v)).collect()
}

// ---------------------------------------------------------------------------
// 1. Practice questions
// ---------------------------------------------------------------------------

#[test]
fn practice_questions() {
    let cases: &[(&str, &[(&str, i32)])] = &[
        ("Cl2", &[("Cl", 0)]),
        ("Cl -", &[("Cl", -1)]),
        ("Na", &[("Na", 0)]),
        ("Na +", &[("Na", 1)]),
        ("O2", &[("O", 0)]),
        ("N2", &[("N", 0)]),
        ("Al 3+", &[("Al", 3)]),
        ("H2O", &[("H", 1), ("O", -2)]),
        ("NO3 -", &[("N", 5), ("O", -2)]),
        ("NO2 -", &[("N", 3), ("O", -2)]),
        ("NO2", &[("N", 4), ("O", -2)]),
        ("Cr2O7 2-", &[("Cr", 6), ("O", -2)]),
        ("KCl", &[("K", 1), ("Cl", -1)]),
        ("NH3", &[("N", -3), ("H", 1)]),
        ("CaH2", &[("Ca", 2), ("H", -1)]),
        ("SO4 2-", &[("S", 6), ("O", -2)]),
        ("Na2O2", &[("Na", 1), ("O", -1)]),
        ("SiO2", &[("Si", 4), ("O", -2)]),
        ("CaCl2", &[("Ca", 2), ("Cl", -1)]),
        ("PO4 3-", &[("P", 5), ("O", -2)]),
        ("MnO2", &[("Mn", 4), ("O", -2)]),
        ("FeO", &[("Fe", 2), ("O", -2)]),
        ("Fe2O3", &[("Fe", 3), ("O", -2)]),
        ("H2O2", &[("H", 1), ("O", -1)]),
        ("CaO", &[("Ca", 2), ("O", -2)]),
        ("H2S", &[("H", 1), ("S", -2)]),
        ("H2(SO4)", &[("H", 1), ("SO4", -2)]),
        ("(NH4)Cl", &[("NH4", 1), ("Cl", -1)]),
        ("K3(PO4)", &[("K", 1), ("PO4", -3)]),
        ("H(NO3)", &[("H", 1), ("NO3", -1)]),
        ("K(NO2)", &[("K", 1), ("NO2", -1)]),
    ];

    for (text, expected) in cases {
        assert_eq!(top_level(text), pairs(expected), "{text}");
    }
}

// ---------------------------------------------------------------------------
// 2. Subgroups
// ---------------------------------------------------------------------------

#[test]
fn nitrate_subgroup_is_resolved_internally() {
    let groups = solved("Ca(NO3)2");
    assert_eq!(groups[0].oxidation(), Some(2));

    let nitrate = &groups[1];
    assert_eq!(nitrate.count(), 2);
    assert_eq!(nitrate.oxidation(), Some(-1));
    let inner: Vec<_> = nitrate
        .children()
        .iter()
        .map(|g| (g.symbol(), g.count(), g.oxidation()))
        .collect();
    assert_eq!(inner, vec![("N", 1, Some(5)), ("O", 3, Some(-2))]);
}

#[test]
fn unlisted_subgroups_are_solved_by_balance() {
    let groups = solved("Ba(ClO4)2");
    assert_eq!(groups[1].oxidation(), Some(-1));
    assert_eq!(groups[1].children()[0].oxidation(), Some(7));

    let groups = solved("Fe(OH)3");
    assert_eq!(groups[0].oxidation(), Some(3));

    let groups = solved("(NH4)2(Cr2O7)");
    assert_eq!(groups[0].oxidation(), Some(1));
    assert_eq!(groups[1].oxidation(), Some(-2));
    assert_eq!(groups[1].children()[0].oxidation(), Some(6));
}

#[test]
fn nested_subgroups_recurse() {
    let groups = solved("Na2((ClO3)2)");
    let outer = &groups[1];
    assert_eq!(outer.oxidation(), Some(-2));
    let chlorate = &outer.children()[0];
    assert_eq!(chlorate.oxidation(), Some(-1));
    assert_eq!(chlorate.children()[0].oxidation(), Some(5));
}

// ---------------------------------------------------------------------------
// 3. Unsolvable formulas and errors
// ---------------------------------------------------------------------------

#[test]
fn unsolvable_formula_renders_placeholders() {
    let (formula, solution) = oxidation_numbers("CS2").unwrap();
    assert_eq!(solution, Solution::Unsolved);
    assert!(!formula.is_solved());
    assert!(formula.groups.iter().all(|g| g.oxidation().is_none()));
    assert_eq!(oxidation_diagram("CS2").unwrap(), "? ?\nC S₂");
}

#[test]
fn unsolvable_keeps_no_partial_results() {
    let (formula, solution) = oxidation_numbers("Na2(SiC)").unwrap();
    assert_eq!(solution, Solution::Unsolved);
    assert_eq!(formula.groups[0].oxidation(), None);
    assert_eq!(formula.groups[1].oxidation(), None);
}

#[test]
fn parse_errors_surface() {
    assert_eq!(
        oxidation_numbers("Ca(NO3").unwrap_err(),
        Error::Parse(ParseError::UnclosedParen { pos: 2 })
    );
    assert_eq!(
        oxidation_diagram("").unwrap_err(),
        Error::Parse(ParseError::EmptyInput)
    );
}

// ---------------------------------------------------------------------------
// 4. Rendering
// ---------------------------------------------------------------------------

#[test]
fn diagrams() {
    assert_eq!(oxidation_diagram("H2O").unwrap(), "1  -2\nH₂  O");
    assert_eq!(oxidation_diagram("SO4 2-").unwrap(), "6 -2\nS  O₄²⁻");
    assert_eq!(oxidation_diagram("Al 3+").unwrap(), "3\nAl³⁺");
    assert_eq!(
        oxidation_diagram("Ca(NO3)2").unwrap(),
        "2   5 -2\nCa (N  O₃)₂"
    );
}

#[test]
fn deterministic_output() {
    for text in ["Ca(NO3)2", "Cr2O7 2-", "CS2", "(NH4)Cl"] {
        assert_eq!(oxidation_numbers(text), oxidation_numbers(text));
        assert_eq!(oxidation_diagram(text), oxidation_diagram(text));
    }
}
