use bingo_poker::bingo::PatternKind;
use bingo_poker::evaluator::HandCategory;
use bingo_poker::paytable::{best_payout, payout, Bet, PayTable, PayTableError, PayTableSet};
use std::sync::Arc;

const STANDARD: &str = "Standard - Jacks or Better";
const PREMIUM: &str = "Premium - High Risk";
const CONSERVATIVE: &str = "Conservative - Low Risk";

fn registry() -> PayTableSet<HandCategory> {
    PayTableSet::load(vec![
        PayTable::standard().with_default(true),
        PayTable::premium(),
        PayTable::conservative().with_active(false),
    ])
    .unwrap()
}

#[test]
fn standard_multipliers() {
    let t = PayTable::<HandCategory>::standard();
    let expected = [800, 50, 25, 9, 6, 4, 3, 2, 1, 0];
    for (cat, want) in HandCategory::ALL.iter().zip(expected) {
        assert_eq!(t.multiplier(*cat), want, "{cat}");
    }
    let bet = Bet::unbounded(10).unwrap();
    assert_eq!(payout(HandCategory::RoyalFlush, &t, bet), 8000);
    assert_eq!(payout(HandCategory::NoWin, &t, bet), 0);
}

#[test]
fn incomplete_table_is_rejected_with_the_missing_outcome() {
    let entries = PayTable::<HandCategory>::standard()
        .entries()
        .filter(|(k, _)| *k != HandCategory::TwoPair)
        .collect::<Vec<_>>();
    assert_eq!(
        PayTable::new("Short", entries),
        Err(PayTableError::MissingOutcome { table: "Short".into(), outcome: "Two Pair".into() })
    );
}

#[test]
fn load_enforces_default_rules() {
    assert_eq!(
        PayTableSet::<HandCategory>::load(vec![PayTable::standard()]).unwrap_err(),
        PayTableError::NoDefault
    );
    let err = PayTableSet::load(vec![
        PayTable::standard().with_default(true),
        PayTable::premium().with_default(true),
    ])
    .unwrap_err();
    assert!(matches!(err, PayTableError::MultipleDefaults(names) if names.len() == 2));
    assert!(matches!(
        PayTableSet::load(vec![PayTable::standard().with_default(true).with_active(false)]),
        Err(PayTableError::DefaultInactive(_))
    ));
    assert!(matches!(
        PayTableSet::load(vec![PayTable::standard().with_default(true), PayTable::standard()]),
        Err(PayTableError::DuplicateName(_))
    ));
}

#[test]
fn operator_edits_keep_exactly_one_active_default() {
    let mut tables = registry();
    assert_eq!(
        tables.delete(STANDARD),
        Err(PayTableError::DefaultNotDeletable(STANDARD.into()))
    );
    assert_eq!(
        tables.set_active(STANDARD, false),
        Err(PayTableError::DefaultNotDeactivatable(STANDARD.into()))
    );
    assert_eq!(tables.snapshot(CONSERVATIVE), Err(PayTableError::Inactive(CONSERVATIVE.into())));

    tables.set_default(CONSERVATIVE).unwrap();
    let def = tables.default_snapshot();
    assert_eq!(def.name(), CONSERVATIVE);
    assert!(def.is_active() && def.is_default());
    assert_eq!(tables.iter().filter(|t| t.is_default()).count(), 1);

    tables.delete(STANDARD).unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables.default_snapshot().name(), CONSERVATIVE);
}

#[test]
fn duplicate_rename_and_update() {
    let mut tables = registry();
    let copy = tables.duplicate(PREMIUM).unwrap();
    assert_eq!(copy, "Premium - High Risk (copy)");
    let t = tables.get(&copy).unwrap();
    assert!(!t.is_active() && !t.is_default());
    assert_eq!(tables.duplicate(PREMIUM).unwrap(), "Premium - High Risk (copy 2)");

    assert_eq!(tables.rename(&copy, STANDARD), Err(PayTableError::DuplicateName(STANDARD.into())));
    tables.rename(&copy, "High Roller").unwrap();

    let snapshot = tables.snapshot(PREMIUM).unwrap();
    let doubled: Vec<_> = snapshot.entries().map(|(k, m)| (k, m * 2)).collect();
    assert_eq!(tables.update_entries(PREMIUM, doubled), Ok(2));
    assert_eq!(snapshot.multiplier(HandCategory::RoyalFlush), 1200);
    assert_eq!(tables.get(PREMIUM).unwrap().multiplier(HandCategory::RoyalFlush), 2400);
    assert!(!Arc::ptr_eq(&snapshot, &tables.snapshot(PREMIUM).unwrap()));
}

#[test]
fn simultaneous_bingo_patterns_pay_the_best_single_kind() {
    let table = PayTable::new(
        "Lines",
        [(PatternKind::Row, 10), (PatternKind::Column, 12), (PatternKind::Diagonal, 25)],
    )
    .unwrap();
    let bet = Bet::unbounded(2).unwrap();
    assert_eq!(
        best_payout([PatternKind::Row, PatternKind::Column], &table, bet),
        Some((PatternKind::Column, 24))
    );
    assert_eq!(
        best_payout([PatternKind::Row, PatternKind::Diagonal, PatternKind::Row], &table, bet),
        Some((PatternKind::Diagonal, 50))
    );
    assert_eq!(best_payout(Vec::<PatternKind>::new(), &table, bet), None);
}
