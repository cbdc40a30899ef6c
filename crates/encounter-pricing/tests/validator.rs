mod common;

use encounter_core::models::modifier::ModifierId;
use encounter_pricing::validator::{
    available_modifiers, available_modifiers_on, clear_slot, is_slot_enabled, set_slot,
};
use encounter_pricing::{PricingError, Selection, Slot};
use jiff::civil::date;
use rust_decimal_macros::dec;

use common::{code, modifier, office_visit, pricer};

fn ids(selection: &Selection) -> Vec<u64> {
    selection.modifiers().iter().map(|m| m.id.0).collect()
}

fn full_selection() -> Selection {
    let code = office_visit();
    let pricer = pricer();
    let s = Selection::new(code.clone(), &pricer);
    let s = set_slot(&s, Slot::FIRST, &code.modifiers[0], &pricer).unwrap();
    let s = set_slot(&s, Slot::SECOND, &code.modifiers[1], &pricer).unwrap();
    set_slot(&s, Slot::THIRD, &code.modifiers[2], &pricer).unwrap()
}

#[test]
fn slot_index_outside_range_fails_fast() {
    assert_eq!(Slot::new(3), Err(PricingError::InvalidSlot { index: 3 }));
    assert_eq!(Slot::new(usize::MAX), Err(PricingError::InvalidSlot { index: usize::MAX }));
    assert_eq!(Slot::new(2).unwrap(), Slot::THIRD);
}

#[test]
fn slot_deserializes_through_validation() {
    assert_eq!(serde_json::from_str::<Slot>("1").unwrap(), Slot::SECOND);
    assert!(serde_json::from_str::<Slot>("3").is_err());
}

#[test]
fn available_modifiers_never_offers_lmts() {
    let code = office_visit();
    let available = available_modifiers(&code);

    assert_eq!(available.len(), 5);
    assert!(available.iter().all(|m| m.modifier_type.as_str() != "LMTS"));
}

#[test]
fn available_modifiers_on_respects_validity_window() {
    let mut expired = modifier(1, dec!(1), "ADJ");
    expired.end_date = Some(date(2023, 12, 31));
    let mut current = modifier(2, dec!(1), "ADJ");
    current.start_date = Some(date(2024, 1, 1));
    let code = code(1, dec!(10), vec![expired, current, modifier(3, dec!(1), "LMTS")]);

    let available = available_modifiers_on(&code, date(2024, 6, 1));
    let ids: Vec<_> = available.iter().map(|m| m.id.0).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn later_slots_follow_earlier_ones() {
    let code = office_visit();
    let pricer = pricer();
    let empty = Selection::new(code.clone(), &pricer);

    assert!(is_slot_enabled(&empty, Slot::FIRST));
    assert!(!is_slot_enabled(&empty, Slot::SECOND));
    assert!(!is_slot_enabled(&empty, Slot::THIRD));

    let one = set_slot(&empty, Slot::FIRST, &code.modifiers[0], &pricer).unwrap();
    assert!(is_slot_enabled(&one, Slot::SECOND));
    assert!(!is_slot_enabled(&one, Slot::THIRD));

    let two = set_slot(&one, Slot::SECOND, &code.modifiers[1], &pricer).unwrap();
    assert!(is_slot_enabled(&two, Slot::THIRD));
}

#[test]
fn setting_a_disabled_slot_is_rejected() {
    let code = office_visit();
    let pricer = pricer();
    let empty = Selection::new(code.clone(), &pricer);

    let err = set_slot(&empty, Slot::SECOND, &code.modifiers[0], &pricer).unwrap_err();
    assert_eq!(err, PricingError::SlotDisabled { slot: 1 });
}

#[test]
fn setting_first_slot_clears_later_slots() {
    let code = office_visit();
    let pricer = pricer();
    let full = full_selection();
    assert_eq!(ids(&full), vec![1, 2, 3]);

    let reset = set_slot(&full, Slot::FIRST, &code.modifiers[3], &pricer).unwrap();
    assert_eq!(ids(&reset), vec![4]);
    assert_eq!(reset.price(), dec!(200));
}

#[test]
fn setting_middle_slot_clears_only_the_tail() {
    let code = office_visit();
    let full = full_selection();

    let changed = set_slot(&full, Slot::SECOND, &code.modifiers[3], &pricer()).unwrap();
    assert_eq!(ids(&changed), vec![1, 4]);
}

#[test]
fn reselecting_the_same_modifier_in_place_still_truncates() {
    let code = office_visit();
    let full = full_selection();

    let same = set_slot(&full, Slot::FIRST, &code.modifiers[0], &pricer()).unwrap();
    assert_eq!(ids(&same), vec![1]);
}

#[test]
fn set_slot_does_not_mutate_its_input() {
    let code = office_visit();
    let full = full_selection();
    let before = full.clone();

    let _ = set_slot(&full, Slot::FIRST, &code.modifiers[4], &pricer()).unwrap();
    assert_eq!(full, before);
}

#[test]
fn lmts_modifier_is_rejected() {
    let code = office_visit();
    let pricer = pricer();
    let empty = Selection::new(code.clone(), &pricer);

    let err = set_slot(&empty, Slot::FIRST, &code.modifiers[5], &pricer).unwrap_err();
    assert_eq!(err, PricingError::ExcludedModifier { modifier: ModifierId(6) });
}

#[test]
fn modifier_from_another_code_is_rejected() {
    let code = office_visit();
    let pricer = pricer();
    let empty = Selection::new(code.clone(), &pricer);
    let stranger = modifier(77, dec!(1), "ADJ");

    let err = set_slot(&empty, Slot::FIRST, &stranger, &pricer).unwrap_err();
    assert_eq!(
        err,
        PricingError::UnknownModifier {
            code: code.id,
            modifier: ModifierId(77)
        }
    );
}

#[test]
fn caller_copy_of_modifier_is_replaced_by_catalog_copy() {
    let code = office_visit();
    let pricer = pricer();
    let empty = Selection::new(code.clone(), &pricer);
    let mut tampered = code.modifiers[0].clone();
    tampered.amount = dec!(-99);

    let s = set_slot(&empty, Slot::FIRST, &tampered, &pricer).unwrap();
    assert_eq!(s.modifiers()[0].amount, dec!(-10));
    assert_eq!(s.price(), dec!(90));
}

#[test]
fn duplicate_modifier_across_slots_is_rejected() {
    let code = office_visit();
    let pricer = pricer();
    let empty = Selection::new(code.clone(), &pricer);
    let one = set_slot(&empty, Slot::FIRST, &code.modifiers[0], &pricer).unwrap();

    let err = set_slot(&one, Slot::SECOND, &code.modifiers[0], &pricer).unwrap_err();
    assert_eq!(
        err,
        PricingError::DuplicateModifier {
            modifier: ModifierId(1),
            slot: 0
        }
    );
}

#[test]
fn clearing_a_slot_clears_everything_after_it() {
    let pricer = pricer();
    let full = full_selection();

    let cleared = clear_slot(&full, Slot::SECOND, &pricer);
    assert_eq!(ids(&cleared), vec![1]);
    assert_eq!(cleared.price(), dec!(90));

    let none = clear_slot(&full, Slot::FIRST, &pricer);
    assert!(none.modifiers().is_empty());
    assert_eq!(none.price(), dec!(100));
}

#[test]
fn clearing_an_empty_slot_changes_nothing() {
    let code = office_visit();
    let pricer = pricer();
    let empty = Selection::new(code, &pricer);

    let cleared = clear_slot(&empty, Slot::THIRD, &pricer);
    assert_eq!(cleared, empty);
}
