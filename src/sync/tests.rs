#[cfg(test)]
mod tests {
    use super::super::field::{FieldSpec, Representation, UnitField};
    use super::super::observer::{ChannelObserver, FnObserver};
    use super::super::synchronizer::{AuxRule, EditStatus, FieldSynchronizer};
    use crate::error::CalcError;
    use crate::quantity::{AuxParams, AuxValue, Quantity};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;

    /// Canonical metres, with a "scale" aux parameter on the last field.
    fn create_test_widget() -> FieldSynchronizer {
        let mut sync = FieldSynchronizer::new("test", AuxParams::new().with("scale", 2.0));
        sync.register(Box::new(UnitField::new("m", "Metres", 1.0)))
            .unwrap()
            .register(Box::new(UnitField::new("cm", "Centimetres", 100.0)))
            .unwrap()
            .register(Box::new(UnitField::with_factor("scaled", "Scaled", |aux| {
                aux.number("scale")
            })))
            .unwrap()
            .register(Box::new(UnitField::new("label", "Label", 1.0).representation(
                Representation::FeetInches {
                    precision_key: "precision".to_string(),
                },
            )))
            .unwrap();
        sync
    }

    #[test]
    fn test_edit_rederives_other_fields() {
        let mut sync = create_test_widget();
        let update = sync.on_field_edit("m", "1.5").unwrap();

        assert_eq!(update.status, EditStatus::Applied);
        assert_eq!(update.canonical, Some(1.5));
        assert_eq!(update.display["m"], "1.5");
        assert_eq!(update.display["cm"], "150");
        assert_eq!(update.display["scaled"], "3");
    }

    #[test]
    fn test_edited_field_keeps_raw_text() {
        let mut sync = create_test_widget();
        let update = sync.on_field_edit("cm", "150.").unwrap();
        assert_eq!(update.display["cm"], "150.");
        assert_eq!(update.display["m"], "1.5");
        assert_eq!(sync.editing(), Some("cm"));

        let update = sync.on_field_blur("cm").unwrap();
        assert_eq!(update.status, EditStatus::Rederived);
        assert_eq!(update.display["cm"], "150");
        assert_eq!(sync.editing(), None);
    }

    #[test]
    fn test_editing_another_field_reformats_previous() {
        let mut sync = create_test_widget();
        sync.on_field_edit("cm", "150.0").unwrap();
        let update = sync.on_field_edit("m", "2").unwrap();
        assert_eq!(update.display["cm"], "200");
        assert_eq!(update.display["m"], "2");
    }

    #[test]
    fn test_blank_edit_clears_everything() {
        let mut sync = create_test_widget();
        sync.on_field_edit("m", "3").unwrap();
        let update = sync.on_field_edit("m", "  ").unwrap();

        assert_eq!(update.status, EditStatus::Cleared);
        assert_eq!(update.canonical, None);
        assert!(update.display.values().all(|v| v.trim().is_empty()));
    }

    #[test]
    fn test_zero_converts_normally() {
        let mut sync = create_test_widget();
        let update = sync.on_field_edit("m", "0").unwrap();
        assert_eq!(update.status, EditStatus::Applied);
        assert_eq!(update.display["cm"], "0");
        assert_eq!(update.display["scaled"], "0");
    }

    #[test]
    fn test_invalid_text_is_a_silent_no_op() {
        let mut sync = create_test_widget();
        sync.on_field_edit("m", "2").unwrap();
        sync.on_field_blur("m").unwrap();
        let before = sync.display().clone();

        for raw in ["-", ".", "abc", "inf", "NaN", "1..2"] {
            let update = sync.on_field_edit("cm", raw).unwrap();
            assert_eq!(update.status, EditStatus::Rejected, "input {:?}", raw);
            assert_eq!(update.canonical, Some(2.0));
            assert_eq!(update.display["m"], before["m"]);
            assert_eq!(update.display["scaled"], before["scaled"]);
            assert_eq!(update.display["cm"], raw);
        }
    }

    #[test]
    fn test_zero_divisor_yields_empty_result() {
        let mut sync = create_test_widget();
        sync.on_aux_change("scale", Some(AuxValue::Number(0.0)));

        let update = sync.on_field_edit("scaled", "10").unwrap();
        assert_eq!(update.status, EditStatus::Unconvertible);
        assert_eq!(update.canonical, None);
        assert_eq!(update.display["m"], "");
        assert_eq!(update.display["scaled"], "10");

        // the other direction is fine: 5 m at scale 0 is 0 scaled units
        let update = sync.on_field_edit("m", "5").unwrap();
        assert_eq!(update.display["scaled"], "0");
    }

    #[test]
    fn test_missing_aux_blanks_only_dependent_field() {
        let mut sync = create_test_widget();
        sync.on_field_edit("m", "1").unwrap();
        let update = sync.on_aux_text("scale", "");
        assert_eq!(update.display["m"], "1");
        assert_eq!(update.display["cm"], "100");
        assert_eq!(update.display["scaled"], "");
    }

    #[test]
    fn test_hold_rule_keeps_canonical_value() {
        let mut sync = create_test_widget();
        sync.set_aux_rule("scale", AuxRule::Hold);
        sync.on_field_edit("scaled", "8").unwrap();
        assert_eq!(sync.canonical(), Quantity::Value(4.0));

        let update = sync.on_aux_change("scale", Some(AuxValue::Number(4.0)));
        assert_eq!(update.canonical, Some(4.0));
        assert_eq!(update.display["scaled"], "16");
        assert_eq!(update.display["m"], "4");
    }

    #[test]
    fn test_preserve_rule_keeps_named_field() {
        let mut sync = create_test_widget();
        sync.set_aux_rule("scale", AuxRule::Preserve("scaled".to_string()));
        sync.on_field_edit("scaled", "8").unwrap();

        let update = sync.on_aux_change("scale", Some(AuxValue::Number(4.0)));
        assert_eq!(update.display["scaled"], "8");
        assert_eq!(update.canonical, Some(2.0));
        assert_eq!(update.display["m"], "2");
    }

    #[test]
    fn test_preserve_rule_with_unknown_field_holds() {
        let mut sync = create_test_widget();
        sync.set_aux_rule("scale", AuxRule::Preserve("nope".to_string()));
        sync.on_field_edit("m", "3").unwrap();
        let update = sync.on_aux_change("scale", Some(AuxValue::Number(10.0)));
        assert_eq!(update.canonical, Some(3.0));
    }

    #[test]
    fn test_rederive_is_idempotent() {
        let mut sync = create_test_widget();
        sync.on_field_edit("cm", "123.456").unwrap();
        let first = sync.rederive();
        let second = sync.rederive();
        assert_eq!(first.display, second.display);
        assert_eq!(first.canonical, second.canonical);
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut sync = create_test_widget();
        sync.on_field_edit("m", "3").unwrap();
        sync.on_aux_change("scale", Some(AuxValue::Number(9.0)));

        let update = sync.clear();
        assert_eq!(update.status, EditStatus::Cleared);
        assert_eq!(update.canonical, None);
        assert_eq!(sync.aux().number("scale").unwrap(), 2.0);
        assert!(update.display.values().all(String::is_empty));
    }

    #[test]
    fn test_unknown_and_read_only_fields() {
        let mut sync = create_test_widget();
        assert!(matches!(
            sync.on_field_edit("furlong", "1"),
            Err(CalcError::UnknownField(_))
        ));
        assert!(matches!(
            sync.on_field_edit("label", "1"),
            Err(CalcError::ReadOnlyField(_))
        ));
        assert!(matches!(
            sync.on_field_blur("furlong"),
            Err(CalcError::UnknownField(_))
        ));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut sync = create_test_widget();
        let result = sync.register(Box::new(UnitField::new("m", "Again", 1.0)));
        assert!(matches!(result, Err(CalcError::Config(_))));
    }

    #[test]
    fn test_observers_receive_every_update() {
        let mut sync = create_test_widget();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        sync.subscribe(Box::new(FnObserver(move |update: &super::super::SyncUpdate| {
            sink.borrow_mut().push(update.status);
        })));

        let (tx, rx) = mpsc::channel();
        sync.subscribe(Box::new(ChannelObserver::new(tx)));

        sync.on_field_edit("m", "1").unwrap();
        sync.on_field_edit("m", "x").unwrap();
        sync.clear();

        assert_eq!(
            *seen.borrow(),
            vec![EditStatus::Applied, EditStatus::Rejected, EditStatus::Cleared]
        );
        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received.len(), 3);
        assert_eq!(received[0].display["cm"], "100");
    }

    #[test]
    fn test_dropped_channel_receiver_is_ignored() {
        let mut sync = create_test_widget();
        let (tx, rx) = mpsc::channel();
        sync.subscribe(Box::new(ChannelObserver::new(tx)));
        drop(rx);

        let update = sync.on_field_edit("m", "1").unwrap();
        assert_eq!(update.status, EditStatus::Applied);
        assert_eq!(update.display["cm"], "100");
    }

    #[test]
    fn test_overflowing_edit_is_unconvertible() {
        let mut sync = create_test_widget();
        sync.on_field_edit("m", "2").unwrap();
        let update = sync.on_field_edit("m", "1e308").unwrap();
        assert_eq!(update.status, EditStatus::Applied);
        assert_eq!(update.display["cm"], "");

        let update = sync.on_field_edit("scaled", "1e308").unwrap();
        assert_eq!(update.status, EditStatus::Applied);
        sync.on_aux_change("scale", Some(AuxValue::Number(1e-10)));
        let update = sync.on_field_edit("scaled", "1e308").unwrap();
        assert_eq!(update.status, EditStatus::Unconvertible);
        assert_eq!(update.canonical, None);
    }

    #[test]
    fn test_field_info() {
        let sync = create_test_widget();
        let info = sync.field_info();
        assert_eq!(info.len(), 4);
        assert_eq!(info[1].id, "cm");
        assert_eq!(info[1].label, "Centimetres");
        assert!(!info[3].editable);
        assert_eq!(sync.fields().filter(|f| f.editable()).count(), 3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn relative_eq(a: f64, b: f64) -> bool {
            (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            // --- Numeric round-trip law ---
            #[test]
            fn unit_round_trip(
                value in -1e9_f64..1e9,
                factor in prop::num::f64::NORMAL.prop_filter("usable", |f| f.abs() > 1e-6 && f.abs() < 1e6),
            ) {
                let field = UnitField::new("f", "F", factor);
                let aux = AuxParams::new();
                let unit = field.to_unit(value, &aux).unwrap();
                let back = field.from_unit(unit, &aux).unwrap();
                prop_assert!(relative_eq(back, value), "{} -> {} -> {}", value, unit, back);
            }

            // --- Display round-trip within display precision ---
            #[test]
            fn display_round_trip(value in 0.0_f64..1e6) {
                let field = UnitField::new("cm", "cm", 100.0);
                let aux = AuxParams::new();
                let text = field.from_canonical(value, &aux).unwrap();
                let back = field.to_canonical(&text, &aux).unwrap();
                // 4 decimals of cm is 5e-7 m
                prop_assert!((back - value).abs() <= 5e-7 + 1e-12 * value);
            }

            // --- Re-deriving twice gives identical strings ---
            #[test]
            fn rederive_idempotent(value in -1e6_f64..1e6) {
                let mut sync = create_test_widget();
                sync.on_field_edit("m", &value.to_string()).unwrap();
                let first = sync.rederive();
                let second = sync.rederive();
                prop_assert_eq!(first.display, second.display);
            }
        }
    }
}
