use pretty_assertions::assert_eq;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use tvm_calc_core::time_value::{
    self, AnnuityInput, CompoundInterestInput, PresentValueInput,
};
use tvm_calc_core::TvmError;

// ===========================================================================
// Compound interest
// ===========================================================================

#[test]
fn test_compound_matches_closed_form() {
    let cases = [
        (dec!(1000), dec!(0.05), dec!(10), 12u32),
        (dec!(2500), dec!(0.08), dec!(3), 4),
        (dec!(10000), dec!(0.03), dec!(30), 1),
        (dec!(750.50), dec!(0.12), dec!(2), 365),
    ];
    for (p, r, t, n) in cases {
        let nd = Decimal::from(n);
        let expected = (p * (Decimal::ONE + r / nd).powd(nd * t)).round_dp(2);
        let got = time_value::compound_interest(p, r, t, n).unwrap();
        assert!(
            (got - expected).abs() <= dec!(0.01),
            "P={p} r={r} t={t} n={n}: expected {expected}, got {got}"
        );
    }
}

#[test]
fn test_compound_zero_rate_identity() {
    for n in [1u32, 4, 12, 365] {
        let result = time_value::compound_interest(dec!(1234.56), dec!(0), dec!(7), n).unwrap();
        assert_eq!(result, dec!(1234.56));
    }
}

#[test]
fn test_compound_zero_time_identity() {
    for r in [dec!(0.01), dec!(0.05), dec!(0.25)] {
        let result = time_value::compound_interest(dec!(1234.56), r, dec!(0), 12).unwrap();
        assert_eq!(result, dec!(1234.56));
    }
}

#[test]
fn test_compound_fractional_years() {
    // 18 months of monthly compounding: 1000 * 1.005^18
    let result = time_value::compound_interest(dec!(1000), dec!(0.06), dec!(1.5), 12).unwrap();
    assert_eq!(result, dec!(1093.93));
}

// ===========================================================================
// Present value
// ===========================================================================

#[test]
fn test_present_value_reference_scenario() {
    let result = time_value::present_value(dec!(1647.01), dec!(0.05), dec!(10), 12).unwrap();
    assert_eq!(result, dec!(1000.00));
}

#[test]
fn test_present_value_zero_rate_identity() {
    let result = time_value::present_value(dec!(999.99), dec!(0), dec!(15), 12).unwrap();
    assert_eq!(result, dec!(999.99));
}

#[test]
fn test_present_value_round_trip() {
    let cases = [
        (dec!(1000), dec!(0.05), dec!(10), 12u32),
        (dec!(5000), dec!(0.07), dec!(5), 4),
        (dec!(123.45), dec!(0.02), dec!(3), 1),
        (dec!(80000), dec!(0.045), dec!(8), 12),
    ];
    for (p, r, t, n) in cases {
        let fv = time_value::compound_interest(p, r, t, n).unwrap();
        let pv = time_value::present_value(fv, r, t, n).unwrap();
        assert!(
            (pv - p).abs() <= dec!(0.01),
            "round trip drifted: P={p} -> FV={fv} -> PV={pv}"
        );
    }
}

#[test]
fn test_present_value_zero_periods() {
    let err = time_value::present_value(dec!(100), dec!(0.05), dec!(1), 0).unwrap_err();
    assert!(matches!(err, TvmError::DivisionByZero { .. }));
}

// ===========================================================================
// Annuity future value
// ===========================================================================

#[test]
fn test_annuity_reference_scenario() {
    let result = time_value::annuity_future_value(dec!(100), dec!(0.06), dec!(5), 12).unwrap();
    assert_eq!(result, dec!(6977.00));
}

#[test]
fn test_annuity_annual_payments() {
    // 1000 * (1.1^3 - 1) / 0.1 = 3310
    let result = time_value::annuity_future_value(dec!(1000), dec!(0.10), dec!(3), 1).unwrap();
    assert_eq!(result, dec!(3310.00));
}

#[test]
fn test_annuity_zero_rate_limit() {
    for (pmt, t, n) in [(dec!(100), dec!(5), 12u32), (dec!(42.5), dec!(2), 4)] {
        let result = time_value::annuity_future_value(pmt, dec!(0), t, n).unwrap();
        assert_eq!(result, pmt * Decimal::from(n) * t);
    }
}

#[test]
fn test_annuity_zero_periods() {
    let err = time_value::annuity_future_value(dec!(100), dec!(0), dec!(5), 0).unwrap_err();
    assert!(matches!(err, TvmError::DivisionByZero { .. }));
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_envelope_carries_intermediates() {
    let input = CompoundInterestInput {
        principal: dec!(1000),
        rate: dec!(0.05),
        time: dec!(10),
        periods_per_year: 12,
    };
    let out = time_value::calculate_compound_interest(&input).unwrap();
    assert_eq!(out.result.value, dec!(1647.01));
    assert_eq!(out.result.total_periods, dec!(120));
    assert!((out.result.growth_factor - dec!(1.647009)).abs() < dec!(0.000001));
    assert!(out.warnings.is_empty());
    assert_eq!(out.assumptions["periods_per_year"], 12);
}

#[test]
fn test_envelope_warns_on_negative_inputs() {
    let input = PresentValueInput {
        future_value: dec!(-500),
        rate: dec!(-0.01),
        time: dec!(2),
        periods_per_year: 1,
    };
    let out = time_value::calculate_present_value(&input).unwrap();
    assert_eq!(out.warnings.len(), 2);
    assert!(out.result.value < Decimal::ZERO);
}

#[test]
fn test_envelope_serializes_decimals_as_strings() {
    let input = AnnuityInput {
        payment: dec!(100),
        rate: dec!(0.06),
        time: dec!(5),
        periods_per_year: 12,
    };
    let out = time_value::calculate_annuity_future_value(&input).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["value"], "6977.00");
}

#[test]
fn test_zero_rate_results_carry_cents() {
    let annuity = AnnuityInput {
        payment: dec!(100),
        rate: dec!(0),
        time: dec!(5),
        periods_per_year: 12,
    };
    let out = time_value::calculate_annuity_future_value(&annuity).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["value"], "6000.00");

    let lump_sum = CompoundInterestInput {
        principal: dec!(1000),
        rate: dec!(0),
        time: dec!(5),
        periods_per_year: 12,
    };
    let out = time_value::calculate_compound_interest(&lump_sum).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["value"], "1000.00");
}

#[test]
fn test_input_deserializes_from_json() {
    let input: CompoundInterestInput = serde_json::from_str(
        r#"{"principal": "1000", "rate": "0.05", "time": "10", "periods_per_year": 12}"#,
    )
    .unwrap();
    assert_eq!(input.periods_per_year, 12);
    assert_eq!(input.principal, dec!(1000));
}
