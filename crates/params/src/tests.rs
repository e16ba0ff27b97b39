use crate::traditional::curves::{
    standardized_curve, standardized_curve_by_name, MAX_CURVE_ID, MIN_CURVE_ID,
    STANDARDIZED_CURVES,
};

#[test]
fn test_curve_table_covers_every_id() {
    for id in MIN_CURVE_ID..=MAX_CURVE_ID {
        let curve = standardized_curve(id).expect("id in range must resolve");
        assert_eq!(curve.id, id);
        assert_eq!(curve.h, 1);
    }
    assert_eq!(STANDARDIZED_CURVES.len() as i64, MAX_CURVE_ID - MIN_CURVE_ID + 1);
}

#[test]
fn test_curve_lookup_rejects_out_of_range() {
    assert!(standardized_curve(7).is_none());
    assert!(standardized_curve(19).is_none());
    assert!(standardized_curve(-1).is_none());
}

#[test]
fn test_curve_lookup_by_name() {
    let curve = standardized_curve_by_name("BrainpoolP256R1").unwrap();
    assert_eq!(curve.id, 13);
    assert!(standardized_curve_by_name("curve25519").is_none());
}

#[test]
fn test_coordinates_fit_the_field() {
    for curve in STANDARDIZED_CURVES.iter() {
        let field_hex = curve.p.trim_start_matches('0').len();
        for coordinate in [curve.a, curve.b, curve.gx, curve.gy] {
            assert!(coordinate.trim_start_matches('0').len() <= field_hex, "{}", curve.name);
        }
    }
}
