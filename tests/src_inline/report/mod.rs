use super::*;

#[test]
fn test_slugify_categories() {
    assert_eq!(slugify("white"), "white");
    assert_eq!(slugify("Black or African American"), "black_or_african_american");
    assert_eq!(slugify("  not reported "), "not_reported");
    assert_eq!(slugify("a/b -- c"), "a_b_c");
    assert_eq!(slugify("--"), "category");
}

#[test]
fn test_quantiles_use_upper_index() {
    let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
    assert_eq!(median(&values), 6.0);
    assert_eq!(p90(&values), 10.0);
    assert_eq!(median(&[0.7]), 0.7);
    assert_eq!(median(&[]), 0.0);
    // Order of input does not matter.
    assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
}

#[test]
fn test_format_f64_6() {
    assert_eq!(format_f64_6(1.0), "1.000000");
    assert_eq!(format_f64_6(0.9166666666), "0.916667");
}
