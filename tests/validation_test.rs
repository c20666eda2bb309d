//! Comprehensive unit tests for validation.rs module

use tg_coding_dashboard::models::Category;
use tg_coding_dashboard::validation::RecordValidator;

#[test]
fn test_validate_id_valid() {
    assert!(RecordValidator::validate_id("msg_1315").is_ok());
}

#[test]
fn test_validate_id_empty() {
    assert!(RecordValidator::validate_id("").is_err());
}

#[test]
fn test_validate_id_whitespace_only() {
    assert!(RecordValidator::validate_id("   ").is_err());
}

#[test]
fn test_validate_id_too_long() {
    let long_id = "a".repeat(129);
    assert!(RecordValidator::validate_id(&long_id).is_err());
}

#[test]
fn test_validate_id_exactly_128_chars() {
    let id = "a".repeat(128);
    assert!(RecordValidator::validate_id(&id).is_ok());
}

#[test]
fn test_validate_id_with_null_byte() {
    assert!(RecordValidator::validate_id("msg\0_1").is_err());
}

#[test]
fn test_validate_id_with_newline() {
    assert!(RecordValidator::validate_id("msg\n_1").is_err());
}

#[test]
fn test_validate_intensity_valid_levels() {
    for level in 1..=5 {
        assert!(RecordValidator::validate_intensity(level).is_ok());
    }
}

#[test]
fn test_validate_intensity_zero() {
    assert!(RecordValidator::validate_intensity(0).is_err());
}

#[test]
fn test_validate_intensity_above_scale() {
    assert!(RecordValidator::validate_intensity(6).is_err());
}

#[test]
fn test_parse_categories_single() {
    let categories =
        RecordValidator::parse_categories("Masculinity & Gender Backlash").expect("parse");
    assert_eq!(categories, vec![Category::MasculinityBacklash]);
}

#[test]
fn test_parse_categories_multiple_with_spaces() {
    let categories = RecordValidator::parse_categories(
        "SRHR & Moral Panic; Gender Ideology Conspiracy Narratives",
    )
    .expect("parse");
    assert_eq!(
        categories,
        vec![Category::SrhrMoralPanic, Category::ConspiracyNarratives]
    );
}

#[test]
fn test_parse_categories_empty_string() {
    let categories = RecordValidator::parse_categories("").expect("parse");
    assert!(categories.is_empty());
}

#[test]
fn test_parse_categories_unknown_fails() {
    assert!(RecordValidator::parse_categories("Sports Commentary").is_err());
}

#[test]
fn test_parse_categories_deduplicates() {
    let categories = RecordValidator::parse_categories(
        "Anti-Feminist Rhetoric; Anti-Feminist Rhetoric",
    )
    .expect("parse");
    assert_eq!(categories.len(), 1);
}

#[test]
fn test_parse_labels_markers() {
    let labels = RecordValidator::parse_labels("sin; immoral; against God");
    assert_eq!(
        labels,
        vec![
            "sin".to_string(),
            "immoral".to_string(),
            "against God".to_string()
        ]
    );
}

#[test]
fn test_parse_labels_empty() {
    assert!(RecordValidator::parse_labels("").is_empty());
    assert!(RecordValidator::parse_labels(" ; ; ").is_empty());
}

#[test]
fn test_validate_top_n_bounds() {
    assert!(RecordValidator::validate_top_n(0).is_err());
    assert!(RecordValidator::validate_top_n(10).is_ok());
    assert!(RecordValidator::validate_top_n(1000).is_ok());
    assert!(RecordValidator::validate_top_n(1001).is_err());
}

#[test]
fn test_validate_bin_count_bounds() {
    assert!(RecordValidator::validate_bin_count(0).is_err());
    assert!(RecordValidator::validate_bin_count(30).is_ok());
    assert!(RecordValidator::validate_bin_count(501).is_err());
}

#[test]
fn test_sanitize_text_strips_control_chars() {
    let sanitized = RecordValidator::sanitize_text("  hello\u{0} world\u{7}  ");
    assert_eq!(sanitized, "hello world");
}

#[test]
fn test_sanitize_text_keeps_newlines_and_tabs() {
    let sanitized = RecordValidator::sanitize_text("line one\nline\ttwo");
    assert_eq!(sanitized, "line one\nline\ttwo");
}
