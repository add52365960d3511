use akademi_license::{
    DEMO_CODE, LicenseCode, MASK_PLACEHOLDER, is_valid_format, mask, normalize,
};
use pretty_assertions::assert_eq;

#[test]
fn normalize_trims_uppercases_and_strips() {
    assert_eq!(normalize(" sa-demo-2024 "), "SA-DEMO-2024");
    assert_eq!(normalize("sa_1234 5678.9abc"), "SA123456789ABC");
    assert_eq!(normalize("\tSA-ab12-CD34-ef56\n"), "SA-AB12-CD34-EF56");
}

#[test]
fn normalize_uppercases_unicode_like_the_web_client() {
    // dotless ı uppercases into ASCII I; ß expands to SS
    assert_eq!(normalize("sa-ıı12-ab34-cd56"), "SA-II12-AB34-CD56");
    assert_eq!(normalize("straße"), "STRASSE");
    // letters whose uppercase stays outside A-Z are stripped
    assert_eq!(normalize("çağrı"), "ARI");
}

#[test]
fn normalize_is_idempotent_on_samples() {
    for raw in [" sa-demo-2024 ", "weird Input!!", "", "ÇILGIN-kod", "SA-AAAA-BBBB-CCCC"] {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn demo_literal_is_valid() {
    assert!(is_valid_format(DEMO_CODE));
}

#[test]
fn production_grammar_is_valid() {
    assert!(is_valid_format("SA-AAAA-BBBB-CCCC"));
    assert!(is_valid_format("SA-1234-5678-90AB"));
    assert!(is_valid_format("SA-A1B2-C3D4-E5F6"));
}

#[test]
fn deviations_are_rejected() {
    // wrong segment length
    assert!(!is_valid_format("SA-AB-CD-EF"));
    assert!(!is_valid_format("SA-AAAAA-BBBB-CCCC"));
    // lowercase is invalid post-normalization
    assert!(!is_valid_format("sa-aaaa-bbbb-cccc"));
    // missing dashes
    assert!(!is_valid_format("SAAAAABBBBCCCC"));
    // wrong prefix
    assert!(!is_valid_format("SB-AAAA-BBBB-CCCC"));
    // trailing garbage
    assert!(!is_valid_format("SA-AAAA-BBBB-CCCC-DDDD"));
    assert!(!is_valid_format(""));
}

#[test]
fn mask_short_codes_collapse_to_placeholder() {
    assert_eq!(mask(""), MASK_PLACEHOLDER);
    assert_eq!(mask("SA-12"), MASK_PLACEHOLDER);
    assert_eq!(mask("12345678"), MASK_PLACEHOLDER);
}

#[test]
fn mask_keeps_head_and_tail() {
    assert_eq!(mask("SA-AAAA-BBBB-CCCC"), "SA-AAAA…CCCC");
    assert_eq!(mask(DEMO_CODE), "SA-DEMO…2024");
}

#[test]
fn license_code_parse_normalizes_first() {
    let code = LicenseCode::parse(" sa-demo-2024 ").unwrap();
    assert_eq!(code.as_str(), DEMO_CODE);
    assert!(code.is_demo());
}

#[test]
fn license_code_parse_rejects_bad_grammar() {
    // already upper, nothing stripped, still wrong segment lengths
    assert!(LicenseCode::parse("SA-AB-CD-EF").is_err());
}

#[test]
fn license_code_serde_validates_on_deserialize() {
    let code = LicenseCode::parse("SA-AAAA-BBBB-CCCC").unwrap();
    let json = serde_json::to_string(&code).unwrap();
    assert_eq!(json, "\"SA-AAAA-BBBB-CCCC\"");

    let back: LicenseCode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, code);

    let bad: Result<LicenseCode, _> = serde_json::from_str("\"SA-AB-CD-EF\"");
    assert!(bad.is_err());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in ".{0,64}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_output_alphabet_is_closed(raw in ".{0,64}") {
            let out = normalize(&raw);
            prop_assert!(out.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn well_formed_codes_accepted(
            a in "[A-Z0-9]{4}",
            b in "[A-Z0-9]{4}",
            c in "[A-Z0-9]{4}",
        ) {
            let code = format!("SA-{a}-{b}-{c}");
            prop_assert!(is_valid_format(&code));
            prop_assert_eq!(normalize(&code), code.clone());
            prop_assert!(LicenseCode::parse(&code).is_ok());
        }
    }
}
