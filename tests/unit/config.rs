use super::*;
use crate::data::aggregate::DedupPolicy;
use crate::foundation::color::Rgba8;

#[test]
fn empty_document_uses_defaults() {
    let cfg = InfographicConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, InfographicConfig::default());
    assert_eq!(cfg.layout.base_circle_size, 250.0);
    assert_eq!(cfg.layout.base_padding, 100.0);
    assert_eq!(cfg.animation.speed, 0.08);
    assert_eq!(cfg.aggregate.max_rivers, 15);
    assert_eq!(cfg.aggregate.dedup, DedupPolicy::Name);
    assert_eq!(cfg.palette.page, Rgba8::rgb(0x00, 0x73, 0xe6));
    assert!(cfg.font.is_none());
}

#[test]
fn partial_sections_override_only_named_fields() {
    let cfg = InfographicConfig::from_json_str(
        r##"{
            "animation": { "speed": 0.2 },
            "aggregate": { "dedup": "name_and_length" },
            "palette": { "spoke": "#ff0000" }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.animation.speed, 0.2);
    assert_eq!(cfg.aggregate.dedup, DedupPolicy::NameAndLength);
    assert_eq!(cfg.aggregate.max_rivers, 15);
    assert_eq!(cfg.palette.spoke, Rgba8::rgb(255, 0, 0));
    assert_eq!(cfg.palette.circle, Palette::default().circle);
    assert_eq!(cfg.theme().palette.spoke, Rgba8::rgb(255, 0, 0));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = InfographicConfig::from_json_str(r#"{ "animaton": {} }"#).unwrap_err();
    assert!(matches!(err, RiverGlyphError::Serde(_)));
}

#[test]
fn invalid_values_fail_validation() {
    assert!(InfographicConfig::from_json_str(r#"{ "animation": { "speed": 0 } }"#).is_err());
    assert!(InfographicConfig::from_json_str(r#"{ "aggregate": { "max_rivers": 0 } }"#).is_err());
    assert!(
        InfographicConfig::from_json_str(r#"{ "layout": { "base_circle_size": -1 } }"#).is_err()
    );
}

#[test]
fn relative_font_resolves_against_config_dir() {
    let dir = std::path::PathBuf::from("target").join("config_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cfg.json");
    std::fs::write(&path, r#"{ "font": "fonts/Inter.ttf" }"#).unwrap();

    let cfg = InfographicConfig::from_path(&path).unwrap();
    assert_eq!(cfg.font, Some(dir.join("fonts/Inter.ttf")));
}

#[test]
fn missing_config_file_is_an_error() {
    assert!(InfographicConfig::from_path(Path::new("no/such/config.json")).is_err());
}
