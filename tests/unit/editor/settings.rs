use std::io::Cursor;

use super::*;

#[test]
fn defaults_match_a_fresh_editor() {
    let s = EditorSettings::default();
    assert_eq!(s.size_px, 512.0);
    assert_eq!(s.thickness_pct, 50.0);
    assert_eq!(s.rotation_deg, 0.0);
    assert!(!s.overlay);
    assert!(s.font_dir.is_none());
    s.validate().unwrap();
}

#[test]
fn partial_json_fills_in_defaults() {
    let s = EditorSettings::from_reader(Cursor::new(
        r#"{ "thickness_pct": 20, "overlay": true, "overlay_style": { "label": "HELLO" } }"#,
    ))
    .unwrap();
    assert_eq!(s.thickness_pct, 20.0);
    assert_eq!(s.size_px, 512.0);
    assert!(s.overlay);
    assert_eq!(s.overlay_style.label, "HELLO");
    assert_eq!(s.overlay_style.radius, 240.0);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(EditorSettings::from_reader(Cursor::new(r#"{ "thicknes": 20 }"#)).is_err());
}

#[test]
fn out_of_range_values_are_rejected() {
    assert!(matches!(
        EditorSettings::from_reader(Cursor::new(r#"{ "thickness_pct": 120 }"#)),
        Err(IconRingError::Validation(_))
    ));
    assert!(matches!(
        EditorSettings::from_reader(Cursor::new(r#"{ "size_px": -1 }"#)),
        Err(IconRingError::Validation(_))
    ));

    let s = EditorSettings {
        rotation_deg: f64::NAN,
        ..EditorSettings::default()
    };
    assert!(s.validate().is_err());
}

#[test]
fn configured_font_dir_wins() {
    let s = EditorSettings {
        font_dir: Some(PathBuf::from("fonts")),
        ..EditorSettings::default()
    };
    assert_eq!(s.resolved_font_dir(), Some(PathBuf::from("fonts")));
}

#[test]
fn missing_settings_file_reports_the_path() {
    let err = EditorSettings::from_path(Path::new("no/such/settings.json")).unwrap_err();
    assert!(err.to_string().contains("no/such/settings.json"));
}
