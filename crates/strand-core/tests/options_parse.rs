use proptest::prelude::*;
use strand_core::{OptionValue, Options, ReportError};

#[test]
fn assignments_are_typed() {
    let options =
        Options::from_assignments(["interval=0.5", "plane=1 0 0, -2", "label=actin"]).unwrap();
    assert_eq!(options.get("interval"), Some(&OptionValue::Number(0.5)));
    assert_eq!(
        options.get("plane"),
        Some(&OptionValue::Vector(vec![1.0, 0.0, 0.0, -2.0]))
    );
    assert_eq!(options.get("label"), Some(&OptionValue::Text("actin".into())));
}

#[test]
fn missing_keys_use_defaults() {
    let options = Options::new();
    assert_eq!(options.number_or("interval", 1.0).unwrap(), 1.0);
    assert_eq!(options.positive_or("max", 10.0).unwrap(), 10.0);
    assert!(options.vector("plane").unwrap().is_none());
    assert!(options.flag_or("details", true).unwrap());
}

#[test]
fn wrong_types_are_invalid_parameters() {
    let options = Options::new().with("interval", "wide").with("details", vec![1.0, 2.0]);
    assert!(matches!(
        options.number_or("interval", 1.0),
        Err(ReportError::InvalidParameter(_))
    ));
    assert!(matches!(
        options.flag_or("details", true),
        Err(ReportError::InvalidParameter(_))
    ));
}

#[test]
fn non_positive_values_are_rejected() {
    let options = Options::new().with("interval", 0.0).with("max", -1.0);
    assert!(options.positive_or("interval", 1.0).is_err());
    assert!(options.positive_or("max", 10.0).is_err());
}

#[test]
fn malformed_assignment_is_rejected() {
    let mut options = Options::new();
    assert!(options.parse_assignment("interval").is_err());
    assert!(options.parse_assignment("=3").is_err());
    assert!(options.is_empty());
}

#[test]
fn yaml_style_values_deserialize() {
    let options: Options =
        serde_json::from_str(r#"{"interval": 2, "plane": [0, 1, 0], "details": false}"#).unwrap();
    assert_eq!(options.number_or("interval", 1.0).unwrap(), 2.0);
    assert_eq!(options.get("details"), Some(&OptionValue::Flag(false)));
    assert!(!options.flag_or("details", true).unwrap());
    assert_eq!(options.vector("plane").unwrap(), Some(vec![0.0, 1.0, 0.0]));
}

proptest! {
    #[test]
    fn scalars_parse_back(value in -1.0e6f64..1.0e6) {
        let parsed = OptionValue::parse(&value.to_string());
        prop_assert_eq!(parsed, OptionValue::Number(value));
    }
}
