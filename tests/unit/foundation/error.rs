use super::*;

#[test]
fn display_prefixes_are_stable() {
    let tt = OlaError::TimeTravel {
        now: 1.0,
        start: 2.0,
    };
    assert!(tt.to_string().contains("cannot read in the past"));
    assert!(
        OlaError::unknown_dimension("w")
            .to_string()
            .contains("unknown dimension:")
    );
    assert!(
        OlaError::InvalidDuration(0.0)
            .to_string()
            .contains("invalid duration:")
    );
    assert!(OlaError::shape("x").to_string().contains("shape error:"));
    assert!(
        OlaError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OlaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn check_duration_rejects_non_positive() {
    assert_eq!(check_duration(0.3).unwrap(), 0.3);
    assert!(matches!(
        check_duration(0.0),
        Err(OlaError::InvalidDuration(d)) if d == 0.0
    ));
    assert!(matches!(
        check_duration(-1.0),
        Err(OlaError::InvalidDuration(_))
    ));
    assert!(matches!(
        check_duration(f64::NAN),
        Err(OlaError::InvalidDuration(_))
    ));
}
