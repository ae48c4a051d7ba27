use super::*;

fn scalar(samples: &[Sample]) -> Vec<f64> {
    samples
        .iter()
        .map(|s| match s.value {
            Value::Scalar(v) => v,
            _ => panic!("expected scalar sample"),
        })
        .collect()
}

#[test]
fn rng_is_deterministic_and_in_range() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        let v = a.next_f64_01();
        assert_eq!(v, b.next_f64_01());
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn script_parses_from_json() {
    let s: Script = serde_json::from_str(
        r#"{
            "initial": {"x": 0, "y": 0},
            "duration_ms": 200,
            "writes": [{"at_ms": 100, "value": {"y": 5}, "duration_ms": 50}],
            "until_ms": 400
        }"#,
    )
    .unwrap();
    assert_eq!(s.initial, Value::keyed([("x", 0.0), ("y", 0.0)]));
    assert_eq!(s.duration_ms, Some(200.0));
    assert_eq!(s.opts().duration_ms, 200.0);
    assert_eq!(s.writes[0].duration_ms, Some(50.0));
}

#[test]
fn top_level_duration_sets_the_default_transition() {
    let s: Script = serde_json::from_str(
        r#"{"initial":0,"duration_ms":1000,"writes":[{"at_ms":0,"value":100}],"until_ms":300}"#,
    )
    .unwrap();
    assert_eq!(s.opts().duration_ms, 1000.0);

    let values = scalar(&s.run(300.0).unwrap());
    assert_eq!(values.len(), 2);
    assert!(values[1] > 0.0 && values[1] < 100.0, "got {}", values[1]);

    let default = Script {
        duration_ms: None,
        ..s
    };
    assert_eq!(default.opts(), AnimatedOpts::default());
    assert_eq!(scalar(&default.run(300.0).unwrap())[1], 100.0);
}

#[test]
fn unknown_script_keys_are_rejected() {
    let nested = serde_json::from_str::<Script>(
        r#"{"initial":0,"opts":{"duration_ms":1000},"until_ms":300}"#,
    );
    assert!(nested.is_err());

    let misspelled = serde_json::from_str::<Script>(
        r#"{"initial":0,"duration":1000,"until_ms":300}"#,
    );
    assert!(misspelled.is_err());

    let bad_write = serde_json::from_str::<Script>(
        r#"{"initial":0,"writes":[{"at_ms":0,"value":1,"durationMs":5}],"until_ms":300}"#,
    );
    assert!(bad_write.is_err());
}

#[test]
fn oversized_sample_counts_are_refused() {
    let script = Script {
        initial: Value::Scalar(0.0),
        duration_ms: None,
        writes: Vec::new(),
        until_ms: 1e12,
    };
    assert!(matches!(script.run(1.0), Err(OlaError::Shape(_))));
    assert!(matches!(script.run(f64::MIN_POSITIVE), Err(OlaError::Shape(_))));

    let at_limit = Script {
        until_ms: (MAX_SCRIPT_SAMPLES - 1) as f64,
        ..script.clone()
    };
    assert!(matches!(at_limit.run(0.5), Err(OlaError::Shape(_))));

    assert!(matches!(
        Script::random_walk(0, 1e12),
        Err(OlaError::Shape(_))
    ));
    assert!(matches!(
        Script::random_walk(0, f64::INFINITY),
        Err(OlaError::Shape(_))
    ));
}

#[test]
fn run_samples_inclusive_range_and_applies_writes() {
    let script = Script {
        initial: Value::Scalar(0.0),
        duration_ms: None,
        writes: vec![ScriptWrite {
            at_ms: 0.0,
            value: Value::Scalar(100.0),
            duration_ms: None,
        }],
        until_ms: 400.0,
    };
    let samples = script.run(100.0).unwrap();
    assert_eq!(samples.len(), 5);
    assert_eq!(samples[0].target, Some(Value::Scalar(100.0)));

    let values = scalar(&samples);
    assert_eq!(values[0], 0.0);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(values[3], 100.0);
    assert_eq!(values[4], 100.0);
}

#[test]
fn writes_apply_in_time_order() {
    let script = Script {
        initial: Value::Scalar(0.0),
        duration_ms: None,
        writes: vec![
            ScriptWrite {
                at_ms: 500.0,
                value: Value::Scalar(-1.0),
                duration_ms: None,
            },
            ScriptWrite {
                at_ms: 50.0,
                value: Value::Scalar(1.0),
                duration_ms: None,
            },
        ],
        until_ms: 1000.0,
    };
    let samples = script.run(250.0).unwrap();
    let values = scalar(&samples);
    assert!(values[1] > 0.0 && values[1] < 1.0);
    assert_eq!(values[2], 1.0);
    assert_eq!(values[4], -1.0);
    assert_eq!(samples[4].target, Some(Value::Scalar(-1.0)));

    assert_eq!(samples[0].target, None);
    assert_eq!(
        serde_json::to_string(&samples[0]).unwrap(),
        r#"{"t_ms":0.0,"value":0.0}"#
    );
    assert_eq!(
        serde_json::to_string(&samples[4]).unwrap(),
        r#"{"t_ms":1000.0,"target":-1.0,"value":-1.0}"#
    );
}

#[test]
fn run_rejects_bad_inputs() {
    let mut script = Script::random_walk(1, 100.0).unwrap();
    assert!(matches!(script.run(0.0), Err(OlaError::Shape(_))));
    script.until_ms = f64::NAN;
    assert!(matches!(script.run(10.0), Err(OlaError::Shape(_))));

    let mismatched = Script {
        initial: Value::Scalar(0.0),
        duration_ms: None,
        writes: vec![ScriptWrite {
            at_ms: 0.0,
            value: Value::sequence([1.0]),
            duration_ms: None,
        }],
        until_ms: 10.0,
    };
    assert!(matches!(mismatched.run(10.0), Err(OlaError::Shape(_))));
}

#[test]
fn random_walk_retargets_every_1300ms() {
    let script = Script::random_walk(7, 4000.0).unwrap();
    let at: Vec<f64> = script.writes.iter().map(|w| w.at_ms).collect();
    assert_eq!(at, vec![0.0, 1300.0, 2600.0, 3900.0]);
    assert_eq!(script.opts().duration_ms, 1000.0);
    assert_eq!(script, Script::random_walk(7, 4000.0).unwrap());

    for s in script.run(16.0).unwrap() {
        let Value::Scalar(v) = s.value else {
            panic!("expected scalar");
        };
        assert!(v.is_finite());
    }
}
