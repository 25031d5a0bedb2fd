//! End-to-end validation of synthetic portraits.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use passport_qa_core::{
    validate, FacialLandmarks, Point, Rule, RuleStatus, ValidationConfig, ValidationEngine,
};
use passport_qa_test_support::{MockLandmarkDetector, PassportPhotoBuilder};
use time::macros::datetime;

fn engine() -> ValidationEngine {
    ValidationEngine::new(ValidationConfig::default()).expect("defaults are valid")
}

#[test]
fn test_compliant_photo_passes_every_rule() {
    let photo = PassportPhotoBuilder::compliant();
    let validation = engine().run(&photo.rgb(), Some(&photo.landmarks)).unwrap();

    assert!((validation.metrics.luminance_mean - 200.0).abs() < 0.5);
    assert_eq!(validation.metrics.head_ratio.value(), Some(0.6));

    let report = validation.report;
    assert!(report.overall_pass());
    for result in report.results() {
        assert_eq!(result.passed, RuleStatus::Pass, "{}", result.rule_name);
        assert!(result.suggestion.is_none());
    }
}

#[test]
fn test_wrong_size_fails_only_size() {
    let photo = PassportPhotoBuilder::wrong_size();
    let report = engine()
        .validate(&photo.rgb(), Some(&photo.landmarks))
        .unwrap();

    let size = report.result("size").unwrap();
    assert_eq!(size.passed, RuleStatus::Fail);
    assert_eq!(size.detail, "expected 600×600, got 500×500");
    assert!(size.suggestion.is_some());

    for name in ["head_ratio", "centering", "background_whiteness", "lighting"] {
        assert_eq!(report.result(name).unwrap().passed, RuleStatus::Pass, "{name}");
    }
    assert!(!report.overall_pass());
}

#[test]
fn test_missing_landmarks_skip_geometry() {
    let photo = PassportPhotoBuilder::compliant();
    let validation = engine()
        .check_photo(&photo.info, &MockLandmarkDetector::no_face())
        .unwrap();
    let report = validation.report;

    for name in ["head_ratio", "centering"] {
        let result = report.result(name).unwrap();
        assert_eq!(result.passed, RuleStatus::Skipped);
        assert!(result.suggestion.is_none());
        assert!(result.detail.contains("no face detected"), "{}", result.detail);
    }
    assert_eq!(
        report.result("background_whiteness").unwrap().passed,
        RuleStatus::Pass
    );
    assert_eq!(report.result("lighting").unwrap().passed, RuleStatus::Pass);
    assert!(report.overall_pass());

    let summary = report.summary();
    assert_eq!((summary.passed, summary.failed, summary.skipped), (3, 0, 2));
}

#[test]
fn test_gray_shoulders_fail_background() {
    let photo = PassportPhotoBuilder::gray_shoulders();
    let validation = engine().run(&photo.rgb(), Some(&photo.landmarks)).unwrap();

    assert!((validation.metrics.border_whiteness_pct - 0.70).abs() < 1e-9);

    let result = validation.report.result("background_whiteness").unwrap().clone();
    assert_eq!(result.passed, RuleStatus::Fail);
    let suggestion = result.suggestion.unwrap();
    assert!(suggestion.contains("plain"));
    assert!(suggestion.contains("light"));
}

#[test]
fn test_exposure_failures_only_touch_lighting() {
    let dark = PassportPhotoBuilder::underexposed();
    let report = engine().validate(&dark.rgb(), Some(&dark.landmarks)).unwrap();
    let lighting = report.result("lighting").unwrap();
    assert_eq!(lighting.passed, RuleStatus::Fail);
    assert!(lighting.detail.contains("mean luminance outside"), "{}", lighting.detail);
    assert_eq!(report.result("head_ratio").unwrap().passed, RuleStatus::Pass);

    let bright = PassportPhotoBuilder::overexposed();
    let report = engine()
        .validate(&bright.rgb(), Some(&bright.landmarks))
        .unwrap();
    assert_eq!(report.result("lighting").unwrap().passed, RuleStatus::Fail);
    assert_eq!(
        report.result("background_whiteness").unwrap().passed,
        RuleStatus::Pass
    );
}

#[test]
fn test_off_center_nose_fails_centering() {
    let photo = PassportPhotoBuilder::new().nose_offset(0.08).build();
    let report = engine()
        .validate(&photo.rgb(), Some(&photo.landmarks))
        .unwrap();
    assert_eq!(report.result("centering").unwrap().passed, RuleStatus::Fail);
    assert_eq!(report.result("head_ratio").unwrap().passed, RuleStatus::Pass);
}

#[test]
fn test_report_covers_every_rule_in_order() {
    let photo = PassportPhotoBuilder::underexposed();
    for landmarks in [Some(&photo.landmarks), None] {
        let report = engine().validate(&photo.rgb(), landmarks).unwrap();
        let names: Vec<_> = report.results().iter().map(|r| r.rule_name.as_str()).collect();
        let expected: Vec<_> = Rule::ALL.iter().map(|r| r.id()).collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn test_overall_pass_ignores_skipped_rules() {
    let photos = [
        PassportPhotoBuilder::compliant(),
        PassportPhotoBuilder::wrong_size(),
        PassportPhotoBuilder::gray_shoulders(),
        PassportPhotoBuilder::underexposed(),
    ];
    for photo in &photos {
        for landmarks in [Some(&photo.landmarks), None] {
            let report = engine().validate(&photo.rgb(), landmarks).unwrap();
            let expected = report
                .results()
                .iter()
                .all(|r| r.passed != RuleStatus::Fail);
            assert_eq!(report.overall_pass(), expected);
            for result in report.results() {
                assert_eq!(result.suggestion.is_some(), result.passed == RuleStatus::Fail);
            }
        }
    }
}

#[test]
fn test_validation_is_deterministic() {
    let photo = PassportPhotoBuilder::gray_shoulders();
    let engine = engine();

    let first = engine.run(&photo.rgb(), Some(&photo.landmarks)).unwrap();
    let second = engine.run(&photo.rgb(), Some(&photo.landmarks)).unwrap();

    assert_eq!(first.metrics, second.metrics);
    assert_eq!(first.report.results(), second.report.results());
}

#[test]
fn test_inconsistent_landmarks_skip_head_ratio() {
    let photo = PassportPhotoBuilder::compliant();
    let flipped = FacialLandmarks {
        forehead_top: Point::new(300.0, 480.0),
        chin_bottom: Point::new(300.0, 120.0),
        ..photo.landmarks
    };
    let report = engine().validate(&photo.rgb(), Some(&flipped)).unwrap();

    let head = report.result("head_ratio").unwrap();
    assert_eq!(head.passed, RuleStatus::Skipped);
    assert!(head.detail.contains("inconsistent"), "{}", head.detail);
}

#[test]
fn test_head_ratio_boundary_is_inclusive() {
    // 0.50 exactly: forehead at 150, chin at 450 on a 600px photo.
    let photo = PassportPhotoBuilder::new().face_span(0.25, 0.75).build();
    let report = engine()
        .validate(&photo.rgb(), Some(&photo.landmarks))
        .unwrap();
    assert_eq!(report.result("head_ratio").unwrap().passed, RuleStatus::Pass);

    let photo = PassportPhotoBuilder::new().face_span(0.26, 0.75).build();
    let report = engine()
        .validate(&photo.rgb(), Some(&photo.landmarks))
        .unwrap();
    assert_eq!(report.result("head_ratio").unwrap().passed, RuleStatus::Fail);
}

#[test]
fn test_custom_config_changes_verdicts() {
    let photo = PassportPhotoBuilder::gray_shoulders();
    let config = ValidationConfig {
        whiteness_threshold: 0.70,
        ..ValidationConfig::default()
    };
    let report = validate(&photo.rgb(), Some(&photo.landmarks), &config).unwrap();
    assert_eq!(
        report.result("background_whiteness").unwrap().passed,
        RuleStatus::Pass
    );
}

#[test]
fn test_fixed_timestamp_reports_are_identical() {
    let photo = PassportPhotoBuilder::compliant();
    let engine = engine();
    let at = datetime!(2024-05-01 12:00 UTC);

    let build = || {
        let metrics = engine.extract(&photo.rgb(), Some(&photo.landmarks)).unwrap();
        passport_qa_core::ReportBuilder::build_at(
            passport_qa_core::evaluate_all(&metrics, engine.config()),
            at,
        )
    };
    assert_eq!(build(), build());
}
