use std::io::Write;

use tempfile::{tempdir, NamedTempFile};
use value_eval::constants::{annotation_categories, ANNOTATION_CATEGORIES};
use value_eval::{EvalError, PredictionLoader};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_standard_format_scenario() {
    let file = csv_file("video_id,Hedonism,Face\nv1,present,\nv2,,dominant\nv3,bogus,conflict\n");

    let outcome = PredictionLoader::new("baseline")
        .load_with_report(file.path())
        .unwrap();
    let set = &outcome.predictions;

    assert_eq!(set.model_name, "baseline");
    assert_eq!(set.video_ids(), vec!["v1", "v2", "v3"]);
    assert_eq!(set.total_count, 3);
    assert_eq!(set.success_count, 3);
    assert_eq!(set.failure_count, 0);
    assert!(set.failed_video_ids.is_empty());

    let v1 = set.get("v1").unwrap();
    assert_eq!(v1.prediction("Hedonism"), Some(1));
    assert_eq!(v1.prediction("Face"), Some(0));

    let v2 = set.get("v2").unwrap();
    assert_eq!(v2.prediction("Hedonism"), Some(0));
    assert_eq!(v2.prediction("Face"), Some(2));

    let v3 = set.get("v3").unwrap();
    assert_eq!(v3.prediction("Hedonism"), Some(0));
    assert_eq!(v3.prediction("Face"), Some(1));

    for prediction in &set.predictions {
        for category in ANNOTATION_CATEGORIES {
            if category != "Hedonism" && category != "Face" {
                assert_eq!(prediction.prediction(category), Some(0));
            }
        }
    }

    let anomalies = &outcome.report.unexpected_values;
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].category, "Hedonism");
    assert_eq!(anomalies[0].value, "bogus");
    assert_eq!(anomalies[0].first_row, 4);
}

#[test]
fn test_every_record_has_every_category() {
    let file = csv_file(
        "filename,1_Value1_Face_values,1_Value1_Tradition_values\n\
         @a_video_1.mp4,present,\n\
         @b_video_2.mp4,,dominant\n",
    );

    let set = PredictionLoader::new("m").load(file.path()).unwrap();
    let expected: Vec<String> = {
        let mut cats = annotation_categories();
        cats.sort();
        cats
    };

    assert_eq!(set.len(), 2);
    for prediction in &set.predictions {
        let keys: Vec<String> = prediction.predictions.keys().cloned().collect();
        assert_eq!(keys, expected);
    }
    assert_eq!(set.video_ids(), vec!["a_1", "b_2"]);
}

#[test]
fn test_whitespace_does_not_change_the_code() {
    let file = csv_file("video_id,Hedonism,Face\nv1, present ,present\n");

    let set = PredictionLoader::new("m").load(file.path()).unwrap();
    let v1 = set.get("v1").unwrap();
    assert_eq!(v1.prediction("Hedonism"), v1.prediction("Face"));
    assert_eq!(v1.prediction("Hedonism"), Some(1));
}

#[test]
fn test_unexpected_value_logged_once_across_rows() {
    let mut contents = String::from("video_id,Stimulation\n");
    for i in 0..100 {
        contents.push_str(&format!("v{},maybe\n", i));
    }
    let file = csv_file(&contents);

    let outcome = PredictionLoader::new("m")
        .load_with_report(file.path())
        .unwrap();

    assert_eq!(outcome.predictions.len(), 100);
    assert!(outcome
        .predictions
        .predictions
        .iter()
        .all(|p| p.prediction("Stimulation") == Some(0)));
    assert_eq!(outcome.report.unexpected_values.len(), 1);
    assert_eq!(outcome.report.unexpected_values[0].first_row, 2);
}

#[test]
fn test_dedup_log_is_per_load() {
    let file = csv_file("video_id,Stimulation\nv1,maybe\n");
    let loader = PredictionLoader::new("m");

    let first = loader.load_with_report(file.path()).unwrap();
    let second = loader.load_with_report(file.path()).unwrap();
    assert_eq!(first.report.unexpected_values.len(), 1);
    assert_eq!(second.report.unexpected_values.len(), 1);
}

#[test]
fn test_rows_without_identity_columns_are_skipped() {
    let file = csv_file("name,Hedonism\nv1,present\nv2,dominant\n");

    let outcome = PredictionLoader::new("m")
        .load_with_report(file.path())
        .unwrap();

    assert!(outcome.predictions.is_empty());
    assert_eq!(outcome.report.rows_read, 2);
    assert_eq!(outcome.report.skipped_rows, 2);
    assert!(outcome.report.parse_errors.is_empty());
}

#[test]
fn test_power_dominance_case_mismatch_resolves() {
    let file = csv_file(
        "1_Link1,1_Value1_Power_dominance_values,1_Value1_Hedonism_values\n\
         https://www.tiktok.com/@creator/video/7001,dominant,present\n",
    );

    let outcome = PredictionLoader::new("m")
        .load_with_report(file.path())
        .unwrap();
    let prediction = outcome.predictions.get("creator_7001").unwrap();

    assert_eq!(prediction.prediction("Power_Dominance"), Some(2));
    assert_eq!(prediction.prediction("Hedonism"), Some(1));
    assert!(outcome.report.layout.linked);
    assert!(outcome.report.layout.value_columns);

    let mismatches = &outcome.report.column_mismatches;
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].category, "Power_Dominance");
    assert_eq!(mismatches[0].expected, "1_Value1_Power_Dominance_values");
    assert_eq!(mismatches[0].found, "1_Value1_Power_dominance_values");
}

#[test]
fn test_missing_file_raises_not_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = PredictionLoader::new("m").load(&path).unwrap_err();
    assert!(matches!(err, EvalError::NotFound(ref p) if p.ends_with("absent.csv")));
}

#[test]
fn test_empty_file_yields_empty_set() {
    let file = csv_file("");

    let set = PredictionLoader::new("m").load(file.path()).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.total_count, 0);
}

#[test]
fn test_filename_that_does_not_resolve_is_kept() {
    let file = csv_file("filename,Face\n  plainname  ,present\n");

    let set = PredictionLoader::new("m")
        .with_video_id_resolver(|_: &str| -> String { String::new() })
        .load(file.path())
        .unwrap();
    assert_eq!(set.video_ids(), vec!["plainname"]);
}

#[test]
fn test_injected_normalizer_is_used() {
    let file = csv_file("video_id,Face\nv1,YES\nv2,no\n");

    let set = PredictionLoader::new("m")
        .with_value_normalizer(|value: &str| -> Option<i8> {
            match value.to_lowercase().as_str() {
                "yes" => Some(1),
                "no" | "" => Some(0),
                _ => None,
            }
        })
        .load(file.path())
        .unwrap();

    assert_eq!(set.get("v1").unwrap().prediction("Face"), Some(1));
    assert_eq!(set.get("v2").unwrap().prediction("Face"), Some(0));
}

#[test]
fn test_prediction_set_serializes_to_json() {
    let file = csv_file("video_id,Face\nv1,present\n");

    let set = PredictionLoader::new("m").load(file.path()).unwrap();
    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json["model_name"], "m");
    assert_eq!(json["predictions"][0]["video_id"], "v1");
    assert_eq!(json["predictions"][0]["predictions"]["Face"], 1);
}
