//! Annotation value conversion
//!
//! Ground-truth sheets and model exports both write one of a handful of labels per
//! category cell. This module turns those labels into the numeric codes used for
//! evaluation: `0` (absent / blank), `1` (present or conflict), `2` (dominant). `-1`
//! only comes from a literal numeric cell.

/// Converts a raw annotation label into its numeric code.
///
/// Returns `None` when the label is not recognized; callers decide how to treat it.
pub trait ValueNormalizer {
    fn convert(&self, value: &str) -> Option<i8>;
}

/// The label set shared with the ground-truth annotations
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationValues;

impl AnnotationValues {
    pub fn new() -> Self {
        Self
    }
}

impl ValueNormalizer for AnnotationValues {
    fn convert(&self, value: &str) -> Option<i8> {
        let value = value.trim();
        if value.is_empty() {
            return Some(0);
        }

        match value.to_lowercase().as_str() {
            "absent" => Some(0),
            "dominant" => Some(2),
            "present" | "conflict" => Some(1),
            other => parse_numeric_code(other),
        }
    }
}

/// Accepts `-1`, `0`, `1`, `2` and integral float spellings such as `2.0`
fn parse_numeric_code(value: &str) -> Option<i8> {
    let code = match value.parse::<i8>() {
        Ok(code) => code,
        Err(_) => {
            let float = value.parse::<f64>().ok()?;
            if float.fract() != 0.0 {
                return None;
            }
            float as i8
        }
    };

    (-1..=2).contains(&code).then_some(code)
}

impl<F> ValueNormalizer for F
where
    F: Fn(&str) -> Option<i8>,
{
    fn convert(&self, value: &str) -> Option<i8> {
        self(value)
    }
}
