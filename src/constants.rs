/// Canonical value categories, in the order the annotation guide lists them.
/// Every prediction record carries exactly one code for each of these.
pub const ANNOTATION_CATEGORIES: [&str; 19] = [
    "Self_Direction_Thought",
    "Self_Direction_Action",
    "Stimulation",
    "Hedonism",
    "Achievement",
    "Power_Resources",
    "Power_Dominance",
    "Face",
    "Security_Personal",
    "Security_Social",
    "Conformity_Rules",
    "Conformity_Interpersonal",
    "Tradition",
    "Humility",
    "Benevolence_Dependability",
    "Benevolence_Care",
    "Universalism_Concern",
    "Universalism_Nature",
    "Universalism_Tolerance",
];

// Identity columns
pub const FILENAME_COLUMN: &str = "filename";
pub const LINK_COLUMN: &str = "1_Link1";
pub const VIDEO_ID_COLUMN: &str = "video_id";

/// Any of these in the header marks the export as the linked (TikTok) format
pub const LINKED_FORMAT_COLUMNS: [&str; 2] = [FILENAME_COLUMN, LINK_COLUMN];

// Per-category value columns look like `1_Value1_<Category>_values`
pub const VALUE_COLUMN_PREFIX: &str = "1_Value1_";
pub const VALUE_COLUMN_SUFFIX: &str = "_values";
pub const VALUE_COLUMN_MARKER: &str = "_values";

/// Static table from exported value-column headers to canonical category
/// names. The export spells `Power_dominance` with a lowercase `d`.
pub const COLUMN_MAPPING: [(&str, &str); 19] = [
    ("1_Value1_Self_Direction_Thought_values", "Self_Direction_Thought"),
    ("1_Value1_Self_Direction_Action_values", "Self_Direction_Action"),
    ("1_Value1_Stimulation_values", "Stimulation"),
    ("1_Value1_Hedonism_values", "Hedonism"),
    ("1_Value1_Achievement_values", "Achievement"),
    ("1_Value1_Power_Resources_values", "Power_Resources"),
    ("1_Value1_Power_dominance_values", "Power_Dominance"),
    ("1_Value1_Face_values", "Face"),
    ("1_Value1_Security_Personal_values", "Security_Personal"),
    ("1_Value1_Security_Social_values", "Security_Social"),
    ("1_Value1_Conformity_Rules_values", "Conformity_Rules"),
    ("1_Value1_Conformity_Interpersonal_values", "Conformity_Interpersonal"),
    ("1_Value1_Tradition_values", "Tradition"),
    ("1_Value1_Humility_values", "Humility"),
    ("1_Value1_Benevolence_Dependability_values", "Benevolence_Dependability"),
    ("1_Value1_Benevolence_Care_values", "Benevolence_Care"),
    ("1_Value1_Universalism_Concern_values", "Universalism_Concern"),
    ("1_Value1_Universalism_Nature_values", "Universalism_Nature"),
    ("1_Value1_Universalism_Tolerance_values", "Universalism_Tolerance"),
];

/// Number of row diagnostics echoed to the log after a load
pub const DEFAULT_ERROR_PREVIEW_LIMIT: usize = 5;

pub const DEFAULT_MODEL_NAME: &str = "model";

/// Header the naming convention predicts for a category's value column
pub fn expected_value_column(category: &str) -> String {
    format!("{}{}{}", VALUE_COLUMN_PREFIX, category, VALUE_COLUMN_SUFFIX)
}

/// Value-column header the static table lists for a category, if any
pub fn mapped_column_for(category: &str) -> Option<&'static str> {
    COLUMN_MAPPING
        .iter()
        .find(|(_, cat)| *cat == category)
        .map(|(col, _)| *col)
}

/// Get all canonical categories as owned names
pub fn annotation_categories() -> Vec<String> {
    ANNOTATION_CATEGORIES.iter().map(|c| c.to_string()).collect()
}
