use std::{collections::BTreeMap, sync::OnceLock};

static EXAMPLE_NOTES: OnceLock<BTreeMap<&'static str, &'static str>> = OnceLock::new();

/// Named demonstration notes, embedded at compile time.
///
/// The catalog is initialized once and never mutated; every call returns
/// the same mapping.
pub fn get_example_notes() -> &'static BTreeMap<&'static str, &'static str> {
    EXAMPLE_NOTES.get_or_init(|| {
        BTreeMap::from([
            (
                "Cardiology Consult",
                include_str!("./notes/cardiology_consult.txt"),
            ),
            (
                "Discharge Summary",
                include_str!("./notes/discharge_summary.txt"),
            ),
            (
                "Emergency Department Note",
                include_str!("./notes/emergency_department.txt"),
            ),
        ])
    })
}
