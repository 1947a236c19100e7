//! # Health condition selection / 健康状况选择规则
//!
//! `none` is exclusive: it cannot coexist with any other condition id.

/// Sentinel id meaning "no health conditions".
/// 表示“无健康问题”的特殊 id。
pub const NONE_CONDITION_ID: &str = "none";

/// Condition ids that require a doctor's note before activation.
/// 需要医生证明才能激活会员的健康状况 id。
pub const CLEARANCE_CONDITION_IDS: [&str; 8] = [
    "heart-disease",
    "high-blood-pressure",
    "diabetes-type1",
    "diabetes-type2",
    "pregnancy",
    "epilepsy",
    "osteoporosis",
    "recent-surgery",
];

/// Whether any selected id is in [`CLEARANCE_CONDITION_IDS`].
/// 所选 id 中是否包含需要医疗许可的项。
pub fn requires_medical_clearance(ids: &[String]) -> bool {
    ids.iter()
        .any(|id| CLEARANCE_CONDITION_IDS.contains(&id.as_str()))
}

/// Normalize a selection list.
/// 规范化选择列表。
///
/// Duplicates are dropped (first occurrence wins). The last entry decides
/// how `none` is treated: when it is `none` the selection collapses to
/// `[none]`, otherwise every `none` is removed.
pub fn normalize(ids: Vec<String>) -> Vec<String> {
    if ids.last().map(String::as_str) == Some(NONE_CONDITION_ID) {
        return vec![NONE_CONDITION_ID.to_string()];
    }

    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if id != NONE_CONDITION_ID && !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Checkbox toggle on an existing selection.
/// 在现有选择上切换一个复选框。
///
/// Toggling `none` always yields `[none]`. Toggling any other id removes it
/// when present, otherwise appends it and drops `none`.
pub fn toggle(selection: &[String], id: &str) -> Vec<String> {
    if id == NONE_CONDITION_ID {
        return vec![NONE_CONDITION_ID.to_string()];
    }

    if selection.iter().any(|s| s == id) {
        return selection.iter().filter(|s| *s != id).cloned().collect();
    }

    let mut next: Vec<String> = selection
        .iter()
        .filter(|s| *s != NONE_CONDITION_ID)
        .cloned()
        .collect();
    next.push(id.to_string());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn clearance_follows_fixed_list() {
        assert!(requires_medical_clearance(&ids(&["diabetes-type1"])));
        assert!(requires_medical_clearance(&ids(&["asthma", "pregnancy"])));
        assert!(!requires_medical_clearance(&ids(&["none"])));
        assert!(!requires_medical_clearance(&ids(&["asthma"])));
        assert!(!requires_medical_clearance(&[]));
    }

    #[test]
    fn none_selected_last_clears_others() {
        assert_eq!(
            normalize(ids(&["asthma", "epilepsy", "none"])),
            ids(&["none"])
        );
    }

    #[test]
    fn other_selected_after_none_drops_none() {
        assert_eq!(normalize(ids(&["none", "asthma"])), ids(&["asthma"]));
    }

    #[test]
    fn normalize_dedupes_in_order() {
        assert_eq!(
            normalize(ids(&["asthma", "back-pain", "asthma"])),
            ids(&["asthma", "back-pain"])
        );
    }

    #[test]
    fn toggle_is_exclusive_with_none() {
        let selection = toggle(&[], "asthma");
        assert_eq!(selection, ids(&["asthma"]));

        let selection = toggle(&selection, "none");
        assert_eq!(selection, ids(&["none"]));

        let selection = toggle(&selection, "epilepsy");
        assert_eq!(selection, ids(&["epilepsy"]));

        let selection = toggle(&selection, "epilepsy");
        assert!(selection.is_empty());
    }

    #[test]
    fn toggling_none_twice_keeps_none() {
        let selection = toggle(&ids(&["none"]), "none");
        assert_eq!(selection, ids(&["none"]));
    }
}
