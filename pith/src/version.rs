//! Engine version comparison for the menu's requirement gate.

/// True when `installed` satisfies the `required` minimum.
///
/// Versions are dot-separated numeric parts compared left to right, the
/// shorter side padded with zeros. An empty string on either side means
/// no requirement; a part that fails to parse counts as zero.
pub fn version_at_least(installed: &str, required: &str) -> bool {
    if installed.is_empty() || required.is_empty() {
        return true;
    }
    let installed = parts(installed);
    let required = parts(required);
    for i in 0..installed.len().max(required.len()) {
        let have = installed.get(i).copied().unwrap_or(0);
        let need = required.get(i).copied().unwrap_or(0);
        if have != need {
            return have > need;
        }
    }
    true
}

fn parts(version: &str) -> Vec<i64> {
    version
        .split('.')
        .map(|part| part.trim().parse().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_versions_pass() {
        assert!(version_at_least("1.2", "1.2"));
        assert!(version_at_least("1.2.0", "1.2"));
        assert!(version_at_least("1.2", "1.2.0"));
    }

    #[test]
    fn ordering_is_numeric_not_lexicographic() {
        assert!(version_at_least("1.10", "1.9"));
        assert!(!version_at_least("1.9", "1.10"));
        assert!(version_at_least("2.0", "1.99"));
    }

    #[test]
    fn shorter_side_pads_with_zeros() {
        assert!(!version_at_least("1.2", "1.2.1"));
        assert!(version_at_least("1.2.1", "1.2"));
    }

    #[test]
    fn empty_side_means_no_requirement() {
        assert!(version_at_least("1.2", ""));
        assert!(version_at_least("", "9.9"));
    }

    #[test]
    fn unparseable_parts_count_as_zero() {
        assert!(!version_at_least("abc", "0.1"));
        assert!(version_at_least("1.x", "1.0"));
    }
}
