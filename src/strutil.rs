//! Small string helpers shared between the config parser and the kernel
//! resolver. Paths on the boot volume use the firmware's backslash separator.

use alloc::string::String;

pub const PATH_SEPARATOR: char = '\\';

/// Byte offset of the first character after `delimiter`, or `None` if the
/// line contains no delimiter at all.
pub fn value_offset(line: &str, delimiter: char) -> Option<usize> {
    line.find(delimiter).map(|at| at + delimiter.len_utf8())
}

/// Joins two path components with a single separator. The root path `\` is
/// already a separator, so nothing is inserted after it.
pub fn join_path(lhs: &str, rhs: &str) -> String {
    let mut path = String::with_capacity(lhs.len() + rhs.len() + 1);
    path.push_str(lhs);
    if lhs.len() > 1 {
        path.push(PATH_SEPARATOR);
    }
    path.push_str(rhs);
    path
}

/// Replaces the first occurrence of `needle` in `haystack`. Returns `None`
/// when the needle does not occur, so the caller can keep the original string
/// untouched.
pub fn substitute_first(haystack: &str, needle: &str, replacement: &str) -> Option<String> {
    let at = haystack.find(needle)?;
    let mut out = String::with_capacity(haystack.len() - needle.len() + replacement.len());
    out.push_str(&haystack[..at]);
    out.push_str(replacement);
    out.push_str(&haystack[at + needle.len()..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_offset_points_past_delimiter() {
        assert_eq!(value_offset("name=Arch", '='), Some(5));
        assert_eq!(value_offset("=x", '='), Some(1));
        assert_eq!(value_offset("no delimiter here", '='), None);
    }

    #[test]
    fn join_inserts_single_separator() {
        assert_eq!(join_path("\\boot\\linux", "vmlinuz-6.1"), "\\boot\\linux\\vmlinuz-6.1");
    }

    #[test]
    fn join_from_root_does_not_double_separator() {
        assert_eq!(join_path("\\", "vmlinuz-6.1"), "\\vmlinuz-6.1");
    }

    #[test]
    fn substitute_replaces_first_occurrence_only() {
        assert_eq!(
            substitute_first("ro %v quiet %v", "%v", "5.15.0").as_deref(),
            Some("ro 5.15.0 quiet %v")
        );
    }

    #[test]
    fn substitute_without_needle_reports_no_change() {
        assert_eq!(substitute_first("ro quiet", "%v", "5.15.0"), None);
    }
}
