// File name rules for the host platform

/// Characters that may not appear in a single file or directory name.
#[cfg(not(windows))]
pub fn invalid_file_name_chars() -> &'static [char] {
    &['\0', '/']
}

/// Characters that may not appear in a single file or directory name.
#[cfg(windows)]
pub fn invalid_file_name_chars() -> &'static [char] {
    const INVALID: [char; 41] = [
        '"', '<', '>', '|', '\0', '\u{1}', '\u{2}', '\u{3}', '\u{4}', '\u{5}', '\u{6}', '\u{7}',
        '\u{8}', '\t', '\n', '\u{b}', '\u{c}', '\r', '\u{e}', '\u{f}', '\u{10}', '\u{11}',
        '\u{12}', '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}', '\u{18}', '\u{19}', '\u{1a}',
        '\u{1b}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}', ':', '*', '?', '\\', '/',
    ];
    &INVALID
}

/// True when `name` contains none of [`invalid_file_name_chars`].
///
/// Blankness is not checked here; callers reject blank names first.
pub fn is_valid_file_name(name: &str) -> bool {
    !name.contains(invalid_file_name_chars())
}

/// True for an empty or whitespace-only argument.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Final segment of `path`, accepting both `/` and `\` as separators.
///
/// A path ending in a separator yields an empty name.
pub fn file_name_from_path(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_forward_slashes() {
        assert_eq!(file_name_from_path("tmp/x/y/a.txt"), "a.txt");
    }

    #[test]
    fn test_file_name_from_back_slashes() {
        assert_eq!(file_name_from_path(r"C:\data\reports\q1.csv"), "q1.csv");
    }

    #[test]
    fn test_file_name_from_mixed_separators() {
        assert_eq!(file_name_from_path(r"root/nested\deep/file.bin"), "file.bin");
    }

    #[test]
    fn test_file_name_without_separator() {
        assert_eq!(file_name_from_path("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_file_name_trailing_separator_is_empty() {
        assert_eq!(file_name_from_path("dir/"), "");
    }

    #[test]
    fn test_separator_is_invalid_in_name() {
        assert!(!is_valid_file_name("a/b.txt"));
        assert!(!is_valid_file_name("nul\0byte"));
        assert!(is_valid_file_name("report-2024.txt"));
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_reserved_chars() {
        for name in ["a:b", "a*b", "a?b", "a<b", "a>b", "a|b", "a\"b", r"a\b"] {
            assert!(!is_valid_file_name(name), "{} should be rejected", name);
        }
    }

    #[test]
    fn test_blank_values() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" a "));
    }
}
