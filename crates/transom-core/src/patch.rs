//! Tagged-constant substitution in module source text.
//!
//! The tagging micro-format is the only file-format contract at the module
//! boundary: a top-level line of the form
//!
//! ```text
//! scale = 10  # <kwarg>
//! ```
//!
//! marks `scale` as overridable. When an injected parameter matches the
//! identifier, the whole line is rewritten with the supplied value and
//! re-tagged so the substitution is traceable in the patched copy:
//!
//! ```text
//! scale = 20  # <injected>
//! ```

use crate::params::ParamMap;

/// Marker comment for an overridable constant.
pub const KWARG_TAG: &str = "<kwarg>";

/// Marker comment left on a substituted constant.
pub const INJECTED_TAG: &str = "<injected>";

/// Rewrite tagged assignments whose identifier matches an injected parameter.
///
/// Untagged lines, tagged lines with no matching parameter, and lines that
/// merely resemble the tag format pass through byte-for-byte; malformed tags
/// never raise. The result is complete source text ready for compilation.
pub fn inject_params(source: &str, params: &ParamMap) -> String {
    if params.is_empty() {
        return source.to_string();
    }
    let mut out = String::with_capacity(source.len());
    for segment in source.split_inclusive('\n') {
        let (line, ending) = split_line_ending(segment);
        match substitute_line(line, params) {
            Some(replaced) => {
                out.push_str(&replaced);
                out.push_str(ending);
            }
            None => out.push_str(segment),
        }
    }
    out
}

fn split_line_ending(segment: &str) -> (&str, &str) {
    if let Some(body) = segment.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = segment.strip_suffix('\n') {
        (body, "\n")
    } else {
        (segment, "")
    }
}

/// Match `<identifier> = <value>  # <kwarg>` against one line and produce the
/// injected replacement, or `None` to pass the line through unchanged.
fn substitute_line(line: &str, params: &ParamMap) -> Option<String> {
    // Tagged constants are module-level assignments; indented lines are not
    // candidates.
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let trimmed = line.trim_end();
    let before_tag = trimmed.strip_suffix(KWARG_TAG)?;
    let before_hash = before_tag.trim_end().strip_suffix('#')?;
    // The tag must be a trailing comment, separated from the value.
    if !before_hash.ends_with([' ', '\t']) {
        return None;
    }
    let (lhs, _value) = before_hash.split_once('=')?;
    let key = lhs.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    let value = params.get(key)?;
    Some(format!("{key} = {value}  # {INJECTED_TAG}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    fn scale_20() -> ParamMap {
        let mut params = ParamMap::new();
        params.insert("scale".to_string(), ParamValue::Int(20));
        params
    }

    #[test]
    fn test_substitutes_tagged_constant() {
        let source = "def f(x):\n    return x * scale\nscale = 10  # <kwarg>\n";
        let patched = inject_params(source, &scale_20());

        assert!(patched.contains("scale = 20  # <injected>"));
        assert!(!patched.contains("scale = 10"));
        assert!(!patched.contains("<kwarg>"));
    }

    #[test]
    fn test_unmatched_tag_passes_through() {
        let source = "radius = 5  # <kwarg>\n";
        assert_eq!(inject_params(source, &scale_20()), source);
    }

    #[test]
    fn test_untagged_assignment_passes_through() {
        let source = "scale = 10\nscale_note = 'fixed'  # comment\n";
        assert_eq!(inject_params(source, &scale_20()), source);
    }

    #[test]
    fn test_indented_assignment_is_not_a_candidate() {
        let source = "def f():\n    scale = 10  # <kwarg>\n    return scale\n";
        assert_eq!(inject_params(source, &scale_20()), source);
    }

    #[test]
    fn test_malformed_tag_is_silently_skipped() {
        // No '=' sign, and a tag glued to the value without a comment.
        let source = "scale  # <kwarg>\nscale = 10# <kwarg>\n";
        assert_eq!(inject_params(source, &scale_20()), source);
    }

    #[test]
    fn test_value_with_equals_sign() {
        let source = "opts = {'mode': 'a=b'}  # <kwarg>\n";
        let mut params = ParamMap::new();
        params.insert("opts".to_string(), ParamValue::Raw("{'mode': 'c'}".into()));

        assert_eq!(
            inject_params(source, &params),
            "opts = {'mode': 'c'}  # <injected>\n"
        );
    }

    #[test]
    fn test_preserves_line_endings_and_missing_trailing_newline() {
        let source = "a = 1\r\nscale = 10  # <kwarg>\r\nb = 2";
        let patched = inject_params(source, &scale_20());
        assert_eq!(patched, "a = 1\r\nscale = 20  # <injected>\r\nb = 2");
    }

    #[test]
    fn test_empty_params_is_identity() {
        let source = "scale = 10  # <kwarg>\n";
        assert_eq!(inject_params(source, &ParamMap::new()), source);
    }

    #[test]
    fn test_tag_without_separating_space_is_ignored() {
        // The '#' must follow whitespace to count as a trailing comment.
        let source = "scale =10#<kwarg>\n";
        assert_eq!(inject_params(source, &scale_20()), source);
    }
}
