//! Result Formatter: completion clean-up, suffix decoration and CSV export.

use bytes::Bytes;

pub const CSV_HEADER: &str = "Prompt";
pub const CSV_FILE_NAME: &str = "generated_prompts.csv";
const CSV_LINE_END: &str = "\r\n";

/// Trims a raw completion and folds every run of line breaks (together with
/// the whitespace around it) into a single space.
pub fn normalize_completion(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Appends `suffix` after a single space. An empty suffix leaves the prompt
/// untouched.
pub fn decorate(prompt: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return prompt.to_string();
    }
    format!("{} {}", prompt.trim_end(), suffix)
}

/// Serializes prompts as a one-column CSV with a `Prompt` header.
///
/// Rows end in CRLF. Fields containing a comma, quote or line break are
/// quoted with inner quotes doubled; an empty field is written as `""` so the
/// row is not mistaken for a blank line.
pub fn to_csv(prompts: &[String]) -> Bytes {
    let mut out = String::with_capacity(
        CSV_HEADER.len() + prompts.iter().map(|p| p.len() + 4).sum::<usize>(),
    );

    out.push_str(CSV_HEADER);
    out.push_str(CSV_LINE_END);
    for prompt in prompts {
        push_field(&mut out, prompt);
        out.push_str(CSV_LINE_END);
    }

    Bytes::from(out)
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field.is_empty() || field.contains([',', '"', '\r', '\n']);
    if !needs_quotes {
        out.push_str(field);
        return;
    }

    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_trims_and_collapses_newlines() {
        assert_eq!(
            normalize_completion("  Misty forest,\n\n  golden light \r\n soft fog \n"),
            "Misty forest, golden light soft fog"
        );
        assert_eq!(normalize_completion("single line"), "single line");
        assert_eq!(normalize_completion(" \n "), "");
    }

    #[test]
    fn test_decorate_without_suffix_is_identity() {
        assert_eq!(decorate("Ocean sunset ", ""), "Ocean sunset ");
    }

    #[test]
    fn test_decorate_appends_single_space() {
        assert_eq!(decorate("Ocean sunset", "--ar 16:9"), "Ocean sunset --ar 16:9");
        assert_eq!(
            decorate("Ocean sunset  \n", "--ar 16:9"),
            "Ocean sunset --ar 16:9"
        );
    }

    #[test]
    fn test_csv_empty_is_header_only() {
        assert_eq!(&to_csv(&[])[..], b"Prompt\r\n");
    }

    #[test]
    fn test_csv_rows_in_input_order() {
        let prompts = strings(&["a", "b"]);
        let first = to_csv(&prompts);
        assert_eq!(&first[..], b"Prompt\r\na\r\nb\r\n");
        assert_eq!(first, to_csv(&prompts));
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let prompts = strings(&[
            "Watercolor Technique, Abstract background --ar 2:3",
            "The \"golden\" hour",
            "",
        ]);
        assert_eq!(
            std::str::from_utf8(&to_csv(&prompts)).unwrap(),
            "Prompt\r\n\"Watercolor Technique, Abstract background --ar 2:3\"\r\n\"The \"\"golden\"\" hour\"\r\n\"\"\r\n"
        );
    }

    #[test]
    fn test_csv_is_utf8() {
        let prompts = strings(&["Café terrace at night"]);
        let csv = to_csv(&prompts);
        assert_eq!(
            String::from_utf8(csv.to_vec()).unwrap(),
            "Prompt\r\nCafé terrace at night\r\n"
        );
    }
}
