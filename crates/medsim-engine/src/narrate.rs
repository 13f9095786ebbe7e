//! Small text helpers shared by the verb handlers.

/// Turn a camel-case part or target name into words: `leftLeg` → `left leg`.
pub fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_uppercase() {
            out.push(' ');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Join items as an English list: `a`, `a and b`, `a, b, and c`.
pub fn list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [a, b] => format!("{} and {}", a.as_ref(), b.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Join non-empty sentences with single spaces.
pub fn sentences<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter(|s| !s.as_ref().trim().is_empty())
        .map(|s| s.as_ref().trim().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap a spoken line in quotes, or a shrug when the patient has no answer.
pub fn quote(line: &str) -> String {
    if line.trim().is_empty() {
        "\"I'm not sure.\"".to_string()
    } else {
        format!("\"{}\"", line.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_splits_camel_case() {
        assert_eq!(humanize("leftLeg"), "left leg");
        assert_eq!(humanize("headTiltChinLift"), "head tilt chin lift");
        assert_eq!(humanize("chest"), "chest");
    }

    #[test]
    fn list_uses_oxford_comma() {
        assert_eq!(list::<&str>(&[]), "");
        assert_eq!(list(&["a"]), "a");
        assert_eq!(list(&["a", "b"]), "a and b");
        assert_eq!(list(&["a", "b", "c"]), "a, b, and c");
    }

    #[test]
    fn sentences_skip_blanks() {
        assert_eq!(sentences(["One.", "", "  Two. "]), "One. Two.");
    }

    #[test]
    fn quote_shrugs_at_empty_answers() {
        assert_eq!(quote(""), "\"I'm not sure.\"");
        assert_eq!(quote("Penicillin."), "\"Penicillin.\"");
    }
}
