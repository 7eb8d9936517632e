// Output algebra.
// Origin: hoarec/Glushkov.java (output concatenation), hoarec/Simple.java (longestCommonSuffix)
//
// An output is `Option<String>`: `None` is the empty language (reject) and
// `Some(String::new())` is acceptance with nothing emitted. The two must never
// be conflated.

/// Concatenate two outputs. The empty language absorbs everything.
pub fn concat(lhs: Option<&str>, rhs: Option<&str>) -> Option<String> {
    match (lhs, rhs) {
        (Some(l), Some(r)) => {
            let mut out = String::with_capacity(l.len() + r.len());
            out.push_str(l);
            out.push_str(r);
            Some(out)
        }
        _ => None,
    }
}

/// Longest common suffix of two strings, on character boundaries.
pub fn longest_common_suffix<'a>(a: &'a str, b: &str) -> &'a str {
    let common: usize = a
        .chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(ca, _)| ca.len_utf8())
        .sum();
    &a[a.len() - common..]
}
