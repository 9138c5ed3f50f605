//! Count formatting for status lines and table footers.

/// Groups the digits of a count with commas.
///
/// ```
/// use fwlog_inspector::utils::format::group_digits;
///
/// assert_eq!(group_digits(1234567), "1,234,567");
/// assert_eq!(group_digits(42), "42");
/// ```
pub fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A count followed by its noun, pluralised with a trailing `s`.
///
/// ```
/// use fwlog_inspector::utils::format::count_of;
///
/// assert_eq!(count_of(1, "row"), "1 row");
/// assert_eq!(count_of(2500, "warning"), "2,500 warnings");
/// ```
pub fn count_of(n: usize, noun: &str) -> String {
    let suffix = if n == 1 { "" } else { "s" };
    format!("{} {}{}", group_digits(n), noun, suffix)
}
