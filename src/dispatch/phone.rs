//! Phone number formatting collaborator

/// Turns what the user typed into the stored phone string
pub trait PhoneFormatter: Send + Sync {
    fn format(&self, raw: &str, default_country: &str) -> String;
}

/// Produces `+<dial code><digits>`: keeps an explicit `+` or `00` prefix,
/// otherwise prefixes the default country's dial code. Unknown countries leave
/// the digits unprefixed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialCodeFormatter;

const DIAL_CODES: &[(&str, &str)] = &[
    ("AE", "971"),
    ("AU", "61"),
    ("CA", "1"),
    ("DE", "49"),
    ("FR", "33"),
    ("GB", "44"),
    ("IN", "91"),
    ("KE", "254"),
    ("NG", "234"),
    ("SG", "65"),
    ("TZ", "255"),
    ("UG", "256"),
    ("US", "1"),
    ("ZA", "27"),
];

pub fn dial_code(country: &str) -> Option<&'static str> {
    let country = country.to_ascii_uppercase();
    DIAL_CODES
        .iter()
        .find(|(code, _)| *code == country)
        .map(|(_, dial)| *dial)
}

impl PhoneFormatter for DialCodeFormatter {
    fn format(&self, raw: &str, default_country: &str) -> String {
        let trimmed = raw.trim();
        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return String::new();
        }

        if trimmed.starts_with('+') {
            return format!("+{digits}");
        }
        if let Some(rest) = digits.strip_prefix("00") {
            return format!("+{rest}");
        }

        let national = digits.trim_start_matches('0');
        match dial_code(default_country) {
            Some(dial) => format!("+{dial}{national}"),
            None => digits,
        }
    }
}
