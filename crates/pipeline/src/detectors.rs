//! Deterministic regex detectors, run over the whole note
//!
//! These complement the statistical NER tagger with pattern-matchable
//! categories: emails, domains, phone numbers, weights, heights, IP
//! addresses and payment-card numbers. Patterns are compiled once per
//! process.

use regex::Regex;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"[\w\.-]+@[\w\.-]+";
const DOMAIN_PATTERN: &str =
    r"(?:[a-zA-Z0-9_-](?:[a-zA-Z0-9\-_-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,6}";
const WEIGHT_PATTERN: &str = r"\d+(?:lbs|kgs)";
const HEIGHT_PATTERN: &str = r"[0-9]+'[0-9]{2}";
const IPV4_PATTERN: &str = r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b";
const IPV6_PATTERN: &str = r"(([0-9a-fA-F]{1,4}:){7,7}[0-9a-fA-F]{1,4}|([0-9a-fA-F]{1,4}:){1,7}:|([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}|([0-9a-fA-F]{1,4}:){1,5}(:[0-9a-fA-F]{1,4}){1,2}|([0-9a-fA-F]{1,4}:){1,4}(:[0-9a-fA-F]{1,4}){1,3}|([0-9a-fA-F]{1,4}:){1,3}(:[0-9a-fA-F]{1,4}){1,4}|([0-9a-fA-F]{1,4}:){1,2}(:[0-9a-fA-F]{1,4}){1,5}|[0-9a-fA-F]{1,4}:((:[0-9a-fA-F]{1,4}){1,6})|:((:[0-9a-fA-F]{1,4}){1,7}|:)|fe80:(:[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]{1,}|::(ffff(:0{1,4}){0,1}:){0,1}((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])|([0-9a-fA-F]{1,4}:){1,4}:((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9]))";
const CARD_PATTERN: &str = r"(?:[0-9]{4}-){3}[0-9]{4}|[0-9]{16}";
// NANP-style 10-digit form
const PHONE_NANP_PATTERN: &str =
    r"\b((1\W*)?([2-9][0-8][0-9])\W*(([2-9][0-9]{2})\W*([0-9]{4})))\b";
// International-leaning grouped-digit form
const PHONE_INTL_PATTERN: &str =
    r"\b((5[0-9][0-9]?\s?)?(\([0-9]{2}\)|[0-9]{2}[\s\-.]?)(9?[\s\-.]?[0-9]{4}[\s\-.]?[0-9]{4}))\b";
// Both alternatives with country/area/number capture groups, used to
// split an already matched phone string into record fields
const PHONE_PARTS_PATTERN: &str = r"(1\W*)?([2-9][0-8][0-9])\W*(([2-9][0-9]{2})\W*([0-9]{4}))|(5[0-9][0-9]?\s?)?(\([0-9]{2}\)|[0-9]{2}[\s\-.]?)(9?[\s\-.]?[0-9]{4}[\s\-.]?[0-9]{4})";

fn pattern(cell: &'static OnceLock<Regex>, source: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("detector pattern is valid"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    pattern(&RE, EMAIL_PATTERN)
}

/// Email addresses, in match order
pub fn emails(note: &str) -> Vec<String> {
    email_re()
        .find_iter(note)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Bare domain names. Emails are stripped first so `a@b.com` does not
/// also surface `b.com` at the same position.
pub fn domains(note: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let stripped = email_re().replace_all(note, "");
    pattern(&RE, DOMAIN_PATTERN)
        .find_iter(&stripped)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Phone numbers: all matches from both alternative patterns, pooled
/// (international-form matches first, then NANP-form)
pub fn phone_numbers(note: &str) -> Vec<String> {
    static NANP: OnceLock<Regex> = OnceLock::new();
    static INTL: OnceLock<Regex> = OnceLock::new();

    let mut numbers: Vec<String> = pattern(&INTL, PHONE_INTL_PATTERN)
        .captures_iter(note)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();
    numbers.extend(
        pattern(&NANP, PHONE_NANP_PATTERN)
            .captures_iter(note)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string())),
    );
    numbers
}

/// Weight annotations such as `180lbs`
pub fn weights(note: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    pattern(&RE, WEIGHT_PATTERN)
        .find_iter(note)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Height annotations such as `5'11`
pub fn heights(note: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    pattern(&RE, HEIGHT_PATTERN)
        .find_iter(note)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// IPv4 and IPv6 addresses (IPv4 matches first, then IPv6)
pub fn ips(note: &str) -> Vec<String> {
    static V4: OnceLock<Regex> = OnceLock::new();
    static V6: OnceLock<Regex> = OnceLock::new();

    let mut addresses: Vec<String> = pattern(&V4, IPV4_PATTERN)
        .find_iter(note)
        .map(|m| m.as_str().to_string())
        .collect();
    addresses.extend(
        pattern(&V6, IPV6_PATTERN)
            .captures_iter(note)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string())),
    );
    addresses
}

/// Payment-card numbers, dashed or bare 16-digit
pub fn card_numbers(note: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    pattern(&RE, CARD_PATTERN)
        .find_iter(note)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A phone string split into record fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneParts {
    pub country_code: String,
    pub area_code: String,
    pub number: String,
}

/// Re-parse a matched phone string and pick whichever branch produced a
/// non-empty subscriber number. Returns `None` when neither did; the
/// caller emits no telephone record for that entity.
pub fn phone_parts(raw: &str) -> Option<PhoneParts> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let caps = pattern(&RE, PHONE_PARTS_PATTERN).captures(raw)?;

    let group = |n: usize| caps.get(n).map(|m| m.as_str()).unwrap_or("");
    let country_code = if !group(1).is_empty() {
        group(1)
    } else {
        group(6)
    };

    let clean = |s: &str| s.replace("\\W", "").trim().to_string();

    if !group(3).is_empty() {
        Some(PhoneParts {
            country_code: country_code.trim().to_string(),
            area_code: clean(group(2)),
            number: group(3).trim().to_string(),
        })
    } else if !group(8).is_empty() {
        Some(PhoneParts {
            country_code: country_code.trim().to_string(),
            area_code: clean(group(7)),
            number: group(8).trim().to_string(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emails() {
        assert_eq!(
            emails("contact a@b.com or admin@example.org"),
            vec!["a@b.com", "admin@example.org"]
        );
        assert!(emails("no addresses here").is_empty());
    }

    #[test]
    fn test_domains_exclude_emails() {
        let found = domains("contact a@b.com or visit b.com");
        assert_eq!(found, vec!["b.com"]);
    }

    #[test]
    fn test_nanp_phone_number() {
        let found = phone_numbers("Call me at (416) 555-1234");
        assert!(!found.is_empty());
        assert!(found.iter().any(|p| p.contains("555-1234")));
    }

    #[test]
    fn test_phone_parts_nanp_branch() {
        let parts = phone_parts("416) 555-1234").expect("NANP branch should match");
        assert_eq!(parts.area_code, "416");
        assert_eq!(parts.number, "555-1234");
        assert_eq!(parts.country_code, "");
    }

    #[test]
    fn test_phone_parts_rejects_garbage() {
        assert!(phone_parts("not a phone").is_none());
    }

    #[test]
    fn test_ipv4() {
        assert_eq!(ips("server 192.168.1.10 is down"), vec!["192.168.1.10"]);
    }

    #[test]
    fn test_ipv6() {
        let found = ips("gateway 2001:db8:85a3::8a2e:370:7334 unreachable");
        assert!(found.iter().any(|ip| ip.contains(':')));
    }

    #[test]
    fn test_card_numbers() {
        assert_eq!(
            card_numbers("card 4111-1111-1111-1111 on file"),
            vec!["4111-1111-1111-1111"]
        );
        assert_eq!(
            card_numbers("card 4111111111111111 on file"),
            vec!["4111111111111111"]
        );
    }

    #[test]
    fn test_weights_and_heights() {
        assert_eq!(weights("about 180lbs or 82kgs"), vec!["180lbs", "82kgs"]);
        assert_eq!(heights("stands 5'11 tall"), vec!["5'11"]);
    }
}
