use rand::Rng;

/// Mainland mobile number: 11 digits, leading `1`, second digit 3-9.
pub fn is_valid_mobile(mobile: &str) -> bool {
    let bytes = mobile.as_bytes();
    bytes.len() == 11
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
}

/// Six random decimal digits.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..6)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_mobiles() {
        assert!(is_valid_mobile("13800000000"));
        assert!(is_valid_mobile("19912345678"));
    }

    #[test]
    fn rejects_invalid_mobiles() {
        assert!(!is_valid_mobile(""));
        assert!(!is_valid_mobile("1380000000"));
        assert!(!is_valid_mobile("138000000000"));
        assert!(!is_valid_mobile("12800000000"));
        assert!(!is_valid_mobile("23800000000"));
        assert!(!is_valid_mobile("1380000000a"));
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
