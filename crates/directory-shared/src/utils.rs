//! Utility functions

/// Masks the local part of an email address for log output.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) if at_pos > 0 => {
            let (local, domain) = email.split_at(at_pos);
            let visible = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 });
            format!("{}***{}", visible.collect::<String>(), domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane.doe@example.com"), "ja***@example.com");
        assert_eq!(mask_email("jd@example.com"), "j***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
        assert_eq!(mask_email("@example.com"), "***");
    }
}
