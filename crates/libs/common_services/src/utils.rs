/// Short random identifier, used to tell worker instances apart in logs.
#[must_use]
pub fn nice_id(length: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    (0..length)
        .map(|_| ALPHABET[fastrand::usize(..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::nice_id;

    #[test]
    fn has_requested_length() {
        assert_eq!(nice_id(8).len(), 8);
        assert!(nice_id(8).chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
