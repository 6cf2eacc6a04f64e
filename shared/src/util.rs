/// 获取当前 UTC 时间戳（毫秒）
///
/// All rate-limit windows and record timestamps derive from this single
/// UTC clock, so window math is immune to server-timezone and DST drift.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a human-readable order number: UTC datetime + 6 random digits.
///
/// Uniqueness is enforced by the database constraint; the random suffix
/// keeps collisions within the same second vanishingly rare.
pub fn order_no() -> String {
    use rand::Rng;
    let ts = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{ts}{suffix:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_no_shape() {
        let no = order_no();
        assert_eq!(no.len(), 20);
        assert!(no.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn order_no_distinct() {
        // Not a uniqueness proof, just a sanity check on the random suffix
        let a = order_no();
        let b = order_no();
        let c = order_no();
        assert!(a != b || b != c);
    }
}
