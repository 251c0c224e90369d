//! Order Numbers
//!
//! `SIL-<unix millis>-<000..999>`. The random suffix separates orders placed
//! in the same millisecond; the unique index on `order_number` catches the
//! rest.

use jiff::Timestamp;
use rand::Rng;

const ORDER_NUMBER_PREFIX: &str = "SIL";

/// Build an order number for an order placed at `now`.
pub fn order_number<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(0..1_000);

    format!("{ORDER_NUMBER_PREFIX}-{}-{suffix:03}", now.as_millisecond())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn order_number_has_prefix_millis_and_padded_suffix() -> TestResult {
        let now = Timestamp::from_millisecond(1_767_225_600_123)?;
        let mut rng = StdRng::seed_from_u64(7);

        let number = order_number(now, &mut rng);
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts.first(), Some(&"SIL"));
        assert_eq!(parts.get(1), Some(&"1767225600123"));
        assert_eq!(parts.get(2).map(|suffix| suffix.len()), Some(3));

        Ok(())
    }

    #[test]
    fn suffix_stays_below_one_thousand() -> TestResult {
        let now = Timestamp::from_millisecond(0)?;
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let number = order_number(now, &mut rng);
            let suffix: u16 = number.rsplit('-').next().ok_or("no suffix")?.parse()?;

            assert!(suffix < 1_000);
        }

        Ok(())
    }
}
