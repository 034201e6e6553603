//! # Accuracy
//!
//! Observed false positive rates against the sizing model, for a single
//! filter and for a scalable chain.

#[cfg(test)]
mod tests {
    use biobloom_filter::domain::calculate_fpr;
    use biobloom_filter::{BloomFilter, ScalableBloomFilter};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_keys(rng: &mut StdRng, count: usize, prefix: &str) -> Vec<String> {
        (0..count)
            .map(|_| format!("{}{:016x}", prefix, rng.gen::<u64>()))
            .collect()
    }

    fn observed_fpr<F: Fn(&[u8]) -> bool>(query: F, absent: &[String]) -> f64 {
        let hits = absent.iter().filter(|k| query(k.as_bytes())).count();
        hits as f64 / absent.len() as f64
    }

    #[test]
    fn test_fpr_within_target_across_sizes() {
        let mut rng = StdRng::seed_from_u64(7);

        for (n, p) in [(500, 0.1), (2_000, 0.05), (5_000, 0.01)] {
            let mut filter = BloomFilter::new_with_fpr(n, p).unwrap();
            let present = random_keys(&mut rng, n, "in-");
            for key in &present {
                filter.add(key.as_bytes());
            }
            assert!(present.iter().all(|k| filter.query(k.as_bytes())));

            let absent = random_keys(&mut rng, 20_000, "out-");
            let rate = observed_fpr(|k| filter.query(k), &absent);
            let sigma = (p * (1.0 - p) / absent.len() as f64).sqrt();
            assert!(
                rate <= p + 4.0 * sigma,
                "n={} p={} observed {}",
                n,
                p,
                rate
            );
        }
    }

    #[test]
    fn test_model_prediction_tracks_observation() {
        let mut rng = StdRng::seed_from_u64(11);
        // Undersized on purpose so the rate is large enough to measure
        let mut filter = BloomFilter::new(2_000, 3).unwrap();
        for key in random_keys(&mut rng, 2_000, "in-") {
            filter.add(key.as_bytes());
        }

        let predicted = calculate_fpr(2_000, 2_000, 3);
        let absent = random_keys(&mut rng, 20_000, "out-");
        let rate = observed_fpr(|k| filter.query(k), &absent);
        assert!(
            (rate - predicted).abs() < 0.03,
            "predicted {} observed {}",
            predicted,
            rate
        );
    }

    #[test]
    fn test_scalable_chain_stays_under_compound_bound() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut chain = ScalableBloomFilter::new(1_000, 0.05).unwrap();
        let present = random_keys(&mut rng, 5_000, "in-");
        for key in &present {
            chain.add(key.as_bytes()).unwrap();
        }

        assert_eq!(chain.filter_count(), 5);
        assert!(present.iter().all(|k| chain.query(k.as_bytes())));

        let bound = chain.compound_fpr_bound();
        let absent = random_keys(&mut rng, 20_000, "out-");
        let rate = observed_fpr(|k| chain.query(k), &absent);
        assert!(rate <= bound, "bound {} observed {}", bound, rate);
    }
}
