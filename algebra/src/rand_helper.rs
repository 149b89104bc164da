use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

const FIXED_SEED: u64 = 0x1d2c_07a5_c8e1_0017;

/// Should be used only for tests, not for any real world usage.
#[cfg(not(feature = "std"))]
pub fn test_rng() -> ChaChaRng {
    ChaChaRng::seed_from_u64(FIXED_SEED)
}

/// Should be used only for tests, not for any real world usage.
///
/// Setting `DETERMINISTIC_TEST_RNG=1` replays a fixed seed, which makes a
/// failing randomized test reproducible.
#[cfg(feature = "std")]
pub fn test_rng() -> ChaChaRng {
    match std::env::var("DETERMINISTIC_TEST_RNG") {
        Ok(val) if val == "1" => ChaChaRng::seed_from_u64(FIXED_SEED),
        _ => ChaChaRng::from_entropy(),
    }
}

#[cfg(all(test, feature = "std"))]
mod test {
    use ark_std::UniformRand;
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    #[test]
    fn test_fixed_seed_replays() {
        let mut rng = ChaChaRng::seed_from_u64(super::FIXED_SEED);
        let a = u128::rand(&mut rng);
        let mut rng = ChaChaRng::seed_from_u64(super::FIXED_SEED);
        let b = u128::rand(&mut rng);
        assert_eq!(a, b);
    }

    #[test]
    fn test_entropy_rng_differs() {
        if std::env::var("DETERMINISTIC_TEST_RNG").as_deref() == Ok("1") {
            return;
        }
        let a = u128::rand(&mut super::test_rng());
        let b = u128::rand(&mut super::test_rng());
        assert_ne!(a, b); // should be unequal with high probability.
    }
}
