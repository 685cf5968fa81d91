//! Integration tests driven by the same two key-generation strategies the
//! reference test suite used: keys drawn in increasing (ordered) sequence,
//! and keys drawn at random and deduplicated. Exercises both `PerfectHash`
//! and `MinimalPerfectHash` over integers, pairs, strings, and sequences.

use minimal_perfect_hash::{BuildConfig, KeyBytes, MinimalPerfectHash, PerfectHash, Seq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn check_minimal<K: KeyBytes>(mph: &MinimalPerfectHash, keys: &[K]) {
    let mut seen = HashSet::with_capacity(keys.len());
    for k in keys {
        let h = mph.get_hash(k);
        assert!(h < mph.get_range());
        assert!(seen.insert(h), "collision for a key");
    }
    assert_eq!(mph.get_range() as usize, keys.len());
}

fn check_perfect<K: KeyBytes>(ph: &PerfectHash, keys: &[K]) {
    let mut seen = HashSet::with_capacity(keys.len());
    for k in keys {
        let h = ph.get_hash(k);
        assert!(h < ph.get_range());
        assert!(seen.insert(h), "collision for a key");
    }
}

mod ordered_keys {
    use super::*;

    #[test]
    fn growing_integer_sets_from_zero_to_one_hundred() {
        for n in 0u32..=100 {
            let keys: Vec<u32> = (0..n).collect();
            let mph = MinimalPerfectHash::build(&keys, &BuildConfig::default())
                .unwrap_or_else(|e| panic!("build failed at n={n}: {e}"));
            check_minimal(&mph, &keys);
        }
    }

    #[test]
    fn pairs_enumerated_by_increasing_sum() {
        // (a, b) pairs with a + b = t, t increasing, matching the reference
        // generator's diagonal enumeration order.
        let mut keys: Vec<(u32, u32)> = Vec::new();
        'outer: for t in 0u32.. {
            for a in 0..=t {
                if keys.len() >= 500 {
                    break 'outer;
                }
                keys.push((a, t - a));
            }
        }
        let ph = PerfectHash::build(&keys, &BuildConfig::default()).unwrap();
        check_perfect(&ph, &keys);
    }

    #[test]
    fn strings_from_base_26_counter() {
        // Successive base-26 strings over 'a'..'z', the same shape as the
        // reference generator's digit-increment scheme.
        fn next(s: &mut Vec<u8>) {
            let mut i = s.len();
            loop {
                if i == 0 {
                    s.insert(0, b'a');
                    return;
                }
                i -= 1;
                if s[i] == b'z' {
                    s[i] = b'a';
                } else {
                    s[i] += 1;
                    return;
                }
            }
        }
        let mut cur = vec![b'a'];
        let mut keys = Vec::new();
        for _ in 0..300 {
            keys.push(String::from_utf8(cur.clone()).unwrap());
            next(&mut cur);
        }
        let mph = MinimalPerfectHash::build(&keys, &BuildConfig::default()).unwrap();
        check_minimal(&mph, &keys);
    }
}

mod random_keys {
    use super::*;

    fn unique_random_u32s(rng: &mut StdRng, count: usize) -> Vec<u32> {
        let mut set = HashSet::with_capacity(count * 2);
        while set.len() < count {
            set.insert(rng.gen::<u32>());
        }
        set.into_iter().collect()
    }

    #[test]
    fn random_integer_sets_of_growing_size() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [0usize, 1, 2, 5, 17, 64, 100] {
            let keys = unique_random_u32s(&mut rng, n);
            let mph = MinimalPerfectHash::build(&keys, &BuildConfig::default()).unwrap();
            check_minimal(&mph, &keys);
        }
    }

    #[test]
    fn random_pairs_and_strings() {
        let mut rng = StdRng::seed_from_u64(11);

        let mut pair_set = HashSet::new();
        while pair_set.len() < 200 {
            pair_set.insert((rng.gen::<u16>() as u32, rng.gen::<u16>() as u32));
        }
        let pairs: Vec<(u32, u32)> = pair_set.into_iter().collect();
        let ph = PerfectHash::build(&pairs, &BuildConfig::default()).unwrap();
        check_perfect(&ph, &pairs);

        let mut str_set = HashSet::new();
        while str_set.len() < 200 {
            let len = rng.gen_range(1..12);
            let s: String = (0..len)
                .map(|_| (b'a' + rng.gen_range(0..26u8)) as char)
                .collect();
            str_set.insert(s);
        }
        let strings: Vec<String> = str_set.into_iter().collect();
        let mph = MinimalPerfectHash::build(&strings, &BuildConfig::default()).unwrap();
        check_minimal(&mph, &strings);
    }

    #[test]
    fn random_sequences_of_integers() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut seqs = Vec::new();
        let mut dedup = HashSet::new();
        while seqs.len() < 150 {
            let len = rng.gen_range(0..6);
            let v: Vec<u32> = (0..len).map(|_| rng.gen_range(0..50)).collect();
            if dedup.insert(v.clone()) {
                seqs.push(Seq(v));
            }
        }
        let mph = MinimalPerfectHash::build(&seqs, &BuildConfig::default()).unwrap();
        check_minimal(&mph, &seqs);
    }

    #[test]
    fn large_mixed_scale_roughly_one_hundred_thousand() {
        let mut rng = StdRng::seed_from_u64(99);
        let keys = unique_random_u32s(&mut rng, 100_000);
        let mph = MinimalPerfectHash::build(&keys, &BuildConfig::default()).unwrap();
        check_minimal(&mph, &keys);
    }

    #[test]
    fn fifty_thousand_keys_survive_a_serialization_round_trip() {
        let mut rng = StdRng::seed_from_u64(2024);
        let keys = unique_random_u32s(&mut rng, 50_000);
        let mph = MinimalPerfectHash::build(&keys, &BuildConfig::default()).unwrap();

        let mut bin_buf = Vec::new();
        mph.serialize(&mut bin_buf).unwrap();
        let loaded_bin = MinimalPerfectHash::deserialize(&bin_buf[..]).unwrap();
        for k in &keys {
            assert_eq!(mph.get_hash(k), loaded_bin.get_hash(k));
        }
        assert_eq!(loaded_bin.get_range(), keys.len() as u32);

        let mut text_buf = Vec::new();
        mph.serialize_text(&mut text_buf).unwrap();
        let loaded_text = MinimalPerfectHash::deserialize_text(&text_buf[..]).unwrap();
        for k in &keys {
            assert_eq!(mph.get_hash(k), loaded_text.get_hash(k));
        }
        assert_eq!(loaded_text.get_range(), keys.len() as u32);
    }
}
