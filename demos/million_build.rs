use minimal_perfect_hash::{BuildConfig, MinimalPerfectHash, MphError, Seed};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;
use std::time::Instant;

const N_KEYS: usize = 1_000_000;
const GEN_SEED: u64 = 42;

fn main() -> Result<(), MphError> {
    env_logger::init();

    sample_run();

    println!("--- minimal_perfect_hash throughput ---");
    println!("n = {N_KEYS}");

    let t0 = Instant::now();
    let keys = gen_unique_keys(N_KEYS, GEN_SEED);
    let gen_s = t0.elapsed().as_secs_f64();
    println!(
        "gen:    {:>8.3} s   ({:.1} M keys/s)",
        gen_s,
        N_KEYS as f64 / gen_s / 1e6
    );

    let cfg = BuildConfig {
        load_factor: 1.25,
        max_attempts: 32,
        seed: Seed(GEN_SEED),
    };

    let t1 = Instant::now();
    let mph = MinimalPerfectHash::build(&keys, &cfg)?;
    let build_s = t1.elapsed().as_secs_f64();
    println!(
        "build:  {:>8.3} s   ({:.1} M keys/s)",
        build_s,
        N_KEYS as f64 / build_s / 1e6
    );

    let t2 = Instant::now();
    let mut acc: u64 = 0;
    for chunk in keys.chunks(32_768) {
        for k in chunk {
            acc ^= mph.get_hash(k) as u64;
        }
    }
    let lookup_s = t2.elapsed().as_secs_f64();
    println!(
        "lookup: {:>8.3} s   ({:.1} M lookups/s)   (acc={acc})",
        lookup_s,
        N_KEYS as f64 / lookup_s / 1e6
    );

    println!("----------------------------------------------");
    println!(
        "Total (gen + build + lookup): {:.3} s",
        gen_s + build_s + lookup_s
    );

    Ok(())
}

/// Small illustrative printout in the style of the reference `sample.cc`:
/// one `<key>\t<hash>` line per key, over ints then strings.
fn sample_run() {
    let ints: Vec<i32> = vec![1, 11, 111, 1111, 11111, 111111];
    let mph = MinimalPerfectHash::build(&ints, &BuildConfig::default()).expect("build");
    for k in &ints {
        println!("{k}\t{}", mph.get_hash(k));
    }
    println!();

    let strings: Vec<&str> = vec!["hoge", "piyo", "fuga", "foo", "bar"];
    let mph = MinimalPerfectHash::build(&strings, &BuildConfig::default()).expect("build");
    for k in &strings {
        println!("{k}\t{}", mph.get_hash(k));
    }
    println!();
}

/// Generate N unique 16-byte keys (raw bytes), deterministically.
fn gen_unique_keys(n: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = HashSet::with_capacity(n * 2);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let mut buf = [0u8; 16];
        rng.fill_bytes(&mut buf);
        if set.insert(buf) {
            keys.push(buf.to_vec());
        }
    }
    keys
}
