use std::fmt::Write as _;

use anyhow::{Context, Result};

const SAMPLES: usize = 400;
const OUTPUT: &str = "curvature.txt";

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Fisher-Yates shuffle of `0..n`.
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..n).collect();
        for i in (1..n).rev() {
            let j = (self.next_u64() % (i as u64 + 1)) as usize;
            perm.swap(i, j);
        }
        perm
    }
}

/// Writes a synthetic `curvature.txt`: a filament with three bends, segment
/// lengths jittered around a constant step, and the curvature column stored
/// in shuffled order together with the index that restores it.
fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let bends = [(0.2, 0.03, 1.8), (0.55, 0.05, 1.2), (0.8, 0.02, 2.5)];
    let step = 1.0 / SAMPLES as f64;

    let lengths: Vec<f64> = (0..SAMPLES)
        .map(|_| (step * (1.0 + rng.gauss(0.0, 0.05))).max(step * 0.5))
        .collect();

    let total: f64 = lengths.iter().sum();
    let mut s = 0.0;
    let profile: Vec<f64> = lengths
        .iter()
        .map(|len| {
            s += len;
            let bend: f64 = bends
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(s / total, mu, sigma, amp))
                .sum();
            1.05 + bend + rng.gauss(0.0, 0.004)
        })
        .collect();

    // order[i] says which stored row holds profile value i.
    let order = rng.permutation(SAMPLES);
    let mut stored = vec![0.0; SAMPLES];
    for (i, &row) in order.iter().enumerate() {
        stored[row] = profile[i];
    }

    let mut text = String::from("# segment_length  curvature  reorder_index\n");
    for i in 0..SAMPLES {
        writeln!(text, "{:.8e} {:.8e} {}", lengths[i], stored[i], order[i])?;
    }

    std::fs::write(OUTPUT, text).with_context(|| format!("writing {OUTPUT}"))?;
    println!("Wrote {SAMPLES} rows to {OUTPUT}");
    Ok(())
}
