use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

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
}

/// Shape of one synthetic experiment tree.
struct Layout {
    data_subdir: &'static str,
    suffix: &'static str,
    header: &'static str,
    series: &'static [&'static str],
    groups: usize,
    runs_per_group: i64,
    /// Index step between runs of a group.
    step: i64,
    /// Typical value of the third-from-last column on an active run.
    load: f64,
}

const PERFORMANCE: Layout = Layout {
    data_subdir: "performance",
    suffix: "_performance.csv",
    header: "step,tx_bytes,delay_ms,loss",
    series: &["hops", "loss", "delay", "bandwidtha", "q-learning", "q-learning-with-flow"],
    groups: 16,
    runs_per_group: 6,
    step: 1,
    load: 40_000.0,
};

const METRICS: Layout = Layout {
    data_subdir: "Metrics",
    suffix: "_net_metrics.csv",
    header: "time,throughput,loss,delay",
    series: &["dr", "loss", "delay", "bandwidtha", "comp"],
    groups: 8,
    runs_per_group: 5,
    step: 2,
    load: 250_000.0,
};

fn write_run(path: &Path, header: &str, rows: &[[f64; 4]]) {
    let file = File::create(path).expect("Failed to create run file");
    let mut out = BufWriter::new(file);
    writeln!(out, "{header}").expect("Failed to write header");
    for r in rows {
        writeln!(out, "{},{:.3},{:.4},{:.4}", r[0], r[1], r[2], r[3]).expect("Failed to write row");
    }
}

fn generate(root: &Path, layout: &Layout, rng: &mut SimpleRng) -> usize {
    let mut written = 0;
    for (s, series) in layout.series.iter().enumerate() {
        let dir = root.join(series).join(layout.data_subdir);
        fs::create_dir_all(&dir).expect("Failed to create series directory");

        let bias = 1.0 + 0.15 * s as f64;
        let mut index: i64 = 1;
        for g in 0..layout.groups {
            // Daily load curve: busier around midday.
            let hour = g as f64 / layout.groups as f64;
            let load = layout.load * bias * (0.6 + 0.4 * (std::f64::consts::PI * hour).sin());

            for _ in 0..layout.runs_per_group {
                let rows: Vec<[f64; 4]> = (0..20)
                    .map(|t| {
                        [
                            t as f64,
                            rng.gauss(load, load * 0.05).max(0.0),
                            rng.gauss(20.0 * bias, 2.0).max(0.0),
                            rng.gauss(0.02 * bias, 0.005).clamp(0.0, 1.0),
                        ]
                    })
                    .collect();
                write_run(&dir.join(format!("{index}{}", layout.suffix)), layout.header, &rows);
                written += 1;
                index += layout.step;
            }

            // Idle run between groups; never passes selection.
            let idle = [[0.0, 10.0, 0.0, 0.0]];
            write_run(&dir.join(format!("{index}{}", layout.suffix)), layout.header, &idle);
            written += 1;
            index += layout.step * 3 + 1;
        }
    }
    written
}

fn main() {
    let root = std::env::args().nth(1).unwrap_or_else(|| "sample_runs".to_string());
    let root = Path::new(&root);
    let mut rng = SimpleRng::new(42);

    let perf = generate(root, &PERFORMANCE, &mut rng);
    let metrics = generate(root, &METRICS, &mut rng);

    println!(
        "Wrote {perf} performance runs and {metrics} metrics runs under {}",
        root.display()
    );
}
