use anyhow::{Context, Result};

// Same `$12,345.67` formatting the dashboard displays.
#[allow(dead_code)]
#[path = "../ui/format.rs"]
mod format;

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

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

const TITLES: [&str; 12] = [
    "Accountant/Auditor",
    "Bus Operator",
    "Correctional Officer",
    "Fire Fighter/Rescuer",
    "Librarian",
    "Management and Budget Specialist",
    "Office Services Coordinator",
    "Police Officer",
    "Program Manager",
    "Public Health Nurse",
    "Senior Engineer",
    "Social Worker",
];

const LEVELS: [&str; 3] = ["I", "II", "III"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_salaries.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Position Title",
        "Position Class Code",
        "Grade",
        "Average Salary",
        "Number of Employees",
    ])?;

    let mut rows = 0;
    for (t, title) in TITLES.iter().enumerate() {
        let base_grade = 10 + rng.range(0, 12);
        for (l, level) in LEVELS.iter().enumerate() {
            let grade = base_grade + 2 * l as u64;
            let salary = 38_000.0 + grade as f64 * 2_100.0 + rng.next_f64() * 9_000.0;
            let employees = rng.range(1, 150);

            writer.write_record([
                format!("{title} {level}"),
                format!("{:06}", 1000 + t * 10 + l),
                grade.to_string(),
                format::currency(salary),
                employees.to_string(),
            ])?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} positions to {output_path}");
    Ok(())
}
