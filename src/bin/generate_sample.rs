/// Writes a deterministic synthetic passenger dataset in the Kaggle CSV
/// layout, for demos and manual testing without the real file.
///
/// Usage: `cargo run --bin generate_sample [output.csv]`

fn gauss_clamped(rng: &mut SimpleRng, mean: f64, std_dev: f64, lo: f64, hi: f64) -> f64 {
    rng.gauss(mean, std_dev).clamp(lo, hi)
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
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "titanic-sample.csv".to_string());

    // (class, share of passengers, mean fare, survival odds by sex)
    let classes: [(&str, f64, f64, [f64; 2]); 3] = [
        ("1", 0.24, 84.0, [0.97, 0.37]),
        ("2", 0.21, 21.0, [0.92, 0.16]),
        ("3", 0.55, 13.0, [0.50, 0.14]),
    ];
    let towns = ["S", "C", "Q"];
    let surnames = [
        "Abbott", "Becker", "Carter", "Dean", "Egerton", "Fortune", "Graham", "Hart",
        "Ibsen", "Jensen", "Keane", "Lindqvist", "Moran", "Navratil", "Olsen", "Palsson",
        "Quick", "Rice", "Sandström", "Thayer",
    ];

    let n_rows = 250;
    let mut writer = csv::Writer::from_path(&output_path).expect("Failed to create output file");
    writer
        .write_record([
            "PassengerId",
            "Survived",
            "Pclass",
            "Name",
            "Sex",
            "Age",
            "SibSp",
            "Parch",
            "Ticket",
            "Fare",
            "Cabin",
            "Embarked",
        ])
        .expect("Failed to write header");

    for id in 1..=n_rows {
        // Pick a class by cumulative share.
        let roll = rng.next_f64();
        let mut acc = 0.0;
        let mut class = classes[classes.len() - 1];
        for c in classes {
            acc += c.1;
            if roll < acc {
                class = c;
                break;
            }
        }
        let (label, _, mean_fare, survival_odds) = class;

        let is_female = rng.next_f64() < 0.35;
        let sex = if is_female { "female" } else { "male" };
        let survived = rng.next_f64() < survival_odds[usize::from(!is_female)];

        // Roughly a fifth of ages are unknown, like the real dataset.
        let age = if rng.next_f64() < 0.2 {
            String::new()
        } else {
            format!("{:.0}", gauss_clamped(&mut rng, 30.0, 14.0, 1.0, 80.0))
        };

        let fare = gauss_clamped(&mut rng, mean_fare, mean_fare * 0.4, 4.0, 512.0);
        let surname = surnames[(rng.next_u64() % surnames.len() as u64) as usize];
        let (title, first) = if is_female {
            ("Mrs.", "Mary")
        } else {
            ("Mr.", "John")
        };
        let cabin = if label == "1" && rng.next_f64() < 0.7 {
            format!("C{}", 1 + rng.next_u64() % 120)
        } else {
            String::new()
        };
        let town = towns[(rng.next_u64() % towns.len() as u64) as usize];

        writer
            .write_record([
                id.to_string(),
                u8::from(survived).to_string(),
                label.to_string(),
                format!("{surname}, {title} {first}"),
                sex.to_string(),
                age,
                (rng.next_u64() % 3).to_string(),
                (rng.next_u64() % 3).to_string(),
                format!("PC {}", 10000 + id),
                format!("{fare:.4}"),
                cabin,
                town.to_string(),
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} passengers to {output_path}");
}
