use std::fmt::Write as _;

use encoding_rs::WINDOWS_1252;

/// (common name, scientific name, class, typical overall MLE)
const SPECIES: &[(&str, &str, &str, f64)] = &[
    ("African Lion", "Panthera leo", "Mammalia", 14.7),
    ("Okapi", "Okapia johnstoni", "Mammalia", 17.5),
    ("Giant Anteater", "Myrmecophaga tridactyla", "Mammalia", 14.1),
    ("Red Panda", "Ailurus fulgens", "Mammalia", 13.4),
    ("Sumatran Tiger", "Panthera tigris sumatrae", "Mammalia", 16.0),
    ("Reticulated Giraffe", "Giraffa camelopardalis reticulata", "Mammalia", 20.9),
    ("Guanaco", "Lama guanicoe", "Mammalia", 18.2),
    ("Chilean Flamingo", "Phoenicopterus chilensis", "Aves", 32.0),
    ("Ñandú", "Rhea americana", "Aves", 19.3),
    ("Snowy Owl", "Bubo scandiacus", "Aves", 11.5),
    ("Kea", "Nestor notabilis", "Aves", 15.2),
    ("Emu", "Dromaius novaehollandiae", "Aves", 10.0),
    ("Komodo Dragon", "Varanus komodoensis", "Reptilia", 17.9),
    ("Aldabra Tortoise", "Aldabrachelys gigantea", "Reptilia", 54.0),
    ("Green Anaconda", "Eunectes murinus", "Reptilia", 16.5),
    ("Axolotl", "Ambystoma mexicanum", "Amphibia", 9.4),
    ("Hellbender", "Cryptobranchus alleganiensis", "Amphibia", 23.8),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            // splitmix64
            x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            *slot = z ^ (z >> 31);
        }
        Self { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = self.state[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
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

    /// Uniform value in `[mean - spread, mean + spread]`.
    fn around(&mut self, mean: f64, spread: f64) -> f64 {
        mean + (self.next_f64() * 2.0 - 1.0) * spread
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Header spacing and hyphens as they appear in the published AZA file.
    let mut text = String::from(
        "Species Common Name,Species Scientific Name, TaxonClass ,Overall MLE,\
         Overall CI - lower,Overall CI - upper,Male MLE,Female MLE,Sample Size\n",
    );

    for &(common, scientific, class, mle) in SPECIES {
        let overall = rng.around(mle, 0.5);
        let lower = overall - rng.around(2.0, 1.0);
        let upper = overall + rng.around(2.0, 1.0);
        // Roughly a third of the species report no sex-specific values.
        let (male, female) = if rng.next_f64() < 0.33 {
            (String::new(), String::new())
        } else {
            (
                format!("{:.1}", rng.around(overall, 2.0)),
                format!("{:.1}", rng.around(overall, 2.0)),
            )
        };
        let sample_size = 20 + (rng.next_u64() % 400);
        let _ = writeln!(
            text,
            "{common},{scientific},{class},{overall:.1},{lower:.1},{upper:.1},{male},{female},{sample_size}"
        );
    }

    // One row without an overall value and one line with a stray extra field.
    text.push_str("Pygmy Hippo,Choeropsis liberiensis,Mammalia,,,,,,12\n");
    text.push_str("Tapir,Tapirus terrestris,Mammalia,24.1,22.0,26.0,23.0,25.0,88,extra\n");

    let (bytes, _, unmappable) = WINDOWS_1252.encode(&text);
    if unmappable {
        eprintln!("warning: some characters could not be encoded as latin-1");
    }

    let output_path = "AZA_MLE_Jul2018 (1).csv";
    if let Err(e) = std::fs::write(output_path, &bytes) {
        eprintln!("Failed to write {output_path}: {e}");
        std::process::exit(1);
    }

    println!(
        "Wrote {} species (+2 rows the dashboard drops) to {output_path}",
        SPECIES.len()
    );
}
