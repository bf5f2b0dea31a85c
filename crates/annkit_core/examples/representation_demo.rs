//! Random-representation walkthrough: build a codebook over a small
//! alphabet, perturb a code, tally lookup accuracy and render the whole book
//! as a pixel grid.
//!
//! Usage: cargo run --example representation_demo

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use annkit_core::{bits, Channel, CodeConfig, Codebook, ConfusionMatrix, PixelGrid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = ChaCha20Rng::seed_from_u64(2011);

    let alphabet = ['a', 'b', 'c', 'd', 'e', 'f', 'g'];
    let config = CodeConfig::new(40, 0.3);
    let book = Codebook::with_alphabet(config, &mut rng, alphabet)?;

    println!("Codebook ({} keys, n = {}):", book.len(), book.config().n);
    for key in alphabet {
        println!("  {key} -> {}", book.value_of(&key)?);
    }

    // Degrade a code and see whether it still resolves to its key.
    let original = book.value_of(&'a')?.clone();
    let worn = bits::degrade(&mut rng, &original, 0.25)?;
    println!("\noriginal a: {original}");
    println!("degraded a: {worn} ({} of {} bits still on)", worn.count_on(), original.count_on());
    match book.key_of(&worn) {
        Ok(key) => println!("degraded code still resolves to '{key}'"),
        Err(_) => println!("degraded code no longer resolves (expected: codes are exact keys)"),
    }

    // Tally exact-lookup outcomes for noisy copies of every code.
    let labels: Vec<String> = alphabet.iter().map(char::to_string).collect();
    let mut matrix = ConfusionMatrix::new(labels.clone(), labels);
    for (i, key) in alphabet.iter().enumerate() {
        let noisy = bits::mutate(&mut rng, book.value_of(key)?, 0.02)?;
        let predicted = match book.key_of(&noisy) {
            Ok(k) => alphabet.iter().position(|c| c == k).unwrap_or(i),
            Err(_) => i, // unresolvable, count as a diagonal miss stand-in
        };
        matrix.update(predicted, i)?;
    }
    println!("\n{matrix}");

    // One row per code, rendered as a grey strip.
    let mut grid = PixelGrid::new(0.0, 1.0)?;
    for key in alphabet {
        let row: Vec<f64> = book.value_of(&key)?.to_f32s().iter().map(|&v| v as f64).collect();
        grid.push_row(&row, Channel::Grey)?;
    }
    grid.save("codebook.png")?;
    println!("wrote codebook.png ({} rows)", grid.rows());

    Ok(())
}
