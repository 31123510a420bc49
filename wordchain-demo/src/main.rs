use std::path::PathBuf;

use clap::Parser;
use log::info;

use wordchain_core::io::resolve_path;
use wordchain_core::{Corpus, Distribution, TransitionModel};

#[derive(Parser, Debug)]
#[command(name = "wordchain-demo")]
#[command(about = "Naive vs. learned next-word prediction on a tiny corpus")]
struct Cli {
    /// Corpus file, one sentence per line (built-in corpus when omitted)
    corpus: Option<PathBuf>,

    /// Maximum number of words added after each seed
    #[arg(short, long, default_value_t = 5)]
    steps: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    // Thread-local generator, seeded from the OS
    let mut rng = rand::rng();

    // Without learning: a fixed table of likelihoods for the next word
    let choices = Distribution::from_weights([("coffee", 0.6), ("tea", 0.3), ("juice", 0.1)])?;
    println!(">>> FIXED LIKELIHOODS");
    println!("Naive pick: {}", choices.sample_uniform(&mut rng)?);
    println!("Weighted pick: {}", choices.sample(&mut rng)?);
    println!();

    let corpus = match &cli.corpus {
        Some(path) => {
            let path = resolve_path(path);
            info!("Loading corpus from {}", path.display());
            Corpus::from_file(path)?
        }
        None => Corpus::builtin(),
    };
    let model = TransitionModel::build(&corpus);

    println!(">>> SIMPLE PREDICTION EXAMPLES");
    println!("Naive (no learning): {}", model.sample_vocabulary(&mut rng)?);
    for context in ["i", "want"] {
        // An unknown context is reported, not fatal
        match model.sample_weighted(context, &mut rng) {
            Ok(next) => println!("Weighted (after '{}'): {}", context, next),
            Err(e) => println!("Weighted (after '{}'): {}", context, e),
        }
    }
    println!();

    println!(">>> LEARNED PROBABILITIES");
    for context in ["i", "want"] {
        let distribution = model.get_distribution(context);
        let pairs: Vec<String> = distribution
            .iter()
            .map(|(next, p)| format!("{} {:.2}", next, p))
            .collect();
        println!("After '{}': {}", context, pairs.join(", "));
    }
    println!();

    println!(">>> GENERATED SENTENCES");
    for start in ["i", "can", "coffee"] {
        println!("{}", model.generate_sentence(start, cli.steps, &mut rng));
    }

    Ok(())
}
