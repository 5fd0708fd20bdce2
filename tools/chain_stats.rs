/// Chain Stats — train a chain on a corpus file and report its shape.
///
/// Usage: chain_stats --input <posts.txt> [--top <n>]
use ebooks_engine::core::chain::Chain;
use ebooks_engine::io::corpus::{CorpusProvider, TextFileCorpus};
use ebooks_engine::schema::token::Token;
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut top = 10usize;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" if i + 1 < args.len() => {
                i += 1;
                input = Some(args[i].clone());
            }
            "--top" if i + 1 < args.len() => {
                i += 1;
                top = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --top must be a non-negative integer");
                    process::exit(1);
                });
            }
            "--help" | "-h" => {
                println!("Usage: chain_stats --input <posts.txt> [--top <n>]");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input.unwrap_or_else(|| {
        eprintln!("Error: --input is required");
        eprintln!("Usage: chain_stats --input <posts.txt> [--top <n>]");
        process::exit(1);
    });

    let texts = TextFileCorpus::new(&input_path)
        .training_texts()
        .unwrap_or_else(|e| {
            eprintln!("Error reading corpus '{}': {}", input_path, e);
            process::exit(1);
        });

    println!("Training on {} texts from '{}'...", texts.len(), input_path);
    let chain = Chain::train(&texts);

    let stats = chain.stats();
    println!(
        "Chain trained: {} predecessors, {} transitions, {} observations",
        stats.predecessors, stats.transitions, stats.observations
    );

    let Some(openers) = chain.successors(&Token::Begin) else {
        return;
    };
    let total = chain.total(&Token::Begin).unwrap_or(0);
    let mut openers = openers.to_vec();
    openers.sort_by(|a, b| b.1.cmp(&a.1));

    println!("Most common openers:");
    for (token, count) in openers.iter().take(top) {
        let label = token.content().unwrap_or("<end>");
        println!(
            "  {:>6}  {:>5.1}%  {}",
            count,
            f64::from(*count) * 100.0 / f64::from(total.max(1)),
            label
        );
    }
}
