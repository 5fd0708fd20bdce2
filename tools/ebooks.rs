/// Ebooks — train on a corpus of posts and publish new ones to stdout.
///
/// Usage: ebooks (--corpus <posts.txt> | --archive <tweets.csv>) [--cache <sample.ron>] [--config <config.ron>]
///               [--seed <n>] [--count <n>] [--include-retweets] [--ignore-replies]
use ebooks_engine::core::pipeline::EbooksEngine;
use ebooks_engine::io::archive::ArchiveCsvCorpus;
use ebooks_engine::io::corpus::{CachedCorpus, CorpusFilter, CorpusProvider, TextFileCorpus};
use ebooks_engine::io::publish::WriterPublisher;
use std::env;
use std::process;

const USAGE: &str = "Usage: ebooks (--corpus <posts.txt> | --archive <tweets.csv>) [--cache <sample.ron>] [--config <config.ron>] \
[--seed <n>] [--count <n>] [--include-retweets] [--ignore-replies]";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut corpus_path = None;
    let mut archive_path = None;
    let mut cache_path = None;
    let mut config_path = None;
    let mut seed = None;
    let mut count = 1usize;
    let mut filter = CorpusFilter::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--corpus" if i + 1 < args.len() => {
                i += 1;
                corpus_path = Some(args[i].clone());
            }
            "--archive" if i + 1 < args.len() => {
                i += 1;
                archive_path = Some(args[i].clone());
            }
            "--cache" if i + 1 < args.len() => {
                i += 1;
                cache_path = Some(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = Some(args[i].parse::<u64>().unwrap_or_else(|_| {
                    eprintln!("Error: --seed must be a non-negative integer");
                    process::exit(1);
                }));
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --count must be a non-negative integer");
                    process::exit(1);
                });
            }
            "--include-retweets" => filter.ignore_retweets = false,
            "--ignore-replies" => filter.ignore_replies = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{USAGE}");
                process::exit(1);
            }
        }
        i += 1;
    }

    let (source_path, corpus): (String, Box<dyn CorpusProvider>) = match (corpus_path, archive_path) {
        (Some(path), None) => {
            let source = TextFileCorpus::new(&path).with_filter(filter);
            let corpus: Box<dyn CorpusProvider> = match cache_path {
                Some(cache) => Box::new(CachedCorpus::new(source, cache)),
                None => Box::new(source),
            };
            (path, corpus)
        }
        (None, Some(path)) => {
            let source = ArchiveCsvCorpus::new(&path).with_filter(filter);
            let corpus: Box<dyn CorpusProvider> = match cache_path {
                Some(cache) => Box::new(CachedCorpus::new(source, cache)),
                None => Box::new(source),
            };
            (path, corpus)
        }
        _ => {
            eprintln!("Error: exactly one of --corpus or --archive is required");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let mut builder = EbooksEngine::builder().corpus(corpus);
    if let Some(path) = config_path {
        builder = builder.config_path(&path);
    }
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }

    let mut engine = builder.build().unwrap_or_else(|e| {
        eprintln!("Error building generator from '{}': {}", source_path, e);
        process::exit(1);
    });

    let mut publisher = WriterPublisher::stdout();
    for _ in 0..count {
        if let Err(e) = engine.post(&mut publisher) {
            eprintln!("Error generating post: {}", e);
            process::exit(1);
        }
    }
}
