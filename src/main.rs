extern crate pretty_env_logger;

#[macro_use]
extern crate log;

use clap::Parser;
use knnkm::{run, Cli, Commands, KnnkmParams, Record, RecordParser, Report};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::path::Path;

fn read_records(path: &Path) -> Vec<Record> {
    match RecordParser::new(path).parse() {
        Ok(records) => records,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run_main<T: KnnkmParams>(args: T) {
    info!("params: {:#?}", args);
    if !args.validate() {
        error!("please fix arguments");
        std::process::exit(1);
    }

    let io = args.io();
    let mut training = read_records(&io.train);
    let mut test = read_records(&io.test);

    let seed = io.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    info!("random seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let summary = match run(&mut training, &mut test, &args.run_config(), &mut rng) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let report = Report::new(&training, &test, &summary);
    println!("{}", report.text());
    println!("=======================================================");
    if let Err(e) = report.write(&io.output) {
        error!("unable to write {}: {}", io.output.display(), e);
        std::process::exit(1);
    }
    println!("\"{}\" is generated.", io.output.display());
    info!("finished");
}

fn main() {
    let args = Cli::parse();
    let debug = match &args.command {
        Commands::Knn(a) => a.debug(),
        Commands::Kmeans(a) => a.debug(),
    };
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();

    info!("starting");
    match args.command {
        Commands::Knn(a) => run_main(a),
        Commands::Kmeans(a) => run_main(a),
    }
}
