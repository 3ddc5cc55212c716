use parapix::cli::{self, InvertCommand};
use parapix::pipeline::{ImagePipeline, PipelineConfig, Transform};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match InvertCommand::parse(&args) {
        Ok(command) => command,
        Err(error) => {
            eprintln!("{error}");
            eprintln!("{}", cli::INVERT_USAGE);
            process::exit(1);
        }
    };

    let pipeline = ImagePipeline::new(PipelineConfig {
        transform: Transform::Invert,
        workers: command.workers,
    });

    match pipeline.process_file(&command.input, Path::new(cli::INVERT_OUTPUT)) {
        Ok(summary) => {
            println!("Processing time: {}ms", summary.processing_time.as_millis());
        }
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    }
}
