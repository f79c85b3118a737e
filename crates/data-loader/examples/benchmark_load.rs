use data_loader::TrainedModel;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let model_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("Loading trained model from {}...\n", model_dir.display());

    let start = Instant::now();
    let model = TrainedModel::load(&model_dir).expect("Failed to load model artifacts");
    let elapsed = start.elapsed();

    let movies = model.movies().len();
    let cells = model.similarity().scores().len();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Similarity cells: {}", cells);
    println!(
        "\nPerformance: {:.0} cells/second",
        cells as f64 / elapsed.as_secs_f64()
    );
}
