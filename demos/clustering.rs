//! PMF clustering on a small categorical dataset.
//!
//! Run with `RUST_LOG=catclump=debug` to see iterations and swaps.

use catclump::{CategoricalDataset, CategoricalPmf};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three loose groups: small pets, farm animals, birds of prey.
    let rows: Vec<Vec<&str>> = vec![
        vec!["fur", "four", "small", "indoor"],
        vec!["fur", "four", "small", "indoor"],
        vec!["fur", "four", "medium", "indoor"],
        vec!["fur", "four", "small", "outdoor"],
        vec!["hair", "four", "large", "outdoor"],
        vec!["wool", "four", "large", "outdoor"],
        vec!["hair", "four", "large", "outdoor"],
        vec!["wool", "four", "medium", "outdoor"],
        vec!["feathers", "two", "medium", "outdoor"],
        vec!["feathers", "two", "small", "outdoor"],
        vec!["feathers", "two", "medium", "outdoor"],
        vec!["feathers", "two", "large", "outdoor"],
    ];

    let (data, vocab) = match CategoricalDataset::encode(&rows) {
        Ok(encoded) => encoded,
        Err(e) => {
            eprintln!("encoding failed: {e}");
            return;
        }
    };
    println!(
        "{} points, {} dimensions, categories per dimension: {:?}",
        data.n_points(),
        data.n_dims(),
        data.category_counts()
    );
    println!("dimension 0 vocabulary: {:?}", vocab[0]);

    let fit = match CategoricalPmf::new(3)
        .with_seed(42)
        .with_random_swaps(10)
        .fit(&data)
    {
        Ok(fit) => fit,
        Err(e) => {
            eprintln!("clustering failed: {e}");
            return;
        }
    };

    println!(
        "\n=== PMF clustering (k=3) === iterations={} converged={} impurity={:.3} swaps kept={}",
        fit.n_iter, fit.converged, fit.impurity, fit.swaps_accepted
    );
    for (row, label) in rows.iter().zip(&fit.labels) {
        println!("  {:<40} => cluster {}", row.join(" "), label);
    }
}
