use glyphtier::{
    ClusterConfig, ConnectedComponents, DistanceIndex, Mcl, NoopObserver, RecursiveClusterer,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two type families: serifs and grotesques, far from each other. Each
    // family is two tight triples joined by one closer pair (Baskerville and
    // Bodoni, Univers and Futura). Twelve fonts, cap of five: the families
    // split first and each six-font family is split again one level down.
    let names = [
        "Garamond",
        "Caslon",
        "Baskerville",
        "Bodoni",
        "Didot",
        "Walbaum",
        "Helvetica",
        "Arial",
        "Univers",
        "Futura",
        "Avenir",
        "Century Gothic",
    ];
    let n = names.len();
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        0.0
                    } else if i / 6 != j / 6 {
                        0.9
                    } else if i / 3 == j / 3 {
                        0.1
                    } else if (i % 6, j % 6) == (2, 3) || (i % 6, j % 6) == (3, 2) {
                        0.2
                    } else {
                        0.5
                    }
                })
                .collect()
        })
        .collect();
    let index = DistanceIndex::new(names.iter().map(|s| s.to_string()).collect(), rows)?;

    let config = ClusterConfig::default().with_max_cluster_size(5);

    let mcl = RecursiveClusterer::new(Mcl::new())
        .with_config(config.clone())
        .with_observer(NoopObserver)
        .cluster(&index)?;
    println!("mcl:\n{}", mcl);

    let components = RecursiveClusterer::new(ConnectedComponents::new())
        .with_config(config.clone())
        .with_observer(NoopObserver)
        .cluster(&index)?;
    println!("components:\n{}", components);

    let stats = components.stats(config.max_cluster_size);
    println!(
        "leaves={} entities={} depth={} largest={}",
        stats.leaves, stats.entities, stats.depth, stats.largest_leaf
    );

    let report = components.validate_partition(index.names(), config.max_cluster_size);
    println!("{}", report);

    println!("{}", serde_json::to_string_pretty(&components)?);
    Ok(())
}
