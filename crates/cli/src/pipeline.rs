use crate::config::DoclineConfig;
use anyhow::{Context, Result};
use docline_archetype::{ArchetypeSearch, CacheStats, MemoCache, SearchOutcome, TokenSequence};
use docline_graph::GraphLoader;
use docline_report::{IndexEntry, ReportWriter};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What a report run produced
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub records: usize,
    pub components: usize,
    pub largest_component: Option<usize>,
    pub output_dir: PathBuf,
    pub cache: CacheStats,
}

/// Load the graph, extract one archetype per component and write the HTML report
pub fn run_report(
    input: &Path,
    config: &DoclineConfig,
    jobs: usize,
    show_progress: bool,
) -> Result<ReportSummary> {
    let loader = GraphLoader::new(config.graph.clone())?;
    let graph = loader
        .load_path(input)
        .with_context(|| format!("Failed to load graph from {}", input.display()))?;

    let components = graph.components();
    let largest_component = components.first().map(|c| c.min_id());
    match largest_component {
        Some(id) => println!("Largest component: {id}"),
        None => log::warn!("Input contains no records"),
    }

    let clusters: Vec<Vec<TokenSequence>> = components
        .iter()
        .map(|component| graph.cluster(component))
        .collect::<docline_graph::Result<_>>()?;

    let cache = Arc::new(MemoCache::new(&config.archetype.cache));
    let search = ArchetypeSearch::with_cache(&config.archetype, Arc::clone(&cache))?;
    let outcomes = extract_all(&search, &clusters, jobs, show_progress)?;

    let writer = ReportWriter::new(config.report.clone())?;
    writer.prepare()?;
    let mut entries = Vec::with_capacity(components.len());
    for (component, outcome) in components.iter().zip(&outcomes) {
        writer.write_component(&graph, component, &outcome.archetype)?;
        entries.push(IndexEntry {
            min_id: component.min_id(),
            size: component.len(),
            archetype: outcome.archetype.joined(),
        });
    }
    writer.write_index(&entries)?;

    let stats = cache.stats();
    log::info!(
        "Memo cache: pairs {}/{} hits, clusters {}/{} hits",
        stats.pairs.hits,
        stats.pairs.hits + stats.pairs.misses,
        stats.clusters.hits,
        stats.clusters.hits + stats.clusters.misses,
    );

    Ok(ReportSummary {
        records: graph.node_count(),
        components: components.len(),
        largest_component,
        output_dir: writer.output_dir().to_path_buf(),
        cache: stats,
    })
}

/// Archetypes of all clusters, in input order, computed on `jobs` threads
fn extract_all(
    search: &ArchetypeSearch,
    clusters: &[Vec<TokenSequence>],
    jobs: usize,
    show_progress: bool,
) -> Result<Vec<SearchOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to start worker threads")?;

    let progress = if show_progress {
        let bar = ProgressBar::new(clusters.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("Extracting archetypes {bar:40} {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    log::debug!("Extracting {} archetypes on {jobs} threads", clusters.len());
    let outcomes = pool.install(|| {
        clusters
            .par_iter()
            .map(|cluster| {
                let outcome = search.extract_with_stats(cluster.iter().cloned());
                progress.inc(1);
                outcome
            })
            .collect()
    });
    progress.finish_and_clear();
    Ok(outcomes)
}
