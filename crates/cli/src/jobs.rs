const MAX_JOBS: usize = 64;

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn parse_jobs(raw: Option<&str>, default_value: usize) -> usize {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default_value)
        .clamp(1, MAX_JOBS)
}

/// Worker count: flag, then config file, then `DOCLINE_JOBS`, then CPU count
pub fn resolve_jobs(flag: Option<usize>, config: Option<usize>) -> usize {
    if let Some(jobs) = flag.or(config) {
        return jobs.clamp(1, MAX_JOBS);
    }
    let raw = std::env::var("DOCLINE_JOBS").ok();
    parse_jobs(raw.as_deref(), default_jobs())
}
