//! CLI front-end: reads résumé and job-description text files (plus optional
//! file-facts JSON) and prints the scoring report. Stands in for the HTTP
//! collaborator that normally feeds the engine extracted text.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use engine::{Engine, EngineConfig, FileFacts};

fn main() -> Result<()> {
    let config = EngineConfig::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (resume_path, job_path, facts_path) = match args.as_slice() {
        [resume, job] => (PathBuf::from(resume), PathBuf::from(job), None),
        [resume, job, facts] => (
            PathBuf::from(resume),
            PathBuf::from(job),
            Some(PathBuf::from(facts)),
        ),
        _ => bail!("usage: engine <resume.txt> <job_description.txt> [file_facts.json]"),
    };

    let resume_text = std::fs::read_to_string(&resume_path)
        .with_context(|| format!("failed to read resume file {}", resume_path.display()))?;
    let job_text = std::fs::read_to_string(&job_path)
        .with_context(|| format!("failed to read job description {}", job_path.display()))?;
    let file_facts: Option<FileFacts> = match facts_path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read file facts {}", path.display()))?;
            Some(serde_json::from_str(&raw).context("file facts JSON is malformed")?)
        }
        None => None,
    };

    let engine = Engine::new(config)?;
    info!(
        resume = %resume_path.display(),
        job = %job_path.display(),
        "Scoring resume against job description"
    );

    let report = engine.score_resume(&resume_text, &job_text, file_facts.as_ref());
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
