// src/cli/roadmap.rs — Validate an AI roadmap response offline and optionally track it

use anyhow::Context;
use chrono::Utc;

use crate::infra::errors::LearnpathError;
use crate::infra::paths;
use crate::progress::store::{load_progress_state, save_progress_state, JsonFileStore, DEFAULT_PROGRESS_KEY};
use crate::roadmap::extract::parse_json_object;
use crate::roadmap::validate::{validate_roadmap, RoadmapValidation};

pub fn run_roadmap(topic: &str, response: &str, track: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(response)
        .with_context(|| format!("Failed to read {response}"))?;

    let value = parse_json_object(&text)?;
    let roadmap = match validate_roadmap(&value, topic) {
        RoadmapValidation::Valid(roadmap) => roadmap,
        RoadmapValidation::Invalid(errors) => {
            return Err(LearnpathError::InvalidRoadmap { errors }.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&roadmap)?);

    if track {
        let store = JsonFileStore::new(paths::data_dir());
        let now = Utc::now();
        let mut state = load_progress_state(&store, DEFAULT_PROGRESS_KEY, now);
        let path = roadmap.into_learning_path(uuid::Uuid::new_v4().to_string(), topic, now);
        let (id, count) = (path.id.clone(), path.milestones.len());
        state.paths.insert(id.clone(), path);
        save_progress_state(&store, DEFAULT_PROGRESS_KEY, &state)?;
        eprintln!(
            "Tracking path {} ({} milestones) in {}",
            id,
            count,
            paths::progress_file_path().display()
        );
    }
    Ok(())
}
