// src/roadmap/prompts.rs — System and user prompts for roadmap and customization calls

use super::types::{CustomizationRequest, QueryType};

/// System prompt for roadmap generation. Pins the response to one JSON object.
pub fn roadmap_system_prompt() -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str("# Role\n\n");
    prompt.push_str(
        "You are an expert curriculum designer. You turn a learning topic into a \
         sequenced roadmap of concrete milestones.\n\n",
    );

    prompt.push_str("# Output\n\n");
    prompt.push_str("Respond with a single JSON object and nothing else, shaped as:\n\n");
    prompt.push_str(
        "{\n  \"queryType\": string,\n  \"overview\": string,\n  \"totalEstimatedTime\": string,\n  \
         \"prerequisites\": [string],\n  \"tips\": [string],\n  \"milestones\": [\n    {\n      \
         \"id\": string,\n      \"title\": string,\n      \"description\": string,\n      \
         \"difficulty\": \"beginner\" | \"intermediate\" | \"advanced\",\n      \
         \"estimatedTime\": string,\n      \"skills\": [string],\n      \
         \"resources\": [{\"title\": string, \"url\": string, \"type\": string}]\n    }\n  ]\n}\n\n",
    );

    append_query_types(&mut prompt);

    prompt.push_str("# Rules\n\n");
    prompt.push_str("- Order milestones from first to last in the learning sequence.\n");
    prompt.push_str("- Use 4 to 8 milestones.\n");
    prompt.push_str("- Resource types are one of: video, article, exercise, quiz.\n");
    prompt.push_str("- Express times as ranges such as \"2-3 hours\" or \"1-2 weeks\".\n");

    prompt
}

pub fn roadmap_user_prompt(topic: &str) -> String {
    format!("Create a learning roadmap for: {}", topic.trim())
}

pub fn customization_system_prompt() -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str("# Role\n\n");
    prompt.push_str(
        "You tailor learning plans to an individual learner's goals and constraints.\n\n",
    );

    prompt.push_str("# Output\n\n");
    prompt.push_str("Respond with a single JSON object and nothing else, shaped as:\n\n");
    prompt.push_str(
        "{\n  \"queryType\": string,\n  \"learningStyle\": string,\n  \"pace\": string,\n  \
         \"focusAreas\": [string],\n  \"personalizedTips\": [string]\n}\n\n",
    );

    append_query_types(&mut prompt);
    prompt
}

pub fn customization_user_prompt(request: &CustomizationRequest) -> String {
    let mut prompt = String::with_capacity(512);

    prompt.push_str(&format!("Topic: {}\n", request.topic.trim()));
    if let Some(level) = request.experience_level {
        let level = format!("{level:?}").to_lowercase();
        prompt.push_str(&format!("Experience level: {level}\n"));
    }
    if !request.goals.is_empty() {
        prompt.push_str("Goals:\n");
        for goal in &request.goals {
            prompt.push_str(&format!("- {goal}\n"));
        }
    }
    if let Some(hours) = request.weekly_hours {
        prompt.push_str(&format!("Available time: {hours} hours per week\n"));
    }
    if !request.preferred_formats.is_empty() {
        prompt.push_str(&format!(
            "Preferred formats: {}\n",
            request.preferred_formats.join(", ")
        ));
    }
    prompt
}

fn append_query_types(prompt: &mut String) {
    prompt.push_str("`queryType` must be one of: ");
    let names: Vec<&str> = QueryType::ALL.iter().map(|q| q.as_str()).collect();
    prompt.push_str(&names.join(", "));
    prompt.push_str(".\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curation::types::SkillLevel;

    #[test]
    fn test_roadmap_prompt_lists_query_types() {
        let prompt = roadmap_system_prompt();
        for q in QueryType::ALL {
            assert!(prompt.contains(q.as_str()));
        }
        assert!(prompt.contains("\"milestones\""));
    }

    #[test]
    fn test_user_prompt_trims_topic() {
        assert_eq!(
            roadmap_user_prompt("  rust  "),
            "Create a learning roadmap for: rust"
        );
    }

    #[test]
    fn test_customization_prompt_sections() {
        let request = CustomizationRequest {
            topic: "Kubernetes".into(),
            experience_level: Some(SkillLevel::Intermediate),
            goals: vec!["pass CKA".into()],
            weekly_hours: Some(5),
            preferred_formats: vec!["video".into(), "exercise".into()],
        };
        let prompt = customization_user_prompt(&request);
        assert!(prompt.starts_with("Topic: Kubernetes\n"));
        assert!(prompt.contains("Experience level: intermediate"));
        assert!(prompt.contains("- pass CKA"));
        assert!(prompt.contains("5 hours per week"));
        assert!(prompt.contains("video, exercise"));
    }

    #[test]
    fn test_customization_prompt_minimal() {
        let request = CustomizationRequest {
            topic: "Go".into(),
            ..Default::default()
        };
        assert_eq!(customization_user_prompt(&request), "Topic: Go\n");
    }
}
