//! Interview cards — the dashboard's view of a stored interview.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::interview::Interview;
use crate::presentation::covers::random_interview_cover;
use crate::presentation::icons::{TechIcon, TechIconResolver, FALLBACK_ICON};

/// Shown until an interview has feedback.
pub const NO_FEEDBACK_ASSESSMENT: &str =
    "You haven't taken the interview yet. Take it now to improve your skills.";
pub const NO_SCORE: &str = "---";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewCard {
    pub interview_id: Uuid,
    pub user_id: String,
    pub role: String,
    #[serde(rename = "type")]
    pub interview_type: String,
    pub techstack: Vec<String>,
    pub tech_icons: Vec<TechIcon>,
    pub cover_image: String,
    pub date: String,
    pub score: String,
    pub assessment: String,
    pub href: String,
    pub action: String,
}

/// Any type mentioning "mix" is shown as `Mixed`.
pub fn normalize_interview_type(interview_type: &str) -> String {
    if interview_type.to_lowercase().contains("mix") {
        "Mixed".to_string()
    } else {
        interview_type.to_string()
    }
}

/// `MMM D, YYYY`. Unparsable dates fall back to `now`.
pub fn format_card_date(created_at: &str, now: DateTime<Utc>) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or(now)
        .format("%b %-d, %Y")
        .to_string()
}

fn build_card(interview: Interview, tech_icons: Vec<TechIcon>) -> InterviewCard {
    let cover_image = if interview.cover_image.is_empty() {
        random_interview_cover()
    } else {
        interview.cover_image
    };

    InterviewCard {
        interview_id: interview.id,
        date: format_card_date(&interview.created_at, Utc::now()),
        interview_type: normalize_interview_type(&interview.interview_type),
        user_id: interview.user_id,
        role: interview.role,
        techstack: interview.techstack,
        tech_icons,
        cover_image,
        score: NO_SCORE.to_string(),
        assessment: NO_FEEDBACK_ASSESSMENT.to_string(),
        href: format!("/interview/{}", interview.id),
        action: "Take Interview".to_string(),
    }
}

/// Icons for every card are resolved in one batch so a technology shared by
/// several cards is probed once.
pub async fn build_cards(interviews: Vec<Interview>, icons: &TechIconResolver) -> Vec<InterviewCard> {
    let all_techs: Vec<String> = interviews
        .iter()
        .flat_map(|i| i.techstack.iter().cloned())
        .collect();
    let urls: HashMap<String, String> = icons
        .tech_logos(&all_techs)
        .await
        .into_iter()
        .map(|icon| (icon.tech, icon.url))
        .collect();

    interviews
        .into_iter()
        .map(|interview| {
            let tech_icons = interview
                .techstack
                .iter()
                .map(|tech| TechIcon {
                    tech: tech.clone(),
                    url: urls
                        .get(tech)
                        .cloned()
                        .unwrap_or_else(|| FALLBACK_ICON.to_string()),
                })
                .collect();
            build_card(interview, tech_icons)
        })
        .collect()
}
