//! Prompt builders for the podcast pipeline stages

use super::pipeline::PodcastBrief;

pub fn script_prompt(brief: &PodcastBrief) -> String {
    format!(
        "Write the full spoken script for a podcast episode about \"{topic}\". \
         Cover these points: {points}. The episode should run for about {duration}. \
         Open with the host introducing themselves and the show, then talk to the \
         listener in a warm, conversational tone as a single host. \
         Write only the words the host says aloud: no headings, bullet points, stage \
         directions, sound effects or special characters, and do not mention music \
         or jingles.",
        topic = brief.topic,
        points = brief.points,
        duration = brief.duration,
    )
}

pub fn title_prompt(brief: &PodcastBrief) -> String {
    format!(
        "Suggest one title for a podcast episode about \"{topic}\". \
         The title must be between 1 and 5 words, contain no symbols, quotes or \
         punctuation, and appeal to a broad audience. Reply with the title only.",
        topic = brief.topic,
    )
}

pub fn poster_prompt(title: &str, brief: &PodcastBrief) -> String {
    format!(
        "Cover art poster for a podcast episode titled \"{title}\" about {topic}. \
         Bold modern illustration, vibrant colors, clean composition with a single \
         strong focal point, studio lighting, square format, no text or lettering.",
        title = title,
        topic = brief.topic,
    )
}
