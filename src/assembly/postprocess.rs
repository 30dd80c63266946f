use crate::types::lesson_data::{LessonContent, PurposeTrack};

pub const TIMED_PREFIX: &str = "Timed (45s): ";

/// Exam learners practise under time pressure: unless some prompt already
/// mentions timing, the first exercise's prompt gets [`TIMED_PREFIX`].
/// Exercise count and answers are untouched.
pub fn ensure_exam_timing(mut content: LessonContent) -> LessonContent {
    if content.purpose != PurposeTrack::Exams {
        return content;
    }
    let already_timed = content
        .exercises
        .iter()
        .any(|exercise| exercise.prompt().to_lowercase().contains("timed"));
    if already_timed || content.exercises.is_empty() {
        return content;
    }

    let first = content.exercises.remove(0);
    let prompt = format!("{}{}", TIMED_PREFIX, first.prompt());
    content.exercises.insert(0, first.with_prompt(prompt));
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::exercise::Exercise;
    use crate::types::lesson_data::CefrLevel;

    fn content(purpose: PurposeTrack, prompts: &[&str]) -> LessonContent {
        LessonContent {
            id: "demo".into(),
            title: "Talk".into(),
            level: CefrLevel::A1,
            purpose,
            prerequisites: vec![],
            objective: "o".into(),
            grammar_focus: "g".into(),
            grammar: vec![],
            vocabulary: vec![],
            dialogue: vec![],
            exercises: prompts
                .iter()
                .map(|p| Exercise::Translation { prompt: p.to_string(), answer: "x".into(), explanation: None })
                .collect(),
            skill_unlock: "s".into(),
            review_suggestion: "r".into(),
        }
    }

    fn prompts(content: &LessonContent) -> Vec<&str> {
        content.exercises.iter().map(Exercise::prompt).collect()
    }

    #[test]
    fn prefixes_first_prompt_for_exams() {
        let out = ensure_exam_timing(content(PurposeTrack::Exams, &["One", "Two"]));
        assert_eq!(prompts(&out), vec!["Timed (45s): One", "Two"]);
    }

    #[test]
    fn leaves_other_purposes_alone() {
        let out = ensure_exam_timing(content(PurposeTrack::Work, &["One"]));
        assert_eq!(prompts(&out), vec!["One"]);
    }

    #[test]
    fn existing_timed_prompt_wins_case_insensitively() {
        let out = ensure_exam_timing(content(PurposeTrack::Exams, &["One", "A TIMED drill"]));
        assert_eq!(prompts(&out), vec!["One", "A TIMED drill"]);
    }

    #[test]
    fn empty_exercise_list_is_a_no_op() {
        let out = ensure_exam_timing(content(PurposeTrack::Exams, &[]));
        assert!(out.exercises.is_empty());
    }

    #[test]
    fn applying_twice_adds_one_prefix() {
        let once = ensure_exam_timing(content(PurposeTrack::Exams, &["One"]));
        let twice = ensure_exam_timing(once.clone());
        assert_eq!(once, twice);
    }
}
