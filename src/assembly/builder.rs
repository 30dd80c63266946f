use std::collections::BTreeMap;

use crate::catalog::{LessonCatalogItem, PurposeTable};
use crate::catalog::purposes::placeholders;
use crate::error::LibraryError;
use crate::parsing::lesson_parser::LessonFile;
use crate::types::authoring::{ContextTemplate, LessonContext};
use crate::types::exercise::{Exercise, ExerciseKind, ProductionMode};
use crate::types::lesson_data::{AssemblyOptions, GrammarPoint, LearningStyle, LessonContent, PurposeTrack};

/// Text every grammar-snapshot point starts with.
pub const GRAMMAR_SNAPSHOT_MARKER: &str = "Grammar snapshot";

/// Every lesson offers each of these kinds at least once.
pub const REQUIRED_KINDS: [ExerciseKind; 4] = [
    ExerciseKind::MultipleChoice,
    ExerciseKind::FillBlank,
    ExerciseKind::Reorder,
    ExerciseKind::Production,
];

#[derive(Debug, Clone)]
pub enum ContextSource {
    /// Written once, rendered per purpose from the purpose table.
    Template(ContextTemplate),
    /// Written out per purpose.
    Authored(BTreeMap<PurposeTrack, LessonContext>),
}

/// The builder for one lesson id: fixed grammar and exercises plus the
/// purpose-dependent context they are combined with.
#[derive(Debug, Clone)]
pub struct LessonDefinition {
    pub id: String,
    pub grammar_focus: String,
    pub grammar: Vec<GrammarPoint>,
    pub snapshot: String,
    pub contexts: ContextSource,
    pub exercises: Vec<Exercise>,
}

impl LessonDefinition {
    /// Checks a parsed lesson document against its catalog entry and the
    /// purpose table.
    pub fn from_file(
        file: LessonFile,
        authored: BTreeMap<PurposeTrack, LessonContext>,
        entry: &LessonCatalogItem,
        purposes: &PurposeTable,
    ) -> Result<Self, LibraryError> {
        let lesson = file.id.clone();
        if file.grammar_focus.trim().is_empty() {
            return Err(LibraryError::EmptyField { lesson, field: "grammar_focus".into() });
        }
        if file.snapshot.trim().is_empty() {
            return Err(LibraryError::EmptyField { lesson, field: "snapshot".into() });
        }
        if let Some(kind) = REQUIRED_KINDS
            .into_iter()
            .find(|kind| !file.exercises.iter().any(|e| e.kind() == *kind))
        {
            return Err(LibraryError::MissingExerciseKind { lesson, kind });
        }

        let contexts = match (file.template, authored.is_empty()) {
            (Some(template), true) => ContextSource::Template(template),
            (None, false) => {
                if let Some(purpose) = entry.applicable_purposes().into_iter().find(|p| !authored.contains_key(p)) {
                    return Err(LibraryError::MissingContext { lesson, purpose });
                }
                ContextSource::Authored(authored)
            }
            (Some(_), false) => return Err(LibraryError::ContextSource { lesson, found: "found both" }),
            (None, true) => return Err(LibraryError::ContextSource { lesson, found: "found neither" }),
        };

        let definition = LessonDefinition {
            id: file.id,
            grammar_focus: file.grammar_focus,
            grammar: file.grammar,
            snapshot: file.snapshot,
            contexts,
            exercises: file.exercises,
        };
        definition.check_placeholders(purposes)?;
        Ok(definition)
    }

    fn check_placeholders(&self, purposes: &PurposeTable) -> Result<(), LibraryError> {
        let mut texts: Vec<&str> = self.exercises.iter().flat_map(Exercise::texts).collect();
        match &self.contexts {
            ContextSource::Template(template) => texts.extend(template.context.texts()),
            ContextSource::Authored(map) => texts.extend(map.values().flat_map(LessonContext::texts)),
        }
        for text in texts {
            if let Some(key) = placeholders(text).find(|k| !purposes.has_phrase(k)) {
                return Err(LibraryError::UnknownPlaceholder {
                    lesson: self.id.clone(),
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// The context for `purpose` with placeholders filled in. Authored
    /// lessons without that purpose fall back to daily, then to their first
    /// context.
    pub fn context_for(&self, purpose: PurposeTrack, purposes: &PurposeTable) -> LessonContext {
        let flavor = purposes.flavor(purpose);
        match &self.contexts {
            ContextSource::Template(template) => {
                let mut context = template.context.map_text(|t| flavor.interpolate(t));
                if template.include_nouns {
                    context.vocabulary.extend(flavor.nouns.iter().cloned());
                }
                context
            }
            ContextSource::Authored(map) => map
                .get(&purpose)
                .or_else(|| map.get(&PurposeTrack::Daily))
                .or_else(|| map.values().next())
                .map(|context| context.map_text(|t| flavor.interpolate(t)))
                .unwrap_or_default(),
        }
    }

    pub fn snapshot_point(&self) -> GrammarPoint {
        GrammarPoint {
            explanation: format!("{}: {}", GRAMMAR_SNAPSHOT_MARKER, self.snapshot),
            table: None,
        }
    }

    /// Assembles the unbudgeted lesson for `options`.
    pub fn build(&self, entry: &LessonCatalogItem, options: &AssemblyOptions, purposes: &PurposeTable) -> LessonContent {
        let purpose = options.resolved_purpose();
        let flavor = purposes.flavor(purpose);
        let context = self.context_for(purpose, purposes);
        let mode = if options.speaking_priority() {
            ProductionMode::Speaking
        } else {
            ProductionMode::Writing
        };

        let mut grammar = self.grammar.clone();
        if options.learning_style == Some(LearningStyle::Grammar) {
            grammar.push(self.snapshot_point());
        }

        let exercises = self
            .exercises
            .iter()
            .cloned()
            .map(|exercise| exercise.map_text(|t| flavor.interpolate(t)))
            .map(|exercise| match exercise {
                Exercise::Production { prompt, sample_answer, explanation, .. } => Exercise::Production {
                    prompt: if prompt.trim().is_empty() { context.production_prompt.clone() } else { prompt },
                    sample_answer: sample_answer
                        .or_else(|| Some(context.production_sample.clone()))
                        .filter(|s| !s.trim().is_empty()),
                    mode,
                    explanation,
                },
                other => other,
            })
            .collect();

        LessonContent {
            id: self.id.clone(),
            title: context.title,
            level: entry.level,
            purpose,
            prerequisites: entry.prerequisites.clone(),
            objective: context.objective,
            grammar_focus: self.grammar_focus.clone(),
            grammar,
            vocabulary: context.vocabulary,
            dialogue: context.dialogue,
            exercises,
            skill_unlock: context.skill_unlock,
            review_suggestion: context.review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Applicability, PurposeFlavor};
    use crate::types::lesson_data::{CefrLevel, DialogueLine, VocabItem};
    use pretty_assertions::assert_eq;

    fn purposes() -> PurposeTable {
        let flavors = PurposeTrack::ALL
            .into_iter()
            .map(|t| {
                let flavor = PurposeFlavor {
                    label: t.to_string(),
                    phrases: BTreeMap::from([("place_en".to_string(), format!("in {}", t))]),
                    nouns: vec![VocabItem { german: format!("das {}", t), english: t.to_string(), example: None }],
                };
                (t, flavor)
            })
            .collect();
        PurposeTable::new(flavors).unwrap()
    }

    fn entry(contexts: Applicability) -> LessonCatalogItem {
        LessonCatalogItem {
            id: "demo".into(),
            title: "Talk about demos".into(),
            grammar: "demo grammar".into(),
            level: CefrLevel::A2,
            phase: 1,
            prerequisites: vec!["before".into()],
            contexts,
        }
    }

    fn context(title: &str) -> LessonContext {
        LessonContext {
            title: title.into(),
            objective: "You can talk {place_en}.".into(),
            vocabulary: vec![VocabItem { german: "Hallo".into(), english: "hello".into(), example: None }],
            dialogue: vec![DialogueLine { speaker: "A".into(), german: "Hallo!".into(), english: "Hello!".into() }],
            production_prompt: "Say hello {place_en}.".into(),
            production_sample: "Hallo!".into(),
            skill_unlock: "Unlocked.".into(),
            review: "Review.".into(),
        }
    }

    fn file(template: Option<ContextTemplate>) -> LessonFile {
        LessonFile {
            id: "demo".into(),
            grammar_focus: "demo grammar".into(),
            grammar: vec![GrammarPoint { explanation: "Rule.".into(), table: None }],
            snapshot: "Short rule.".into(),
            template,
            contexts: BTreeMap::new(),
            exercises: vec![
                Exercise::Translation { prompt: "Translate {place_en}".into(), answer: "x".into(), explanation: None },
                Exercise::Production { prompt: String::new(), sample_answer: None, mode: ProductionMode::Writing, explanation: None },
                Exercise::MultipleChoice {
                    prompt: "Pick".into(),
                    options: vec!["a".into(), "b".into()],
                    answer: "a".into(),
                    explanation: None,
                },
                Exercise::FillBlank {
                    prompt: "Fill".into(),
                    options: vec!["a".into(), "b".into()],
                    answer: "b".into(),
                    explanation: None,
                },
                Exercise::Reorder {
                    prompt: "Order".into(),
                    words: vec!["Ich".into(), "bin".into(), ".".into()],
                    answer: "Ich bin.".into(),
                    explanation: None,
                },
            ],
        }
    }

    fn templated() -> LessonDefinition {
        let template = ContextTemplate { context: context("Talk {place_en}"), include_nouns: true };
        LessonDefinition::from_file(file(Some(template)), BTreeMap::new(), &entry(Applicability::All), &purposes()).unwrap()
    }

    #[test]
    fn template_renders_flavor_and_appends_nouns() {
        let content = templated().build(&entry(Applicability::All), &AssemblyOptions::new().with_purpose(PurposeTrack::Work), &purposes());
        assert_eq!(content.title, "Talk in work");
        assert_eq!(content.objective, "You can talk in work.");
        assert_eq!(content.vocabulary.len(), 2);
        assert_eq!(content.vocabulary[1].german, "das work");
        assert_eq!(content.exercises[0].prompt(), "Translate in work");
        assert_eq!(content.prerequisites, vec!["before".to_string()]);
    }

    #[test]
    fn production_takes_prompt_and_sample_from_context() {
        let content = templated().build(&entry(Applicability::All), &AssemblyOptions::new(), &purposes());
        assert_eq!(content.purpose, PurposeTrack::Daily);
        assert_eq!(
            content.exercises[1],
            Exercise::Production {
                prompt: "Say hello in daily.".into(),
                sample_answer: Some("Hallo!".into()),
                mode: ProductionMode::Writing,
                explanation: None,
            }
        );
    }

    #[test]
    fn speaking_style_switches_only_the_mode() {
        let def = templated();
        let balanced = def.build(&entry(Applicability::All), &AssemblyOptions::new().with_style(LearningStyle::Balanced), &purposes());
        let speaking = def.build(&entry(Applicability::All), &AssemblyOptions::new().with_style(LearningStyle::Speaking), &purposes());
        match (&balanced.exercises[1], &speaking.exercises[1]) {
            (
                Exercise::Production { prompt: p1, sample_answer: s1, mode: ProductionMode::Writing, .. },
                Exercise::Production { prompt: p2, sample_answer: s2, mode: ProductionMode::Speaking, .. },
            ) => {
                assert_eq!(p1, p2);
                assert_eq!(s1, s2);
            }
            other => panic!("unexpected production pair {other:?}"),
        }
    }

    #[test]
    fn snapshot_is_appended_only_for_grammar_style() {
        let def = templated();
        for style in [LearningStyle::Speaking, LearningStyle::Vocab, LearningStyle::Balanced] {
            let content = def.build(&entry(Applicability::All), &AssemblyOptions::new().with_style(style), &purposes());
            assert_eq!(content.grammar.len(), 1);
        }
        let content = def.build(&entry(Applicability::All), &AssemblyOptions::new().with_style(LearningStyle::Grammar), &purposes());
        assert_eq!(content.grammar.len(), 2);
        assert_eq!(content.grammar[1].explanation, "Grammar snapshot: Short rule.");
    }

    #[test]
    fn authored_lessons_must_cover_applicable_purposes() {
        let authored = BTreeMap::from([(PurposeTrack::Work, context("Talk at work"))]);
        let err = LessonDefinition::from_file(
            file(None),
            authored,
            &entry(Applicability::Only(vec![PurposeTrack::Work, PurposeTrack::Study])),
            &purposes(),
        )
        .unwrap_err();
        assert!(matches!(err, LibraryError::MissingContext { purpose: PurposeTrack::Study, .. }));
    }

    #[test]
    fn authored_lessons_fall_back_to_daily_then_first() {
        let authored = BTreeMap::from([
            (PurposeTrack::Work, context("Talk at work")),
            (PurposeTrack::Daily, context("Talk every day")),
        ]);
        let def = LessonDefinition::from_file(file(None), authored, &entry(Applicability::Only(vec![PurposeTrack::Work, PurposeTrack::Daily])), &purposes()).unwrap();
        assert_eq!(def.context_for(PurposeTrack::Work, &purposes()).title, "Talk at work");
        assert_eq!(def.context_for(PurposeTrack::Exams, &purposes()).title, "Talk every day");

        let only_work = BTreeMap::from([(PurposeTrack::Work, context("Talk at work"))]);
        let def = LessonDefinition::from_file(file(None), only_work, &entry(Applicability::Only(vec![PurposeTrack::Work])), &purposes()).unwrap();
        assert_eq!(def.context_for(PurposeTrack::Travel, &purposes()).title, "Talk at work");
    }

    #[test]
    fn rejects_unknown_placeholders_and_mixed_sources() {
        let mut bad = file(Some(ContextTemplate { context: context("Talk {nowhere}"), include_nouns: false }));
        bad.id = "bad".into();
        let err = LessonDefinition::from_file(bad, BTreeMap::new(), &entry(Applicability::All), &purposes()).unwrap_err();
        assert!(matches!(err, LibraryError::UnknownPlaceholder { key, .. } if key == "nowhere"));

        let both = file(Some(ContextTemplate::default()));
        let authored = BTreeMap::from([(PurposeTrack::Work, context("x"))]);
        let err = LessonDefinition::from_file(both, authored, &entry(Applicability::All), &purposes()).unwrap_err();
        assert!(matches!(err, LibraryError::ContextSource { .. }));

        let err = LessonDefinition::from_file(file(None), BTreeMap::new(), &entry(Applicability::All), &purposes()).unwrap_err();
        assert!(matches!(err, LibraryError::ContextSource { .. }));
    }

    #[test]
    fn rejects_lessons_missing_a_required_exercise_kind() {
        let template = || Some(ContextTemplate { context: context("Talk {place_en}"), include_nouns: false });
        for kind in REQUIRED_KINDS {
            let mut lesson = file(template());
            lesson.exercises.retain(|e| e.kind() != kind);
            let err = LessonDefinition::from_file(lesson, BTreeMap::new(), &entry(Applicability::All), &purposes()).unwrap_err();
            assert!(matches!(&err, LibraryError::MissingExerciseKind { kind: missing, .. } if *missing == kind), "{err}");
        }

        let mut only_production = file(template());
        only_production.exercises.retain(|e| e.kind() == ExerciseKind::Production);
        let err = LessonDefinition::from_file(only_production, BTreeMap::new(), &entry(Applicability::All), &purposes()).unwrap_err();
        assert_eq!(err.to_string(), "Lesson 'demo' has no multiple-choice exercise");
    }
}
