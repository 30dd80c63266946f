//*** START FILE: src/catalog/graph.rs ***//
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::LibraryError;
use crate::types::lesson_data::{CefrLevel, PurposeTrack};

/// Which purpose tracks a lesson is offered for. Written in TOML either as
/// the string `"all"` or as a list of tracks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(try_from = "RawApplicability", into = "RawApplicability")]
pub enum Applicability {
    #[default]
    All,
    Only(Vec<PurposeTrack>),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
enum RawApplicability {
    Keyword(String),
    Tracks(Vec<PurposeTrack>),
}

impl TryFrom<RawApplicability> for Applicability {
    type Error = String;

    fn try_from(raw: RawApplicability) -> Result<Self, Self::Error> {
        match raw {
            RawApplicability::Keyword(k) if k.trim().eq_ignore_ascii_case("all") => Ok(Applicability::All),
            RawApplicability::Keyword(k) => Err(format!("contexts must be \"all\" or a list of tracks, got \"{}\"", k)),
            RawApplicability::Tracks(tracks) => Ok(Applicability::Only(tracks)),
        }
    }
}

impl From<Applicability> for RawApplicability {
    fn from(a: Applicability) -> Self {
        match a {
            Applicability::All => RawApplicability::Keyword("all".to_string()),
            Applicability::Only(tracks) => RawApplicability::Tracks(tracks),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LessonCatalogItem {
    pub id: String,
    /// What the learner can do afterwards, not the grammar it covers.
    pub title: String,
    pub grammar: String,
    pub level: CefrLevel,
    pub phase: u8,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub contexts: Applicability,
}

impl LessonCatalogItem {
    pub fn applies_to(&self, purpose: PurposeTrack) -> bool {
        match &self.contexts {
            Applicability::All => true,
            Applicability::Only(tracks) => tracks.contains(&purpose),
        }
    }

    /// Applicable tracks in canonical order.
    pub fn applicable_purposes(&self) -> Vec<PurposeTrack> {
        PurposeTrack::ALL
            .into_iter()
            .filter(|p| self.applies_to(*p))
            .collect()
    }
}

/// True when every prerequisite is in `completed`. Lessons without
/// prerequisites are always unlocked.
pub fn is_unlocked(lesson: &LessonCatalogItem, completed: &HashSet<String>) -> bool {
    lesson.prerequisites.iter().all(|p| completed.contains(p))
}

/// First lesson, in the given order, that is neither completed nor locked.
pub fn current_lesson<'a, I>(lessons: I, completed: &HashSet<String>) -> Option<&'a LessonCatalogItem>
where
    I: IntoIterator<Item = &'a LessonCatalogItem>,
{
    lessons
        .into_iter()
        .find(|lesson| !completed.contains(&lesson.id) && is_unlocked(lesson, completed))
}

/// Where a learner stands on an ordered list of lessons.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress<'a> {
    Next(&'a LessonCatalogItem),
    /// Lessons remain, but every one of them waits on a prerequisite the
    /// learner has not completed.
    Locked(Vec<&'a LessonCatalogItem>),
    Complete,
}

pub fn progress<'a, I>(lessons: I, completed: &HashSet<String>) -> Progress<'a>
where
    I: IntoIterator<Item = &'a LessonCatalogItem>,
{
    let remaining: Vec<&LessonCatalogItem> = lessons
        .into_iter()
        .filter(|lesson| !completed.contains(&lesson.id))
        .collect();
    match current_lesson(remaining.iter().copied(), completed) {
        Some(next) => Progress::Next(next),
        None if remaining.is_empty() => Progress::Complete,
        None => Progress::Locked(remaining),
    }
}

/// The lesson catalog. Construction checks that prerequisites resolve,
/// that they form a DAG, and that declaration order is a topological
/// order of that DAG, so walking the list front to back never meets a
/// lesson before its prerequisites.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<LessonCatalogItem>,
    positions: HashMap<String, usize>,
    practice: Vec<String>,
}

impl Catalog {
    pub fn new(items: Vec<LessonCatalogItem>, practice: Vec<String>) -> Result<Self, LibraryError> {
        let mut positions = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if positions.insert(item.id.clone(), idx).is_some() {
                return Err(LibraryError::DuplicateLesson(item.id.clone()));
            }
            if !(1..=3).contains(&item.phase) {
                return Err(LibraryError::InvalidPhase { lesson: item.id.clone(), phase: item.phase });
            }
            if matches!(&item.contexts, Applicability::Only(tracks) if tracks.is_empty()) {
                return Err(LibraryError::EmptyContexts { lesson: item.id.clone() });
            }
        }

        for item in &items {
            for prereq in &item.prerequisites {
                if !positions.contains_key(prereq) {
                    return Err(LibraryError::UnknownPrerequisite {
                        lesson: item.id.clone(),
                        prerequisite: prereq.clone(),
                    });
                }
            }
        }

        let catalog = Catalog { items, positions, practice };
        if let Some(cycle) = catalog.find_cycle() {
            return Err(LibraryError::PrerequisiteCycle { cycle });
        }
        catalog.check_declaration_order()?;
        tracing::debug!(lessons = catalog.items.len(), "catalog graph validated");
        Ok(catalog)
    }

    fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(catalog: &Catalog, idx: usize, marks: &mut [Mark], path: &mut Vec<usize>) -> Option<Vec<String>> {
            match marks[idx] {
                Mark::Done => return None,
                Mark::InProgress => {
                    let start = path.iter().position(|&p| p == idx).unwrap_or(0);
                    let mut cycle: Vec<String> = path[start..].iter().map(|&p| catalog.items[p].id.clone()).collect();
                    cycle.push(catalog.items[idx].id.clone());
                    return Some(cycle);
                }
                Mark::Unvisited => {}
            }
            marks[idx] = Mark::InProgress;
            path.push(idx);
            for prereq in &catalog.items[idx].prerequisites {
                if let Some(&next) = catalog.positions.get(prereq) {
                    if let Some(cycle) = visit(catalog, next, marks, path) {
                        return Some(cycle);
                    }
                }
            }
            path.pop();
            marks[idx] = Mark::Done;
            None
        }

        let mut marks = vec![Mark::Unvisited; self.items.len()];
        let mut path = Vec::new();
        (0..self.items.len()).find_map(|idx| visit(self, idx, &mut marks, &mut path))
    }

    fn check_declaration_order(&self) -> Result<(), LibraryError> {
        for (idx, item) in self.items.iter().enumerate() {
            for prereq in &item.prerequisites {
                if self.positions[prereq] > idx {
                    return Err(LibraryError::DeclarationOrder {
                        lesson: item.id.clone(),
                        prerequisite: prereq.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn items(&self) -> &[LessonCatalogItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&LessonCatalogItem> {
        self.positions.get(id).map(|&idx| &self.items[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lesson ids whose exercises make up the practice pool.
    pub fn practice_lessons(&self) -> &[String] {
        &self.practice
    }

    /// Lessons offered for `purpose`, in catalog order.
    pub fn personalized(&self, purpose: PurposeTrack) -> Vec<&LessonCatalogItem> {
        self.items.iter().filter(|item| item.applies_to(purpose)).collect()
    }

    pub fn current_lesson(&self, completed: &HashSet<String>) -> Option<&LessonCatalogItem> {
        current_lesson(&self.items, completed)
    }

    /// Every lesson reachable from `id` through prerequisite edges.
    pub fn prerequisite_closure(&self, id: &str) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<&str> = self
            .get(id)
            .map(|item| item.prerequisites.iter().map(String::as_str).collect())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            if seen.insert(next.to_string()) {
                if let Some(item) = self.get(next) {
                    stack.extend(item.prerequisites.iter().map(String::as_str));
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, prereqs: &[&str]) -> LessonCatalogItem {
        LessonCatalogItem {
            id: id.to_string(),
            title: format!("Do {}", id),
            grammar: "grammar".to_string(),
            level: CefrLevel::A1,
            phase: 1,
            prerequisites: prereqs.iter().map(|p| p.to_string()).collect(),
            contexts: Applicability::All,
        }
    }

    fn done(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unlocked_iff_all_prerequisites_completed() {
        let lesson = item("c", &["a", "b"]);
        assert!(!is_unlocked(&lesson, &done(&["a"])));
        assert!(is_unlocked(&lesson, &done(&["a", "b"])));
        assert!(is_unlocked(&item("root", &[]), &done(&[])));
    }

    #[test]
    fn current_lesson_skips_completed_and_locked() {
        let catalog = Catalog::new(vec![item("a", &[]), item("b", &["a"]), item("c", &[])], vec![]).unwrap();
        assert_eq!(catalog.current_lesson(&done(&[])).map(|l| l.id.as_str()), Some("a"));
        assert_eq!(catalog.current_lesson(&done(&["a"])).map(|l| l.id.as_str()), Some("b"));
        assert_eq!(catalog.current_lesson(&done(&["b"])).map(|l| l.id.as_str()), Some("a"));
        assert_eq!(catalog.current_lesson(&done(&["a", "b", "c"])), None);
    }

    #[test]
    fn progress_separates_locked_from_complete() {
        let catalog = Catalog::new(vec![item("a", &[]), item("b", &["a"])], vec![]).unwrap();
        assert_eq!(progress(catalog.items(), &done(&[])), Progress::Next(&catalog.items()[0]));
        assert_eq!(progress(catalog.items(), &done(&["a", "b"])), Progress::Complete);

        // "a" is not on this track, so "b" can never unlock from it.
        let track: Vec<&LessonCatalogItem> = catalog.items().iter().filter(|l| l.id == "b").collect();
        match progress(track, &done(&[])) {
            Progress::Locked(waiting) => assert_eq!(waiting.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["b"]),
            other => panic!("expected locked, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_prerequisite() {
        let err = Catalog::new(vec![item("a", &["ghost"])], vec![]).unwrap_err();
        assert!(matches!(err, LibraryError::UnknownPrerequisite { prerequisite, .. } if prerequisite == "ghost"));
    }

    #[test]
    fn rejects_cycles_with_the_cycle_path() {
        let err = Catalog::new(vec![item("a", &["c"]), item("b", &["a"]), item("c", &["b"])], vec![]).unwrap_err();
        match err {
            LibraryError::PrerequisiteCycle { cycle } => {
                assert_eq!(cycle.first(), cycle.last());
                assert_eq!(cycle.len(), 4);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn rejects_self_prerequisite() {
        let err = Catalog::new(vec![item("a", &["a"])], vec![]).unwrap_err();
        assert!(matches!(err, LibraryError::PrerequisiteCycle { .. }));
    }

    #[test]
    fn rejects_prerequisite_declared_later() {
        let err = Catalog::new(vec![item("b", &["a"]), item("a", &[])], vec![]).unwrap_err();
        assert!(matches!(err, LibraryError::DeclarationOrder { lesson, .. } if lesson == "b"));
    }

    #[test]
    fn rejects_duplicates_and_bad_phases() {
        assert!(matches!(
            Catalog::new(vec![item("a", &[]), item("a", &[])], vec![]),
            Err(LibraryError::DuplicateLesson(_))
        ));
        let mut bad = item("a", &[]);
        bad.phase = 4;
        assert!(matches!(Catalog::new(vec![bad], vec![]), Err(LibraryError::InvalidPhase { phase: 4, .. })));
    }

    #[test]
    fn personalized_catalog_keeps_order_and_filters_tracks() {
        let mut travel_only = item("t", &["a"]);
        travel_only.contexts = Applicability::Only(vec![PurposeTrack::Travel]);
        let catalog = Catalog::new(vec![item("a", &[]), travel_only, item("z", &[])], vec![]).unwrap();

        let work: Vec<&str> = catalog.personalized(PurposeTrack::Work).iter().map(|l| l.id.as_str()).collect();
        let travel: Vec<&str> = catalog.personalized(PurposeTrack::Travel).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(work, vec!["a", "z"]);
        assert_eq!(travel, vec!["a", "t", "z"]);
    }

    #[test]
    fn closure_collects_transitive_prerequisites() {
        let catalog = Catalog::new(vec![item("a", &[]), item("b", &["a"]), item("c", &["b"])], vec![]).unwrap();
        let closure: Vec<String> = catalog.prerequisite_closure("c").into_iter().collect();
        assert_eq!(closure, vec!["a".to_string(), "b".to_string()]);
        assert!(catalog.prerequisite_closure("missing").is_empty());
    }

    #[test]
    fn applicability_parses_keyword_and_list() {
        #[derive(Deserialize)]
        struct Wrapper {
            contexts: Applicability,
        }
        let all: Wrapper = toml::from_str(r#"contexts = "all""#).unwrap();
        let some: Wrapper = toml::from_str(r#"contexts = ["work", "exams"]"#).unwrap();
        assert_eq!(all.contexts, Applicability::All);
        assert_eq!(some.contexts, Applicability::Only(vec![PurposeTrack::Work, PurposeTrack::Exams]));
        assert!(toml::from_str::<Wrapper>(r#"contexts = "some""#).is_err());
    }
}
//*** END FILE: src/catalog/graph.rs ***//
