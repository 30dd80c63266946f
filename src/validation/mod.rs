//! Batch checks over every (lesson, purpose, style) combination.
//!
//! Passes run in order: catalog, structural, rules. Errors fail the run;
//! warnings are reported and otherwise ignored.

pub mod rules;
pub mod structural;

use serde::Serialize;
use std::fmt;

use crate::assembly::LessonLibrary;
use crate::types::lesson_data::{AssemblyOptions, LearningStyle, TimeCommitment};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Warning => f.write_str("WARN"),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationFinding {
    pub severity: Severity,
    pub location: String,
    pub message: String,
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.location, self.message)
    }
}

#[derive(Debug, Default)]
pub(crate) struct FindingSink {
    findings: Vec<ValidationFinding>,
}

impl FindingSink {
    pub(crate) fn push(&mut self, severity: Severity, location: &str, message: impl Into<String>) {
        let finding = ValidationFinding {
            severity,
            location: location.to_string(),
            message: message.into(),
        };
        tracing::debug!(%finding, "validation finding");
        self.findings.push(finding);
    }

    pub(crate) fn into_findings(self) -> Vec<ValidationFinding> {
        self.findings
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
    pub lessons_checked: usize,
    pub combinations_checked: usize,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// 0 when clean, 1 when any error was recorded.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_errors())
    }

    pub fn summary(&self) -> String {
        format!(
            "Checked {} lessons in {} combinations: {} error(s), {} warning(s)",
            self.lessons_checked,
            self.combinations_checked,
            self.errors().count(),
            self.warnings().count()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Catalog,
    Structural,
    Rules,
}

pub struct ValidationEngine<'a> {
    library: &'a LessonLibrary,
    styles: Vec<LearningStyle>,
    time: Option<TimeCommitment>,
}

impl<'a> ValidationEngine<'a> {
    pub const DEFAULT_STYLES: [LearningStyle; 3] =
        [LearningStyle::Speaking, LearningStyle::Grammar, LearningStyle::Balanced];

    pub fn new(library: &'a LessonLibrary) -> Self {
        ValidationEngine {
            library,
            styles: Self::DEFAULT_STYLES.to_vec(),
            time: None,
        }
    }

    /// Audit content as a learner with this time tier would see it.
    pub fn with_time(mut self, time: Option<TimeCommitment>) -> Self {
        self.time = time;
        self
    }

    pub fn with_styles(mut self, styles: Vec<LearningStyle>) -> Self {
        self.styles = styles;
        self
    }

    pub fn run(&self) -> ValidationReport {
        let mut sink = FindingSink::default();
        let mut combinations = 0;

        for pass in [Pass::Catalog, Pass::Structural, Pass::Rules] {
            tracing::info!(?pass, "validation pass started");
            match pass {
                Pass::Catalog => self.catalog_pass(&mut sink),
                Pass::Structural => combinations += self.structural_pass(&mut sink),
                Pass::Rules => combinations += self.rules_pass(&mut sink),
            }
        }

        ValidationReport {
            findings: sink.into_findings(),
            lessons_checked: self.library.catalog().len(),
            combinations_checked: combinations,
        }
    }

    fn catalog_pass(&self, sink: &mut FindingSink) {
        let catalog = self.library.catalog();
        for id in catalog.practice_lessons() {
            if !catalog.contains(id) {
                sink.push(Severity::Error, "practice pool", format!("unknown lesson '{}'", id));
            }
        }

        for lesson in catalog.items() {
            for purpose in lesson.applicable_purposes() {
                for prereq in &lesson.prerequisites {
                    let offered = catalog.get(prereq).is_some_and(|p| p.applies_to(purpose));
                    if !offered {
                        sink.push(
                            Severity::Warning,
                            &format!("{} [{}]", lesson.id, purpose),
                            format!("prerequisite '{}' is not offered for this purpose, so the lesson never unlocks", prereq),
                        );
                    }
                }
            }
        }
    }

    fn options(&self) -> AssemblyOptions {
        AssemblyOptions {
            purpose: None,
            time_commitment: self.time,
            learning_style: None,
        }
    }

    fn structural_pass(&self, sink: &mut FindingSink) -> usize {
        let mut checked = 0;
        for lesson in self.library.catalog().items() {
            for purpose in lesson.applicable_purposes() {
                let location = format!("{} [{}]", lesson.id, purpose);
                let options = self.options().with_purpose(purpose);
                match self.library.lesson_content(&lesson.id, &options) {
                    Some(content) => structural::check_content(&content, &location, sink),
                    None => sink.push(Severity::Error, &location, "lesson could not be assembled"),
                }
                checked += 1;
            }
        }
        checked
    }

    fn rules_pass(&self, sink: &mut FindingSink) -> usize {
        let mut checked = 0;
        for lesson in self.library.catalog().items() {
            for purpose in lesson.applicable_purposes() {
                for &style in &self.styles {
                    let location = format!("{} [{}/{}]", lesson.id, purpose, style);
                    let options = self.options().with_purpose(purpose).with_style(style);
                    match self.library.lesson_content(&lesson.id, &options) {
                        Some(content) => rules::check_rules(&content, style, &location, sink),
                        None => sink.push(Severity::Error, &location, "lesson could not be assembled"),
                    }
                    checked += 1;
                }
            }
        }
        checked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> ValidationFinding {
        ValidationFinding { severity, location: "x".into(), message: "m".into() }
    }

    #[test]
    fn exit_code_tracks_errors_only() {
        let mut report = ValidationReport { findings: vec![finding(Severity::Warning)], ..Default::default() };
        assert_eq!(report.exit_code(), 0);
        report.findings.push(finding(Severity::Error));
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn finding_display_has_severity_and_location() {
        assert_eq!(finding(Severity::Error).to_string(), "[ERROR] x: m");
    }

    #[test]
    fn builtin_content_validates_without_errors() {
        let library = LessonLibrary::builtin().unwrap();
        let report = ValidationEngine::new(&library).run();
        let errors: Vec<String> = report.errors().map(ToString::to_string).collect();
        assert!(errors.is_empty(), "{errors:#?}");
        assert!(report.combinations_checked > report.lessons_checked);
    }
}
