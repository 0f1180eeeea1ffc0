// 🎓 Enrollment - Student ↔ Enrollment ↔ Course

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::ledger::{Domain, EntityId, Ledger, Primary, Role};
use crate::validation::NameRule;
use serde::{Deserialize, Serialize};
use std::fmt;

const TERM_RULE: NameRule = NameRule::between(1, 20);

/// Academic term an enrollment belongs to, e.g. "Fall 2024"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(pub String);

impl Term {
    pub fn new(term: impl Into<String>) -> Self {
        Term(term.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enrollment;

pub type EnrollmentLedger = Ledger<Enrollment>;

impl Domain for Enrollment {
    type Payload = Term;

    const LEFT: &'static str = "Student";
    const RIGHT: &'static str = "Course";
    const JOIN: &'static str = "Enrollment";

    fn default_config() -> LedgerConfig {
        LedgerConfig::new(NameRule::between(1, 40), NameRule::between(1, 60), None)
    }

    fn validate_payload(term: &Term, _config: &LedgerConfig) -> Result<()> {
        TERM_RULE.check("Enrollment.term", term.as_str())
    }

    fn describe(student: &str, course: &str, term: &Term) -> String {
        format!("{} is enrolled in {} for {}.", student, course, term)
    }

    fn parse_payload(raw: &str, _config: &LedgerConfig) -> Result<Term> {
        Ok(Term::new(raw.trim()))
    }
}

impl Ledger<Enrollment> {
    pub fn enroll(&mut self, student: EntityId, course: EntityId, term: impl Into<String>) -> Result<()> {
        self.associate(student, course, Term::new(term)).map(|_| ())
    }

    /// Students enrolled in `course` during `term`, each listed once
    pub fn roster(&self, course: EntityId, term: &str) -> Result<Vec<&Primary>> {
        if course.role() != Role::Right {
            return Err(LedgerError::InvalidAssociation {
                expected: Enrollment::RIGHT.to_string(),
                reason: format!("{} is a {}", course, Enrollment::LEFT),
            });
        }

        let mut students: Vec<EntityId> = Vec::new();
        for join in self.joins_of(course)? {
            if join.payload().as_str() == term && !students.contains(&join.left()) {
                students.push(join.left());
            }
        }

        students.into_iter().map(|s| self.entity(s)).collect()
    }

    /// Distinct terms `entity` has enrollments in, in first-seen order
    pub fn terms(&self, entity: EntityId) -> Result<Vec<Term>> {
        let mut terms: Vec<Term> = Vec::new();
        for join in self.joins_of(entity)? {
            if !terms.contains(join.payload()) {
                terms.push(join.payload().clone());
            }
        }
        Ok(terms)
    }
}
