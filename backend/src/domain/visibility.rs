//! Role-based visibility scoping for reports.
//!
//! The scope is applied before aggregation: only the visible teachers are
//! iterated, so lessons belonging to anyone else are never summed.

use crate::domain::models::Teacher;

/// Who is asking for a report
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Viewer {
    /// Full visibility, including school revenue
    Admin,
    /// Staff only ever see the teacher their account is linked to
    Staff { teacher_id: Option<String> },
}

impl Viewer {
    pub fn staff(teacher_id: impl Into<String>) -> Self {
        Viewer::Staff {
            teacher_id: Some(teacher_id.into()),
        }
    }

    /// Revenue is a school-wide figure reserved for admins
    pub fn can_see_revenue(&self) -> bool {
        match self {
            Viewer::Admin => true,
            Viewer::Staff { .. } => false,
        }
    }

    /// Narrow the roster to the teachers this viewer may see, keeping roster order
    pub fn visible_teachers<'a>(&self, teachers: &'a [Teacher]) -> Vec<&'a Teacher> {
        match self {
            Viewer::Admin => teachers.iter().collect(),
            Viewer::Staff {
                teacher_id: Some(teacher_id),
            } => teachers
                .iter()
                .filter(|teacher| &teacher.id == teacher_id)
                .collect(),
            Viewer::Staff { teacher_id: None } => Vec::new(),
        }
    }
}
