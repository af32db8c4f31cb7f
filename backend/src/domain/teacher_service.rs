//! Teacher roster management.
//!
//! Changing a teacher's commission rate only affects lessons created
//! afterwards. Lesson costs are snapshotted at creation and are never
//! rewritten here.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::teachers::{CreateTeacherCommand, UpdateTeacherCommand};
use crate::domain::error::DomainError;
use crate::domain::models::{Teacher, MAX_COMMISSION_RATE};
use crate::storage::{RecordStore, TeacherRepository};

#[derive(Clone)]
pub struct TeacherService {
    teacher_repository: TeacherRepository,
}

impl TeacherService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            teacher_repository: TeacherRepository::new(store),
        }
    }

    /// All teachers ordered by name
    pub async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let mut teachers = self.teacher_repository.list().await?;
        teachers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teachers)
    }

    pub async fn get_teacher(&self, teacher_id: &str) -> Result<Teacher> {
        self.teacher_repository
            .get(teacher_id)
            .await?
            .ok_or_else(|| DomainError::TeacherNotFound(teacher_id.to_string()).into())
    }

    pub async fn create_teacher(&self, command: CreateTeacherCommand) -> Result<Teacher> {
        let name = validate_name(&command.name)?;
        validate_rate(command.commission_rate)?;

        let teacher = Teacher {
            id: Teacher::generate_id(),
            name,
            commission_rate: command.commission_rate,
        };
        self.teacher_repository.store(&teacher).await?;

        info!("Created teacher {} ({}) at {}%", teacher.name, teacher.id, teacher.commission_rate);
        Ok(teacher)
    }

    pub async fn update_teacher(&self, command: UpdateTeacherCommand) -> Result<Teacher> {
        let mut teacher = self.get_teacher(&command.teacher_id).await?;

        if let Some(name) = command.name {
            teacher.name = validate_name(&name)?;
        }
        if let Some(rate) = command.commission_rate {
            validate_rate(rate)?;
            if rate != teacher.commission_rate {
                info!(
                    "Commission rate for {} changes {}% -> {}%; existing lessons keep their cost",
                    teacher.id, teacher.commission_rate, rate
                );
            }
            teacher.commission_rate = rate;
        }

        self.teacher_repository.update(&teacher).await?;
        Ok(teacher)
    }

    /// Lessons of a deleted teacher stay in the store untouched
    pub async fn delete_teacher(&self, teacher_id: &str) -> Result<()> {
        if !self.teacher_repository.delete(teacher_id).await? {
            return Err(DomainError::TeacherNotFound(teacher_id.to_string()).into());
        }
        info!("Deleted teacher {}", teacher_id);
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField("Teacher name"));
    }
    Ok(trimmed.to_string())
}

fn validate_rate(rate: u8) -> Result<(), DomainError> {
    if rate > MAX_COMMISSION_RATE {
        return Err(DomainError::InvalidCommissionRate(rate));
    }
    Ok(())
}
