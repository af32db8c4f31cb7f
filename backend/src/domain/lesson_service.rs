//! Lesson scheduling and completion.
//!
//! A lesson's `cost` (the teacher's payout) is derived from the price and the
//! teacher's commission rate at the moment the lesson is priced: on creation,
//! and again only when an edit changes the price or the teacher, or the caller
//! explicitly asks for a recompute. A later change to the teacher's rate leaves
//! existing lessons alone.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::class_type_service::ClassTypeService;
use crate::domain::commands::lessons::{CreateLessonCommand, LessonListQuery, UpdateLessonCommand};
use crate::domain::error::DomainError;
use crate::domain::models::{commission_cost, Lesson};
use crate::domain::teacher_service::TeacherService;
use crate::storage::{LessonRepository, RecordStore};

#[derive(Clone)]
pub struct LessonService {
    lesson_repository: LessonRepository,
    teacher_service: TeacherService,
    class_type_service: ClassTypeService,
}

impl LessonService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        teacher_service: TeacherService,
        class_type_service: ClassTypeService,
    ) -> Self {
        Self {
            lesson_repository: LessonRepository::new(store),
            teacher_service,
            class_type_service,
        }
    }

    /// Lessons ordered by date then start time, optionally limited to a window
    pub async fn list_lessons(&self, query: LessonListQuery) -> Result<Vec<Lesson>> {
        let mut lessons = self.lesson_repository.list().await?;
        if let Some(window) = &query.window {
            if !window.is_valid() {
                return Err(DomainError::InvalidWindow(window.label()).into());
            }
            lessons.retain(|lesson| window.contains(lesson.date));
        }
        lessons.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start_time.cmp(&b.start_time)));
        debug!("Listed {} lessons", lessons.len());
        Ok(lessons)
    }

    pub async fn get_lesson(&self, lesson_id: &str) -> Result<Lesson> {
        self.lesson_repository
            .get(lesson_id)
            .await?
            .ok_or_else(|| DomainError::LessonNotFound(lesson_id.to_string()).into())
    }

    pub async fn create_lesson(&self, command: CreateLessonCommand) -> Result<Lesson> {
        validate_duration(command.duration_minutes)?;
        validate_price(command.price)?;
        self.validate_class_type(&command.class_type).await?;
        let teacher = self.teacher_service.get_teacher(&command.teacher_id).await?;

        let lesson = Lesson {
            id: Lesson::generate_id(),
            teacher_id: teacher.id.clone(),
            student_ids: command.student_ids,
            date: command.date,
            start_time: command.start_time.trim().to_string(),
            duration_minutes: command.duration_minutes,
            class_type: command.class_type,
            price: Some(command.price),
            cost: Some(priced_cost(command.price, teacher.commission_rate)?),
            is_completed: false,
        };
        self.lesson_repository.store(&lesson).await?;

        info!(
            "Created lesson {} for teacher {} on {} (price {}, cost {})",
            lesson.id,
            teacher.id,
            lesson.date,
            lesson.price_or_zero(),
            lesson.cost_or_zero()
        );
        Ok(lesson)
    }

    pub async fn update_lesson(&self, command: UpdateLessonCommand) -> Result<Lesson> {
        let mut lesson = self.get_lesson(&command.lesson_id).await?;
        let mut reprice = command.recompute_cost;

        if let Some(teacher_id) = command.teacher_id {
            if teacher_id != lesson.teacher_id {
                lesson.teacher_id = teacher_id;
                reprice = true;
            }
        }
        if let Some(price) = command.price {
            validate_price(price)?;
            if Some(price) != lesson.price {
                lesson.price = Some(price);
                reprice = true;
            }
        }
        if let Some(minutes) = command.duration_minutes {
            validate_duration(minutes)?;
            lesson.duration_minutes = minutes;
        }
        if let Some(class_type) = command.class_type {
            if class_type != lesson.class_type {
                self.validate_class_type(&class_type).await?;
                lesson.class_type = class_type;
            }
        }
        if let Some(student_ids) = command.student_ids {
            lesson.student_ids = student_ids;
        }
        if let Some(date) = command.date {
            lesson.date = date;
        }
        if let Some(start_time) = command.start_time {
            lesson.start_time = start_time.trim().to_string();
        }

        // Always confirm the teacher still exists, repriced or not
        let teacher = self.teacher_service.get_teacher(&lesson.teacher_id).await?;
        if reprice {
            lesson.cost = Some(priced_cost(lesson.price_or_zero(), teacher.commission_rate)?);
            debug!("Repriced lesson {}: cost {}", lesson.id, lesson.cost_or_zero());
        }

        self.lesson_repository.update(&lesson).await?;
        info!("Updated lesson {}", lesson.id);
        Ok(lesson)
    }

    pub async fn set_completion(&self, lesson_id: &str, is_completed: bool) -> Result<Lesson> {
        let mut lesson = self.get_lesson(lesson_id).await?;
        lesson.is_completed = is_completed;
        self.lesson_repository.update(&lesson).await?;
        info!("Lesson {} marked {}", lesson.id, if is_completed { "completed" } else { "not completed" });
        Ok(lesson)
    }

    pub async fn delete_lesson(&self, lesson_id: &str) -> Result<()> {
        if !self.lesson_repository.delete(lesson_id).await? {
            return Err(DomainError::LessonNotFound(lesson_id.to_string()).into());
        }
        info!("Deleted lesson {}", lesson_id);
        Ok(())
    }

    async fn validate_class_type(&self, class_type: &str) -> Result<()> {
        if class_type.trim().is_empty() {
            return Err(DomainError::EmptyField("Class type").into());
        }
        if !self.class_type_service.catalog().await?.contains(class_type) {
            return Err(DomainError::ClassTypeNotFound(class_type.to_string()).into());
        }
        Ok(())
    }
}

fn validate_duration(minutes: u32) -> Result<(), DomainError> {
    if minutes == 0 {
        return Err(DomainError::InvalidDuration);
    }
    Ok(())
}

fn priced_cost(price: i64, commission_rate: u8) -> Result<i64, DomainError> {
    commission_cost(price, commission_rate).ok_or(DomainError::PriceOutOfRange(price))
}

fn validate_price(price: i64) -> Result<(), DomainError> {
    if price < 0 {
        return Err(DomainError::NegativePrice(price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::class_types::CreateClassTypeCommand;
    use crate::domain::commands::teachers::{CreateTeacherCommand, UpdateTeacherCommand};
    use crate::domain::models::Teacher;
    use crate::storage::MemoryRecordStore;
    use chrono::NaiveDate;
    use shared::ReportWindow;

    struct Fixture {
        lessons: LessonService,
        teachers: TeacherService,
        teacher: Teacher,
    }

    async fn fixture() -> Fixture {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
        let teachers = TeacherService::new(store.clone());
        let class_types = ClassTypeService::new(store.clone());
        for (id, name) in [("PRIVATE", "Private"), ("GROUP", "Group")] {
            class_types
                .add_class_type(CreateClassTypeCommand { id: id.to_string(), name: name.to_string() })
                .await
                .unwrap();
        }
        let teacher = teachers
            .create_teacher(CreateTeacherCommand { name: "Ana".to_string(), commission_rate: 60 })
            .await
            .unwrap();
        let lessons = LessonService::new(store, teachers.clone(), class_types);
        Fixture { lessons, teachers, teacher }
    }

    fn create(teacher_id: &str, day: u32, start: &str, price: i64) -> CreateLessonCommand {
        CreateLessonCommand {
            teacher_id: teacher_id.to_string(),
            student_ids: vec!["s1".to_string()],
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            start_time: start.to_string(),
            duration_minutes: 60,
            class_type: "PRIVATE".to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_cost_is_snapshotted_at_creation() {
        let f = fixture().await;
        let lesson = f.lessons.create_lesson(create(&f.teacher.id, 4, "15:00", 1000)).await.unwrap();
        assert_eq!(lesson.cost, Some(600));
        assert!(!lesson.is_completed);

        f.teachers
            .update_teacher(UpdateTeacherCommand {
                teacher_id: f.teacher.id.clone(),
                commission_rate: Some(80),
                ..Default::default()
            })
            .await
            .unwrap();

        // Rate change does not touch the existing lesson
        assert_eq!(f.lessons.get_lesson(&lesson.id).await.unwrap().cost, Some(600));

        // New lessons use the new rate
        let later = f.lessons.create_lesson(create(&f.teacher.id, 5, "15:00", 1000)).await.unwrap();
        assert_eq!(later.cost, Some(800));
    }

    #[tokio::test]
    async fn test_schedule_edit_keeps_cost_but_price_edit_reprices() {
        let f = fixture().await;
        let lesson = f.lessons.create_lesson(create(&f.teacher.id, 4, "15:00", 1000)).await.unwrap();
        f.teachers
            .update_teacher(UpdateTeacherCommand {
                teacher_id: f.teacher.id.clone(),
                commission_rate: Some(50),
                ..Default::default()
            })
            .await
            .unwrap();

        let moved = f
            .lessons
            .update_lesson(UpdateLessonCommand {
                lesson_id: lesson.id.clone(),
                start_time: Some("17:30".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(moved.start_time, "17:30");
        assert_eq!(moved.cost, Some(600));

        let repriced = f
            .lessons
            .update_lesson(UpdateLessonCommand {
                lesson_id: lesson.id.clone(),
                price: Some(2000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(repriced.cost, Some(1000));
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let f = fixture().await;

        let mut zero = create(&f.teacher.id, 4, "15:00", 1000);
        zero.duration_minutes = 0;
        let err = f.lessons.create_lesson(zero).await.unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::InvalidDuration));

        let err = f.lessons.create_lesson(create(&f.teacher.id, 4, "15:00", -5)).await.unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::NegativePrice(-5)));

        let err = f.lessons.create_lesson(create("ghost", 4, "15:00", 100)).await.unwrap_err();
        assert!(err.downcast_ref::<DomainError>().unwrap().is_not_found());

        let mut unknown_type = create(&f.teacher.id, 4, "15:00", 100);
        unknown_type.class_type = "JAZZ".to_string();
        let err = f.lessons.create_lesson(unknown_type).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::ClassTypeNotFound("JAZZ".to_string()))
        );
    }

    #[tokio::test]
    async fn test_price_too_large_to_cost_is_rejected() {
        let f = fixture().await;
        f.teachers
            .update_teacher(UpdateTeacherCommand {
                teacher_id: f.teacher.id.clone(),
                commission_rate: Some(100),
                ..Default::default()
            })
            .await
            .unwrap();

        let huge = 100_000_000_000_000_000;
        let err = f.lessons.create_lesson(create(&f.teacher.id, 4, "15:00", huge)).await.unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::PriceOutOfRange(huge)));

        let lesson = f.lessons.create_lesson(create(&f.teacher.id, 4, "15:00", 1000)).await.unwrap();
        let err = f
            .lessons
            .update_lesson(UpdateLessonCommand {
                lesson_id: lesson.id.clone(),
                price: Some(huge),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::PriceOutOfRange(huge)));
        assert_eq!(f.lessons.get_lesson(&lesson.id).await.unwrap().cost, Some(1000));
    }

    #[tokio::test]
    async fn test_list_orders_by_date_then_time_and_filters_window() {
        let f = fixture().await;
        let late = f.lessons.create_lesson(create(&f.teacher.id, 10, "18:00", 100)).await.unwrap();
        let early = f.lessons.create_lesson(create(&f.teacher.id, 10, "09:00", 100)).await.unwrap();
        let first = f.lessons.create_lesson(create(&f.teacher.id, 2, "12:00", 100)).await.unwrap();

        let all = f.lessons.list_lessons(LessonListQuery::default()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|lesson| lesson.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), early.id.as_str(), late.id.as_str()]);

        let window = ReportWindow::Range {
            start: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        };
        let ranged = f
            .lessons
            .list_lessons(LessonListQuery { window: Some(window) })
            .await
            .unwrap();
        assert_eq!(ranged.len(), 2);
    }

    #[tokio::test]
    async fn test_completion_and_delete() {
        let f = fixture().await;
        let lesson = f.lessons.create_lesson(create(&f.teacher.id, 4, "15:00", 1000)).await.unwrap();

        let done = f.lessons.set_completion(&lesson.id, true).await.unwrap();
        assert!(done.is_completed);

        f.lessons.delete_lesson(&lesson.id).await.unwrap();
        let err = f.lessons.get_lesson(&lesson.id).await.unwrap_err();
        assert!(err.downcast_ref::<DomainError>().unwrap().is_not_found());
    }
}
