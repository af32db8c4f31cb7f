//! Lesson DTO mapping.
//!
//! The public lesson carries a display label for its class type, resolved
//! against the current catalog. Ids no longer in the catalog are shown as-is.

use crate::domain::commands::lessons::{CreateLessonCommand, UpdateLessonCommand};
use crate::domain::models::{ClassTypeCatalog, Lesson as DomainLesson};
use shared::{CreateLessonRequest, Lesson as SharedLesson, LessonListResponse, UpdateLessonRequest};

pub struct LessonMapper;

impl LessonMapper {
    pub fn to_dto(domain: DomainLesson, catalog: &ClassTypeCatalog) -> SharedLesson {
        SharedLesson {
            class_type_label: catalog.label(&domain.class_type),
            price: domain.price_or_zero(),
            cost: domain.cost_or_zero(),
            id: domain.id,
            teacher_id: domain.teacher_id,
            student_ids: domain.student_ids,
            date: domain.date,
            start_time: domain.start_time,
            duration_minutes: domain.duration_minutes,
            class_type: domain.class_type,
            is_completed: domain.is_completed,
        }
    }

    pub fn to_list_dto(lessons: Vec<DomainLesson>, catalog: &ClassTypeCatalog) -> LessonListResponse {
        LessonListResponse {
            lessons: lessons
                .into_iter()
                .map(|lesson| Self::to_dto(lesson, catalog))
                .collect(),
        }
    }

    pub fn to_create_command(request: CreateLessonRequest) -> CreateLessonCommand {
        CreateLessonCommand {
            teacher_id: request.teacher_id,
            student_ids: request.student_ids,
            date: request.date,
            start_time: request.start_time,
            duration_minutes: request.duration_minutes,
            class_type: request.class_type,
            price: request.price,
        }
    }

    pub fn to_update_command(lesson_id: String, request: UpdateLessonRequest) -> UpdateLessonCommand {
        UpdateLessonCommand {
            lesson_id,
            teacher_id: request.teacher_id,
            student_ids: request.student_ids,
            date: request.date,
            start_time: request.start_time,
            duration_minutes: request.duration_minutes,
            class_type: request.class_type,
            price: request.price,
            recompute_cost: request.recompute_cost,
        }
    }
}
