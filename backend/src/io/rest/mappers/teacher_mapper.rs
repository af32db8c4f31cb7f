use crate::domain::commands::teachers::{CreateTeacherCommand, UpdateTeacherCommand};
use crate::domain::models::Teacher as DomainTeacher;
use shared::{CreateTeacherRequest, Teacher as SharedTeacher, TeacherListResponse, UpdateTeacherRequest};

pub struct TeacherMapper;

impl TeacherMapper {
    pub fn to_dto(domain: DomainTeacher) -> SharedTeacher {
        SharedTeacher {
            id: domain.id,
            name: domain.name,
            commission_rate: domain.commission_rate,
        }
    }

    pub fn to_list_dto(teachers: Vec<DomainTeacher>) -> TeacherListResponse {
        TeacherListResponse {
            teachers: teachers.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_create_command(request: CreateTeacherRequest) -> CreateTeacherCommand {
        CreateTeacherCommand {
            name: request.name,
            commission_rate: request.commission_rate,
        }
    }

    pub fn to_update_command(teacher_id: String, request: UpdateTeacherRequest) -> UpdateTeacherCommand {
        UpdateTeacherCommand {
            teacher_id,
            name: request.name,
            commission_rate: request.commission_rate,
        }
    }
}
