use crate::domain::commands::class_types::{CreateClassTypeCommand, RenameClassTypeCommand};
use crate::domain::models::{ClassType as DomainClassType, ClassTypeCatalog};
use shared::{ClassType as SharedClassType, ClassTypeListResponse, CreateClassTypeRequest, RenameClassTypeRequest};

pub struct ClassTypeMapper;

impl ClassTypeMapper {
    pub fn to_dto(domain: &DomainClassType) -> SharedClassType {
        SharedClassType {
            id: domain.id.clone(),
            name: domain.name.clone(),
        }
    }

    pub fn to_catalog_dto(catalog: &ClassTypeCatalog) -> Vec<SharedClassType> {
        catalog.entries().iter().map(Self::to_dto).collect()
    }

    pub fn to_list_dto(catalog: &ClassTypeCatalog) -> ClassTypeListResponse {
        ClassTypeListResponse {
            class_types: Self::to_catalog_dto(catalog),
        }
    }

    pub fn to_create_command(request: CreateClassTypeRequest) -> CreateClassTypeCommand {
        CreateClassTypeCommand {
            id: request.id,
            name: request.name,
        }
    }

    pub fn to_rename_command(id: String, request: RenameClassTypeRequest) -> RenameClassTypeCommand {
        RenameClassTypeCommand {
            id,
            name: request.name,
        }
    }
}
