use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UpdateUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
