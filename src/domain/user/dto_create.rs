use super::Role;

/// Data needed to persist a new user. The password is already hashed
/// and the roles already resolved by the time this reaches a repository.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub address: String,
    pub pin: String,
    pub roles: Vec<Role>,
}
