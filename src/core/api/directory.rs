use crate::core::api::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    pub doctor_id: String,
    pub password: String,
}

/// Official-only account administration.
pub trait DirectoryApi {
    fn create_doctor(&self, new_doctor: &NewDoctor)
    -> impl Future<Output = Result<String, ApiError>>;
}
