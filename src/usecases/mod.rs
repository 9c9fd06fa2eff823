//! Application use cases. Each one forwards a single repository operation,
//! so state holders depend on one narrow capability instead of a repository.

pub mod add_new_exercise;
pub mod delete_exercise;
pub mod get_all_exercises;
pub mod get_all_sleeps;
pub mod get_user;
pub mod insert_user;

pub use add_new_exercise::AddNewExerciseUseCase;
pub use delete_exercise::DeleteExerciseUseCase;
pub use get_all_exercises::GetAllExercisesUseCase;
pub use get_all_sleeps::GetAllSleepsUseCase;
pub use get_user::GetUserUseCase;
pub use insert_user::InsertUserUseCase;
