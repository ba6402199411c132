pub mod comment;
pub mod todo;
pub mod user;

pub use comment::Comment;
pub use todo::{Todo, TodoChanges, TodoScope};
pub use user::{NewAccount, Role, User, UserCredentials};
