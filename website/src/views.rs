mod home;
mod me;
mod not_found;
mod projects;
mod speaking;
mod technologies;
mod work;

pub use home::Home;
pub use me::Me;
pub use not_found::NotFound;
pub use projects::Projects;
pub use speaking::Speaking;
pub use technologies::Technologies;
pub use work::Work;
