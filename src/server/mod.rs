mod deploy;
pub mod dto;
pub mod response;
mod router;
mod run;

pub use deploy::deploy_router;
pub use router::{AppState, create_deploy_router, create_router};
pub use run::run_router;
