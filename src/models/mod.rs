pub mod account;
pub mod approval;
pub(crate) mod macros;
pub mod notification;
pub mod orchestrator;
pub mod organization;
pub mod report;
pub mod role;
pub mod shift;
pub mod template;

pub use account::*;
pub use approval::*;
pub use notification::*;
pub use orchestrator::*;
pub use organization::*;
pub use report::*;
pub use role::*;
pub use shift::*;
pub use template::*;
