pub mod budget;
pub mod consistency;
pub mod fanout;
pub mod input;
pub mod validator;

pub use budget::Budgets;
pub use consistency::check_identifier_consistency;
pub use fanout::{FanOutTiming, Orchestrator, SourceResults};
pub use input::InputValidator;
pub use validator::{BackgroundValidation, CompanyValidator};
