pub mod pagination;
pub mod filters;
pub mod project;
pub mod organization;
pub mod member;
pub mod notice;
pub mod workflow;
pub mod link;
pub mod phone;
pub mod reference;

pub use pagination::*;
pub use filters::*;
pub use project::*;
pub use organization::*;
pub use member::*;
pub use notice::*;
pub use workflow::*;
pub use link::*;
pub use phone::*;
pub use reference::*;
