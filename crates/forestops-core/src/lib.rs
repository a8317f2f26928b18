pub mod auth;
pub mod dashboard;
pub mod data_file;
pub mod emergency;
pub mod error;
pub mod field_task;
pub mod health;
pub mod inspection;
pub mod list;
pub mod map;
pub mod priority;
pub mod progress;
pub mod report;
pub mod resource;
pub mod role;
pub mod seed;
pub mod session;
pub mod team;
pub mod theme;
pub mod user;
pub mod validate;
pub mod work_order;

pub use data_file::DataFile;
pub use emergency::EmergencyTask;
pub use error::ForestError;
pub use field_task::FieldTask;
pub use inspection::Inspection;
pub use list::{project, Draft, ListQuery, Patch, Record, SortDirection, StatusFilter};
pub use map::MapMarker;
pub use priority::Priority;
pub use progress::Progress;
pub use resource::Resource;
pub use role::{authorize, Role, Route};
pub use session::{Gate, Session};
pub use team::TeamMember;
pub use theme::Theme;
pub use user::UserAccount;
pub use work_order::WorkOrder;
