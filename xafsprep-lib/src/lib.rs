pub mod constants;
pub mod elam;
pub mod error;
pub mod provider;
pub mod registry;
pub mod report;
pub mod sample;
pub mod session;
pub mod spline;

pub use elam::ElamTable;
pub use error::{LookupError, PrepError, Result, TableLoadError};
pub use provider::{CrossSectionData, CrossSectionProvider};
pub use registry::SampleRegistry;
pub use report::{PelletReport, SampleReport};
pub use sample::{Constituent, Pellet, Sample};
pub use session::{Console, Session, SessionSettings, SessionState};
pub use xafsprep_data;
