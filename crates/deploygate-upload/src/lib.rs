//! DeployGate build upload
//!
//! Uploads an Android (APK) or iOS (IPA) build to DeployGate and interprets
//! the service's answer. The flow is linear and runs once per invocation:
//!
//! 1. [`Uploader::select`] picks the uploader variant for the configured artifact.
//! 2. A [`Transport`] (normally [`DeployGateClient`]) performs one multipart POST.
//! 3. [`ResponseInterpreter`] turns the JSON answer into an [`UploadResult`] or a
//!    categorized error, publishing results through a
//!    [`ResultPublisher`](deploygate_core::ResultPublisher).
//!
//! [`DeployGateAction`] wires the three together.
//!
//! ## Usage
//!
//! ```ignore
//! use deploygate_core::LaneContext;
//! use deploygate_upload::{DeployGateAction, DeployGateClient, TracingReporter};
//!
//! let client = DeployGateClient::new(&options.endpoint)?;
//! let action = DeployGateAction::new(client, TracingReporter);
//! let mut context = LaneContext::new();
//! let result = action.run(&options, &mut context).await?;
//! println!("revision #{}", result.revision);
//! ```

pub mod action;
pub mod error;
pub mod reporter;
pub mod response;
pub mod selector;
pub mod transport;
pub mod types;

pub use action::{is_supported, DeployGateAction};
pub use error::{ErrorKind, Result, UploadError};
pub use reporter::{Reporter, TracingReporter};
pub use response::ResponseInterpreter;
pub use selector::{ApkUploader, IpaUploader, Uploader};
pub use transport::{DeployGateClient, Transport};
pub use types::*;
