//! Core request, decoding and table infrastructure shared by both vendors.

pub mod credentials;
pub mod decode;
pub mod http;
pub mod logging;
pub mod query;
pub mod table;
pub mod vendor;
pub mod views;

pub use credentials::{Credentials, EandpCredentials, IconaCredentials};
pub use decode::{ShapeError, decode_elements, decode_labeled, decode_single_labeled};
pub use http::{DEFAULT_TIMEOUT, RawResponse, Session, classify};
pub use query::select_fragment;
pub use table::{Record, Row, RowIndex, Table, TableBuilder};
pub use vendor::Vendor;
pub use views::{ViewDescriptor, ViewDetail, fetch_views, flatten_views};
