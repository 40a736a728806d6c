//! UPS RESTful rating for storefront checkout: OAuth client-credentials tokens cached per
//! session, rate shopping filtered to the services a store offers, and handling-fee aware
//! pricing of the resulting shipping options.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod admin;
pub mod auth;
pub mod carrier;
pub mod config;
pub mod error;
pub mod hooks;
#[cfg(feature = "reqwest")] pub mod http;
pub mod messages;
pub mod module;
pub mod obs;
pub mod rating;
pub mod services;
pub mod store;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, BTreeSet, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
