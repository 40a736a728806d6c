//! Extension points the host wires in: observers, operator email, and the release feed.

// self
use crate::{_prelude::*, carrier::RateRequest, rating::Shipment, store::ConfigRow};

/// Boxed future returned by hook implementations.
pub type HookFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

/// Observer notified at the module's hook points. Every method defaults to a no-op.
pub trait ModuleObserver
where
	Self: Send + Sync,
{
	/// Called with the fully built request before it is sent; may edit it.
	fn before_rate_request(&self, shipment: &Shipment, request: &mut RateRequest) {
		let _ = (shipment, request);
	}

	/// Called after the storefront status is computed; may veto by clearing `enabled`.
	fn on_update_status(&self, enabled: &mut bool) {
		let _ = enabled;
	}

	/// Extra rows to insert after the module's own rows are installed.
	fn after_install(&self) -> Vec<ConfigRow> {
		Vec::new()
	}

	/// Extra keys to delete when the module is removed.
	fn after_remove(&self) -> Vec<String> {
		Vec::new()
	}
}

/// Observer that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;
impl ModuleObserver for NoopObserver {}

/// Message sent to the store owner when the module disables itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorEmail {
	/// Recipient display name.
	pub to_name: String,
	/// Recipient address.
	pub to_address: String,
	/// Subject line.
	pub subject: String,
	/// Plain-text body.
	pub body: String,
	/// Sender display name.
	pub from_name: String,
	/// Sender address.
	pub from_address: String,
}

/// Host email facility.
pub trait OperatorMailer
where
	Self: Send + Sync,
{
	/// Delivers `email`; delivery failures are the host's to report.
	fn send(&self, email: OperatorEmail) -> HookFuture<'_, ()>;
}

/// Mailer that discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMailer;
impl OperatorMailer for NoopMailer {
	fn send(&self, _: OperatorEmail) -> HookFuture<'_, ()> {
		Box::pin(async {})
	}
}

/// Mailer that keeps messages in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryMailer(Arc<Mutex<Vec<OperatorEmail>>>);
impl MemoryMailer {
	/// Messages sent so far.
	pub fn sent(&self) -> Vec<OperatorEmail> {
		self.0.lock().clone()
	}
}
impl OperatorMailer for MemoryMailer {
	fn send(&self, email: OperatorEmail) -> HookFuture<'_, ()> {
		self.0.lock().push(email);

		Box::pin(async {})
	}
}

/// Newer plugin release reported by a [`ReleaseFeed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseNotice {
	/// Released version.
	pub version: String,
	/// Download or details page.
	pub link: String,
}

/// Source of plugin release information.
pub trait ReleaseFeed
where
	Self: Send + Sync,
{
	/// Returns a notice when a release newer than `current` exists for `plugin_id`.
	fn newer_release<'a>(
		&'a self,
		plugin_id: u32,
		current: &'a str,
	) -> HookFuture<'a, Option<ReleaseNotice>>;
}

/// Feed that never reports a release.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReleaseFeed;
impl ReleaseFeed for NoReleaseFeed {
	fn newer_release<'a>(&'a self, _: u32, _: &'a str) -> HookFuture<'a, Option<ReleaseNotice>> {
		Box::pin(async { None })
	}
}

/// Feed answering from a fixed latest release.
#[derive(Clone, Debug)]
pub struct FixedReleaseFeed {
	latest: ReleaseNotice,
	checks: Arc<Mutex<usize>>,
}
impl FixedReleaseFeed {
	/// Feed whose latest release is `latest`.
	pub fn new(latest: ReleaseNotice) -> Self {
		Self { latest, checks: Default::default() }
	}

	/// Number of checks answered so far.
	pub fn checks(&self) -> usize {
		*self.checks.lock()
	}
}
impl ReleaseFeed for FixedReleaseFeed {
	fn newer_release<'a>(
		&'a self,
		_: u32,
		current: &'a str,
	) -> HookFuture<'a, Option<ReleaseNotice>> {
		*self.checks.lock() += 1;

		let notice = crate::admin::ModuleVersion::parse(&self.latest.version)
			.ok()
			.zip(crate::admin::ModuleVersion::parse(current).ok())
			.filter(|(latest, current)| latest > current)
			.map(|_| self.latest.clone());

		Box::pin(async move { notice })
	}
}
