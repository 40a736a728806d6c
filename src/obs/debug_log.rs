// std
use std::{
	fs::OpenOptions,
	io::{self, Write},
	path::{Path, PathBuf},
};
// crates.io
use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::_prelude::*;

const TIMESTAMP: &[BorrowedFormatItem<'_>] =
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const FILE_NAME: &[BorrowedFormatItem<'_>] = format_description!("upsoauth-[year][month][day].log");
const SPACER: &str = "------------------------------------------";

/// Operator-facing debug log, one file per local day.
///
/// Entries look like `2025-03-01 08:00:00: message`; an optional dashed spacer line precedes
/// entries that start a new request dump. Nothing is written while the log is disabled.
///
/// Timestamps use the offset given to [`DebugLog::with_utc_offset`]. Without one the log
/// asks the OS for the local offset, which `time` refuses to do once the process has more
/// than one thread; those entries fall back to UTC. Hosts running on a multi-threaded
/// runtime should read the offset at startup and pass it in.
#[derive(Clone, Debug, Default)]
pub struct DebugLog {
	sink: Sink,
	offset: Option<UtcOffset>,
}
#[derive(Clone, Debug, Default)]
enum Sink {
	#[default]
	Disabled,
	Directory(PathBuf),
	Memory(Arc<Mutex<Vec<String>>>),
}
impl DebugLog {
	/// Log that drops every entry.
	pub fn disabled() -> Self {
		Self::default()
	}

	/// Log appending to `upsoauth-YYYYMMDD.log` inside `dir`.
	pub fn to_directory(dir: impl Into<PathBuf>) -> Self {
		Self { sink: Sink::Directory(dir.into()), offset: None }
	}

	/// Log collecting entries in memory; read them back with [`DebugLog::entries`].
	pub fn in_memory() -> Self {
		Self { sink: Sink::Memory(Default::default()), offset: None }
	}

	/// Stamps entries and names files using `offset` instead of the OS local offset.
	pub fn with_utc_offset(mut self, offset: UtcOffset) -> Self {
		self.offset = Some(offset);

		self
	}

	/// Current instant in the log's offset.
	pub fn now(&self) -> OffsetDateTime {
		match self.offset {
			Some(offset) => OffsetDateTime::now_utc().to_offset(offset),
			None => OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
		}
	}

	/// Returns this log when `enabled`, otherwise a disabled one.
	pub fn enabled_if(self, enabled: bool) -> Self {
		if enabled { self } else { Self::disabled() }
	}

	/// Whether entries are kept.
	pub fn is_enabled(&self) -> bool {
		!matches!(self.sink, Sink::Disabled)
	}

	/// Entries collected by an in-memory log.
	pub fn entries(&self) -> Vec<String> {
		match &self.sink {
			Sink::Memory(entries) => entries.lock().clone(),
			_ => Vec::new(),
		}
	}

	/// Records `message`, ignoring I/O failures.
	pub fn record(&self, message: impl AsRef<str>) {
		self.write(message.as_ref(), false);
	}

	/// Records `message` preceded by a spacer line.
	pub fn record_section(&self, message: impl AsRef<str>) {
		self.write(message.as_ref(), true);
	}

	/// Records `message` and reports I/O failures.
	pub fn try_record(&self, message: &str, spacer: bool) -> io::Result<()> {
		let now = self.now();

		match &self.sink {
			Sink::Disabled => Ok(()),
			Sink::Memory(entries) => {
				entries.lock().push(entry_at(now, message, spacer)?);

				Ok(())
			},
			Sink::Directory(dir) => {
				let path = file_path(dir, now)?;
				let mut file = OpenOptions::new().create(true).append(true).open(path)?;

				file.write_all(entry_at(now, message, spacer)?.as_bytes())
			},
		}
	}

	fn write(&self, message: &str, spacer: bool) {
		#[cfg(feature = "tracing")]
		tracing::debug!(target: "ups_rates::debug_log", "{message}");

		if let Err(e) = self.try_record(message, spacer) {
			#[cfg(feature = "tracing")]
			tracing::warn!(error = %e, "Failed to write the debug log.");
			#[cfg(not(feature = "tracing"))]
			let _ = e;
		}
	}
}

/// Path of the log file for `instant` inside `dir`.
pub fn file_path(dir: &Path, instant: OffsetDateTime) -> io::Result<PathBuf> {
	Ok(dir.join(instant.format(FILE_NAME).map_err(io::Error::other)?))
}

/// Formats one log entry, newline included.
pub fn entry_at(instant: OffsetDateTime, message: &str, spacer: bool) -> io::Result<String> {
	let stamp = instant.format(TIMESTAMP).map_err(io::Error::other)?;

	Ok(if spacer {
		format!("{SPACER}\n{stamp}: {message}\n")
	} else {
		format!("{stamp}: {message}\n")
	})
}
