use std::fmt;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::logger::timezone::LoggerTimeZone;

/// RFC 3339 event timestamps in the configured timezone.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rfc3339Timer {
    tz: LoggerTimeZone,
}

impl Rfc3339Timer {
    pub(crate) fn new(tz: LoggerTimeZone) -> Self {
        Self { tz }
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.tz.offset())
    }
}

impl FormatTime for Rfc3339Timer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match self.now().format(&Rfc3339) {
            Ok(ts) => write!(w, "{ts}"),
            Err(_) => write!(w, "<invalid-time>"),
        }
    }
}
