//! Calendar instants stored as 32-bit epoch seconds.
//!
//! Conversion goes through the host's local time zone, so the bytes written for a given
//! calendar instant depend on where the encoder runs. Interoperating peers behave the
//! same way.

use crate::value::DmapValue;
use chrono::{Local, NaiveDateTime, TimeZone};
use dacp_core::CodecError;

/// Wire value standing in for "no timestamp" (`FF FF 9D 90`).
pub const ABSENT_SECONDS: i32 = -25200;

/// Optional local calendar instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    instant: Option<NaiveDateTime>,
    seconds: i32,
}

impl Timestamp {
    /// Wrap a local calendar instant, or `None` for the absent value.
    pub fn new(instant: Option<NaiveDateTime>) -> Result<Self, CodecError> {
        match instant {
            None => Ok(Self::absent()),
            Some(instant) => {
                let local = Local
                    .from_local_datetime(&instant)
                    .earliest()
                    .ok_or_else(|| {
                        CodecError::InvalidTimestamp(format!(
                            "{} does not exist in the local time zone",
                            instant
                        ))
                    })?;
                let epoch = local.timestamp();
                let seconds = i32::try_from(epoch).map_err(|_| CodecError::Range {
                    kind: "DateTime",
                    value: epoch.into(),
                    min: i32::MIN.into(),
                    max: i32::MAX.into(),
                })?;
                Ok(Self {
                    instant: Some(instant),
                    seconds,
                })
            }
        }
    }

    pub fn absent() -> Self {
        Self {
            instant: None,
            seconds: ABSENT_SECONDS,
        }
    }

    /// Interpret epoch seconds; the sentinel becomes the absent value.
    pub fn from_epoch_seconds(seconds: i32) -> Result<Self, CodecError> {
        if seconds == ABSENT_SECONDS {
            return Ok(Self::absent());
        }
        let local = Local
            .timestamp_opt(seconds.into(), 0)
            .single()
            .ok_or_else(|| {
                CodecError::InvalidTimestamp(format!("epoch {} out of range", seconds))
            })?;
        Ok(Self {
            instant: Some(local.naive_local()),
            seconds,
        })
    }

    pub fn instant(&self) -> Option<NaiveDateTime> {
        self.instant
    }

    pub fn epoch_seconds(&self) -> i32 {
        self.seconds
    }

    pub fn is_absent(&self) -> bool {
        self.instant.is_none()
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let bytes: [u8; 4] = data
            .get(..4)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| CodecError::Truncated {
                what: "DateTime".to_string(),
                needed: 4,
                available: data.len(),
            })?;
        Self::from_epoch_seconds(i32::from_be_bytes(bytes))
    }
}

impl DmapValue for Timestamp {
    fn encoded_len(&self) -> usize {
        4
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.seconds.to_be_bytes());
    }

    fn pretty(&self) -> String {
        match self.instant {
            Some(instant) => instant.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "none".to_string(),
        }
    }
}
