use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use kaiju_rampage_core::MapLayout;
use thiserror::Error;

const LAYOUT_DOMAIN: &str = "kaiju";
const LAYOUT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded layout payload.
pub(crate) const LAYOUT_HEADER: &str = "kaiju:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Board layout together with the grid dimensions it was generated for.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LayoutSnapshot {
    /// Number of grid rows.
    pub(crate) rows: u32,
    /// Number of grid columns.
    pub(crate) columns: u32,
    /// Entities composing the layout.
    pub(crate) layout: MapLayout,
}

impl LayoutSnapshot {
    /// Encodes the snapshot into a single-line string suitable for sharing.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let json = serde_json::to_vec(&self.layout).map_err(LayoutTransferError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{LAYOUT_HEADER}:{}x{}:{encoded}",
            self.rows, self.columns
        ))
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(LayoutTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != LAYOUT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != LAYOUT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (rows, columns) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let layout: MapLayout =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        Ok(Self {
            rows,
            columns,
            layout,
        })
    }
}

/// Errors that can occur while encoding or decoding layout strings.
#[derive(Debug, Error)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("layout string was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded layout.
    #[error("layout string is missing the prefix")]
    MissingPrefix,
    /// The encoded layout did not contain a version segment.
    #[error("layout string is missing the version")]
    MissingVersion,
    /// The encoded layout did not include grid dimensions.
    #[error("layout string is missing the grid dimensions")]
    MissingDimensions,
    /// The encoded layout did not include the payload segment.
    #[error("layout string is missing the payload")]
    MissingPayload,
    /// The encoded layout used an unexpected prefix segment.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded layout used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded layout.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode layout payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be converted to or from JSON.
    #[error("could not convert layout payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), LayoutTransferError> {
    let invalid = || LayoutTransferError::InvalidDimensions(dimensions.to_owned());
    let (rows, columns) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;
    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;

    if rows == 0 || columns == 0 {
        return Err(invalid());
    }

    Ok((rows, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaiju_rampage_core::{CellCoord, Direction, KaijuKind, KaijuSeed};

    #[test]
    fn encoded_layout_decodes_to_the_same_snapshot() {
        let snapshot = LayoutSnapshot {
            rows: 6,
            columns: 9,
            layout: MapLayout {
                kaijus: vec![KaijuSeed {
                    cell: CellCoord::new(3, 0),
                    kind: KaijuKind::Green,
                    facing: Direction::East,
                }],
                ..MapLayout::default()
            },
        };

        let encoded = snapshot.encode().expect("layout encodes");
        assert!(encoded.starts_with(&format!("{LAYOUT_HEADER}:6x9:")));

        let decoded = LayoutSnapshot::decode(&encoded).expect("layout decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn rejects_foreign_prefix_and_bad_dimensions() {
        assert!(matches!(
            LayoutSnapshot::decode("city:v1:5x5:e30"),
            Err(LayoutTransferError::InvalidPrefix(prefix)) if prefix == "city"
        ));
        assert!(matches!(
            LayoutSnapshot::decode("kaiju:v2:5x5:e30"),
            Err(LayoutTransferError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("kaiju:v1:0x5:e30"),
            Err(LayoutTransferError::InvalidDimensions(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("kaiju:v1:5x5"),
            Err(LayoutTransferError::MissingPayload)
        ));
        assert!(matches!(
            LayoutSnapshot::decode("   "),
            Err(LayoutTransferError::EmptyPayload)
        ));
    }

    #[test]
    fn payload_errors_keep_their_source() {
        use std::error::Error as _;

        let error = LayoutSnapshot::decode("kaiju:v1:5x5:!!!").expect_err("bad base64");
        assert!(matches!(error, LayoutTransferError::InvalidEncoding(_)));
        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("could not decode layout payload"));
    }

    #[test]
    fn empty_object_payload_yields_empty_layout() {
        // "{}" without padding.
        let decoded = LayoutSnapshot::decode("kaiju:v1:5x5:e30").expect("layout decodes");
        assert!(decoded.layout.is_empty());
        assert_eq!((decoded.rows, decoded.columns), (5, 5));
    }
}
