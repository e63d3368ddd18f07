use ndarray::Array2;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};
use std::fmt;

pub const MIN_VERSION: i16 = 1;
pub const MAX_VERSION: i16 = 40;

/// QR version selection: a fixed version 1-40, or let the encoder pick the
/// smallest version that fits the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionSpec {
    Auto,
    Fixed(i16),
}

/// Why grid construction was rejected by the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeFailure {
    /// The data does not fit at the requested version and error correction level.
    DataTooLong,
    /// The requested version is outside 1-40.
    InvalidVersion,
    /// The data cannot be represented in any supported QR segment encoding.
    InvalidConfiguration,
}

impl fmt::Display for EncodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeFailure::DataTooLong => {
                write!(f, "data too long for the requested version and EC level")
            }
            EncodeFailure::InvalidVersion => write!(f, "QR version must be between 1 and 40"),
            EncodeFailure::InvalidConfiguration => {
                write!(f, "data cannot be encoded with the requested configuration")
            }
        }
    }
}

impl std::error::Error for EncodeFailure {}

impl From<QrError> for EncodeFailure {
    fn from(e: QrError) -> Self {
        match e {
            QrError::DataTooLong => EncodeFailure::DataTooLong,
            QrError::InvalidVersion => EncodeFailure::InvalidVersion,
            _ => EncodeFailure::InvalidConfiguration,
        }
    }
}

/// An immutable N x N matrix of dark/light modules, produced by the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleGrid {
    modules: Array2<bool>,
    version: i16,
}

impl ModuleGrid {
    pub fn build(data: &str, version: VersionSpec, ec_level: EcLevel) -> Result<Self, EncodeFailure> {
        let code = match version {
            VersionSpec::Auto => QrCode::with_error_correction_level(data, ec_level)?,
            VersionSpec::Fixed(v) => {
                if !(MIN_VERSION..=MAX_VERSION).contains(&v) {
                    return Err(EncodeFailure::InvalidVersion);
                }
                QrCode::with_version(data, Version::Normal(v), ec_level)?
            }
        };

        let size = code.width();
        let flat: Vec<bool> = code
            .to_colors()
            .into_iter()
            .map(|c| matches!(c, qrcode::Color::Dark))
            .collect();
        let modules = Array2::from_shape_vec((size, size), flat)
            .map_err(|_| EncodeFailure::InvalidConfiguration)?;

        // N = 21 + 4 * (version - 1), so the version is recoverable from N.
        let version = ((size - 21) / 4 + 1) as i16;

        Ok(Self { modules, version })
    }

    /// Module count N along one side.
    pub fn size(&self) -> usize {
        self.modules.nrows()
    }

    /// The version actually used, whether fixed or auto-selected.
    pub fn version(&self) -> i16 {
        self.version
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules[[row, col]]
    }

    pub fn modules(&self) -> &Array2<bool> {
        &self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_at_version_1_is_21_modules() {
        let grid = ModuleGrid::build("HELLO", VersionSpec::Fixed(1), EcLevel::L).unwrap();
        assert_eq!(grid.size(), 21);
        assert_eq!(grid.version(), 1);
    }

    #[test]
    fn auto_version_recovers_version_from_size() {
        let grid = ModuleGrid::build("HELLO", VersionSpec::Auto, EcLevel::L).unwrap();
        assert_eq!(grid.size(), 21 + 4 * (grid.version() as usize - 1));
    }

    #[test]
    fn too_much_data_is_data_too_long() {
        let data = "A".repeat(10_000);
        let err = ModuleGrid::build(&data, VersionSpec::Fixed(1), EcLevel::H).unwrap_err();
        assert_eq!(err, EncodeFailure::DataTooLong);
    }

    #[test]
    fn out_of_range_version_is_rejected() {
        let err = ModuleGrid::build("HELLO", VersionSpec::Fixed(41), EcLevel::L).unwrap_err();
        assert_eq!(err, EncodeFailure::InvalidVersion);
        let err = ModuleGrid::build("HELLO", VersionSpec::Fixed(0), EcLevel::L).unwrap_err();
        assert_eq!(err, EncodeFailure::InvalidVersion);
    }

    #[test]
    fn grid_top_left_finder_corner_is_dark() {
        // Every QR symbol has a dark module at (0, 0): the finder ring corner.
        let grid = ModuleGrid::build("HELLO", VersionSpec::Fixed(1), EcLevel::L).unwrap();
        assert!(grid.is_dark(0, 0));
    }
}
