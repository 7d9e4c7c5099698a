//! Exporters for gear outlines.
//!
//! Both formats take the ordered point sequence of an outline and a uniform
//! scale factor. The plain-text DXF writer is always available; the `svg` and
//! `dxf` crate backed writers sit behind the `svg-io` and `dxf-io` features.

#[cfg(feature = "svg-io")]
pub mod svg;

pub mod dxf;

/// Generic I/O and format‑conversion errors.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),

    /// There are no points to write.
    EmptyOutline,
    MalformedInput(String),

    #[cfg(feature = "dxf-io")]
    /// Error bubbled up from the `dxf` crate while writing a drawing.
    Dxf(::dxf::DxfError),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            EmptyOutline => write!(f, "The outline has no points"),
            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),

            #[cfg(feature = "dxf-io")]
            Dxf(error) => write!(f, "DXF error: {error}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<toml::de::Error> for IoError {
    fn from(value: toml::de::Error) -> Self {
        Self::MalformedInput(value.to_string())
    }
}

#[cfg(feature = "dxf-io")]
impl From<::dxf::DxfError> for IoError {
    fn from(value: ::dxf::DxfError) -> Self {
        Self::Dxf(value)
    }
}
